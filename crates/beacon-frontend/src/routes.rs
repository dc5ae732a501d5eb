use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{ContentsPage, DashboardPage, HistoryPage, SettingsPage};

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Root,
    #[at("/dashboard")]
    Dashboard,
    #[at("/contents")]
    Contents,
    #[at("/settings")]
    Settings,
    #[at("/history")]
    History,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Routes shown in the navigation bar, in display order.
    pub const NAVIGATION: [Route; 4] = [
        Route::Dashboard,
        Route::Contents,
        Route::Settings,
        Route::History,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Route::Root => "root",
            Route::Dashboard => "dashboard",
            Route::Contents => "contents",
            Route::Settings => "settings",
            Route::History => "history",
            Route::NotFound => "not-found",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Root | Route::Dashboard => "Dashboard",
            Route::Contents => "Contents",
            Route::Settings => "Settings",
            Route::History => "Push History",
            Route::NotFound => "Not Found",
        }
    }
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Root => html! { <Redirect<Route> to={Route::Dashboard} /> },
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Contents => html! { <ContentsPage /> },
        Route::Settings => html! { <SettingsPage /> },
        Route::History => html! { <HistoryPage /> },
        Route::NotFound => html! { <div>{ "404 Not Found" }</div> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_paths_round_trip() {
        for route in Route::NAVIGATION {
            let path = route.to_path();
            assert_eq!(path, format!("/{}", route.name()));
            assert_eq!(Route::recognize(&path), Some(route));
        }
    }

    #[test]
    fn root_is_its_own_entry() {
        assert_eq!(Route::Root.to_path(), "/");
        assert_eq!(Route::recognize("/"), Some(Route::Root));
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        assert_eq!(Route::recognize("/channels/7"), Some(Route::NotFound));
    }
}
