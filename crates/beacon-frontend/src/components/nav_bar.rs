use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;

#[function_component(NavBar)]
pub fn nav_bar() -> Html {
    let current = use_route::<Route>();

    html! {
        <nav class="flex gap-6 px-8 py-4 border-b border-gray-200">
            <span class="font-bold">{ "Beacon" }</span>
            { for Route::NAVIGATION.into_iter().map(|route| {
                let active = current.as_ref() == Some(&route);
                let classes = if active { "text-blue-600 font-semibold" } else { "text-gray-700 hover:text-blue-600" };
                html! {
                    <Link<Route> to={route.clone()} classes={classes!(classes)}>{ route.title() }</Link<Route>>
                }
            }) }
        </nav>
    }
}
