mod components;
mod hooks;
mod pages;
mod providers;
mod routes;

use yew::prelude::*;
use yew_router::prelude::*;

use components::{LoadingBar, NavBar};
use providers::{ApiProvider, NotificationProvider};
use routes::{Route, switch};

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <NotificationProvider>
                <ApiProvider>
                    <LoadingBar />
                    <NavBar />
                    <main class="max-w-5xl mx-auto p-8">
                        <Switch<Route> render={switch} />
                    </main>
                </ApiProvider>
            </NotificationProvider>
        </BrowserRouter>
    }
}

fn main() {
    beacon::log::setup().expect("Failed to setup logging");
    yew::Renderer::<App>::new().render();
}
