use yew::prelude::*;

use crate::providers::use_global_loading;

/// Thin progress strip across the top of the page while any request is pending.
#[function_component(LoadingBar)]
pub fn loading_bar() -> Html {
    let loading = use_global_loading();

    let classes = if loading {
        "h-1 w-full bg-blue-600 animate-pulse"
    } else {
        "h-1 w-full bg-transparent"
    };

    html! {
        <div class={classes} role="progressbar" aria-busy={loading.to_string()} />
    }
}
