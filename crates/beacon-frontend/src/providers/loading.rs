use yew::prelude::*;

use super::api::use_api;

/// Whether any request is in flight. Re-renders the caller when that flips.
#[hook]
pub fn use_global_loading() -> bool {
    let api = use_api();
    let tracker = api.tracker().clone();
    let loading = use_state_eq(|| tracker.is_loading());

    {
        let loading = loading.clone();
        use_effect_with(tracker, move |tracker| {
            loading.set(tracker.is_loading());
            let subscription = tracker.subscribe(move |is_loading| loading.set(is_loading));
            move || drop(subscription)
        });
    }

    *loading
}
