#[macro_export]
/// Define an async callback for Yew components.
///
/// The listed handles are cloned once into the callback and once more per
/// invocation, then the body runs inside `wasm_bindgen_futures::spawn_local`.
///
/// Without an event parameter:
/// ```compile_fail
/// let refresh = async_callback!([api, channels] {
///     match list_channels(&*api, &ChannelQuery::default()).await {
///         Ok(page) => channels.set(page.items),
///         Err(err) => beacon::log::debug!("channel refresh failed: {err}"),
///     }
/// });
/// ```
///
/// With an event parameter, for handlers that need the event or a value
/// captured per row:
/// ```compile_fail
/// let on_delete = async_callback!([api, reload] |id: SourceId| {
///     if delete_source(&*api, id).await.is_ok() {
///         reload.emit(());
///     }
/// });
/// ```
macro_rules! async_callback {
    // Version with event parameter; must come first, a closure is also an expr
    ([$($var:ident),* $(,)?] |$event:ident $(: $ty:ty)?| $body:expr) => {
        {
            $(let $var = $var.clone();)*
            Callback::from(move |$event $(: $ty)?| {
                $(let $var = $var.clone();)*
                wasm_bindgen_futures::spawn_local(async move {
                    $body
                });
            })
        }
    };

    // Version without event parameter
    ([$($var:ident),* $(,)?] $body:expr) => {
        {
            $(let $var = $var.clone();)*
            Callback::from(move |_| {
                $(let $var = $var.clone();)*
                wasm_bindgen_futures::spawn_local(async move {
                    $body
                });
            })
        }
    };
}
