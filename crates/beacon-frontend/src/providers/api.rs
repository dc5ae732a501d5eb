use std::ops::Deref;
use std::rc::Rc;

use beacon::api::{FnNotifier, HttpApiClient};
use beacon::config::ClientConfig;
use beacon::loading::LoadingTracker;
use yew::prelude::*;

use super::notification::{Notification, use_notifications};

/// The API client shared by every page.
#[derive(Clone)]
pub struct ApiContext {
    client: Rc<HttpApiClient>,
}

impl ApiContext {
    pub fn tracker(&self) -> &LoadingTracker {
        self.client.tracker()
    }
}

impl Deref for ApiContext {
    type Target = HttpApiClient;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl PartialEq for ApiContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}

/// Build the browser client. Transport failures go to `notify`.
pub fn create(tracker: LoadingTracker, notify: Callback<String>) -> HttpApiClient {
    HttpApiClient::new(ClientConfig::from_build_env(), tracker)
        .with_notifier(FnNotifier::new(move |message| notify.emit(message.to_string())))
}

#[derive(Properties, PartialEq)]
pub struct ApiProviderProps {
    pub children: Children,
}

/// Must sit inside a [`NotificationProvider`](super::NotificationProvider).
#[function_component(ApiProvider)]
pub fn api_provider(props: &ApiProviderProps) -> Html {
    let notifications = use_notifications();
    let context = use_memo((), move |_| {
        let notify = Callback::from(move |message: String| {
            notifications.push(Notification::error(message));
        });
        ApiContext {
            client: Rc::new(create(LoadingTracker::new(), notify)),
        }
    });

    html! {
        <ContextProvider<ApiContext> context={(*context).clone()}>
            {props.children.clone()}
        </ContextProvider<ApiContext>>
    }
}

#[hook]
pub fn use_api() -> ApiContext {
    use_context::<ApiContext>().expect("use_api must be used within an ApiProvider")
}
