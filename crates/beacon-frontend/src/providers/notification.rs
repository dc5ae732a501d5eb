//! Global toast notifications.
//!
//! The HTTP client pushes every transport failure here. Pages push their own
//! business-error and success messages through [`use_notifications`].

use std::cell::RefCell;
use std::rc::Rc;

use beacon::api::ApiError;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

/// Time in milliseconds before a notification auto-dismisses
const AUTO_DISMISS_MS: u32 = 5000;
/// Oldest toasts are dropped beyond this many
const MAX_VISIBLE: usize = 5;

type NotificationId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

impl NotificationLevel {
    fn classes(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "bg-blue-100 text-blue-800",
            NotificationLevel::Success => "bg-green-100 text-green-800",
            NotificationLevel::Error => "bg-red-100 text-red-700",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    id: NotificationId,
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> NotificationBuilder {
        NotificationBuilder::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> NotificationBuilder {
        NotificationBuilder::new(NotificationLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> NotificationBuilder {
        NotificationBuilder::new(NotificationLevel::Error, message)
    }
}

pub struct NotificationBuilder {
    level: NotificationLevel,
    message: String,
}

impl NotificationBuilder {
    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    fn build(self, id: NotificationId) -> Notification {
        Notification {
            id,
            level: self.level,
            message: self.message,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationList {
    items: Vec<Notification>,
}

pub enum NotificationAction {
    Push(Notification),
    Dismiss(NotificationId),
}

impl Reducible for NotificationList {
    type Action = NotificationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        match action {
            NotificationAction::Push(notification) => {
                items.push(notification);
                if items.len() > MAX_VISIBLE {
                    items.remove(0);
                }
            }
            NotificationAction::Dismiss(id) => items.retain(|n| n.id != id),
        }
        Rc::new(NotificationList { items })
    }
}

#[derive(Clone)]
pub struct NotificationContext {
    dispatcher: UseReducerDispatcher<NotificationList>,
    next_id: Rc<RefCell<NotificationId>>,
}

impl PartialEq for NotificationContext {
    fn eq(&self, other: &Self) -> bool {
        self.dispatcher == other.dispatcher && Rc::ptr_eq(&self.next_id, &other.next_id)
    }
}

impl NotificationContext {
    pub fn push(&self, builder: NotificationBuilder) {
        let id = {
            let mut next_id = self.next_id.borrow_mut();
            let id = *next_id;
            *next_id = next_id.wrapping_add(1);
            id
        };
        self.dispatcher
            .dispatch(NotificationAction::Push(builder.build(id)));

        let dispatcher = self.dispatcher.clone();
        Timeout::new(AUTO_DISMISS_MS, move || {
            dispatcher.dispatch(NotificationAction::Dismiss(id));
        })
        .forget();
    }

    pub fn dismiss(&self, id: NotificationId) {
        self.dispatcher.dispatch(NotificationAction::Dismiss(id));
    }

    /// Show an API error unless the client already did. Transport failures
    /// are announced by the client itself.
    pub fn report(&self, err: &ApiError) {
        if !matches!(err, ApiError::Transport(_)) {
            self.push(Notification::error(err.display_message()));
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationProviderProps {
    pub children: Children,
}

#[function_component(NotificationProvider)]
pub fn notification_provider(props: &NotificationProviderProps) -> Html {
    let list = use_reducer(NotificationList::default);
    let next_id = use_mut_ref(|| 0);

    let context = NotificationContext {
        dispatcher: list.dispatcher(),
        next_id,
    };

    let toasts = list.items.iter().map(|notification| {
        let context = context.clone();
        let id = notification.id;
        let onclick = Callback::from(move |_| context.dismiss(id));

        html! {
            <div key={id} class={classes!("flex", "items-center", "gap-3", "px-4", "py-2", "rounded", "shadow", notification.level.classes())}>
                <span class="flex-1">{ &notification.message }</span>
                <button class="font-bold cursor-pointer" {onclick} aria-label="Dismiss notification">{ "×" }</button>
            </div>
        }
    });

    html! {
        <ContextProvider<NotificationContext> context={context.clone()}>
            { props.children.clone() }
            <div class="fixed top-4 right-4 z-50 space-y-2">
                { for toasts }
            </div>
        </ContextProvider<NotificationContext>>
    }
}

#[hook]
pub fn use_notifications() -> NotificationContext {
    use_context::<NotificationContext>()
        .expect("use_notifications must be used within a NotificationProvider")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(list: Rc<NotificationList>, id: NotificationId) -> Rc<NotificationList> {
        list.reduce(NotificationAction::Push(
            Notification::error(format!("failure {id}")).build(id),
        ))
    }

    #[test]
    fn push_then_dismiss() {
        let list = push(Rc::new(NotificationList::default()), 1);
        let list = push(list, 2);
        assert_eq!(list.items.len(), 2);

        let list = list.reduce(NotificationAction::Dismiss(1));
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].message, "failure 2");
    }

    #[test]
    fn oldest_toast_is_dropped_past_the_cap() {
        let mut list = Rc::new(NotificationList::default());
        for id in 0..(MAX_VISIBLE as u32 + 2) {
            list = push(list, id);
        }

        assert_eq!(list.items.len(), MAX_VISIBLE);
        assert_eq!(list.items[0].id, 2);
    }
}
