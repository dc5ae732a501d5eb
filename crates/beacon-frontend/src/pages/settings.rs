//! Sources, channels and the bindings between them.

use beacon::async_callback;
use beacon::data::{
    Binding, BindingQuery, Channel, ChannelPatch, ChannelPlatform, ChannelQuery, Deletion,
    NewBinding, NewChannel, NewSource, Source, SourcePatch, SourceQuery, SourceType,
};
use beacon::id::{BindingId, ChannelId, SourceId};
use beacon::resources::{
    create_channel, create_source, create_source_channel_binding, delete_channel, delete_source,
    delete_source_channel_binding, list_channels, list_source_channel_bindings, list_sources,
    update_channel, update_source,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::use_refresh;
use crate::providers::{Notification, NotificationContext, use_api, use_notifications};

/// Settings lists are short; one large page shows everything.
const PAGE_SIZE: u32 = 100;

fn parse_source_type(value: &str) -> SourceType {
    match value {
        "keyword" => SourceType::Keyword,
        _ => SourceType::Author,
    }
}

fn parse_platform(value: &str) -> ChannelPlatform {
    match value {
        "dingtalk" => ChannelPlatform::Dingtalk,
        "feishu" => ChannelPlatform::Feishu,
        _ => ChannelPlatform::Wechat,
    }
}

fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value().trim().to_string())
        .unwrap_or_default()
}

fn select_value(node: &NodeRef) -> String {
    node.cast::<HtmlSelectElement>()
        .map(|select| select.value())
        .unwrap_or_default()
}

fn announce_deletion(notifications: &NotificationContext, what: &str, deletion: Deletion) {
    if deletion.deleted {
        notifications.push(Notification::success(format!("{what} deleted")));
    } else {
        let reason = deletion.reason.unwrap_or_else(|| "not found".to_string());
        notifications.push(Notification::info(format!("{what} not deleted: {reason}")));
    }
}

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let api = use_api();
    let notifications = use_notifications();
    let (generation, refresh) = use_refresh();
    let sources = use_state(Vec::<Source>::new);
    let channels = use_state(Vec::<Channel>::new);
    let bindings = use_state(Vec::<Binding>::new);

    {
        let api = api.clone();
        let notifications = notifications.clone();
        let sources = sources.clone();
        let channels = channels.clone();
        let bindings = bindings.clone();
        use_effect_with(generation, move |_| {
            spawn_local(async move {
                let page_size = Some(PAGE_SIZE);
                match list_sources(&*api, &SourceQuery { page_size, ..Default::default() }).await {
                    Ok(page) => sources.set(page.items),
                    Err(err) => notifications.report(&err),
                }
                match list_channels(&*api, &ChannelQuery { page_size, ..Default::default() }).await {
                    Ok(page) => channels.set(page.items),
                    Err(err) => notifications.report(&err),
                }
                let query = BindingQuery { page_size, ..Default::default() };
                match list_source_channel_bindings(&*api, &query).await {
                    Ok(page) => bindings.set(page.items),
                    Err(err) => notifications.report(&err),
                }
            });
        });
    }

    // ---- sources ----

    let source_type_ref = use_node_ref();
    let source_value_ref = use_node_ref();
    let source_remark_ref = use_node_ref();

    let on_create_source = {
        let api = api.clone();
        let notifications = notifications.clone();
        let refresh = refresh.clone();
        let source_type_ref = source_type_ref.clone();
        let source_value_ref = source_value_ref.clone();
        let source_remark_ref = source_remark_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let value = input_value(&source_value_ref);
            if value.is_empty() {
                notifications.push(Notification::error("Source value is required"));
                return;
            }
            let remark = input_value(&source_remark_ref);
            let payload = NewSource {
                kind: parse_source_type(&select_value(&source_type_ref)),
                value,
                is_active: true,
                remark: (!remark.is_empty()).then_some(remark),
            };
            let api = api.clone();
            let notifications = notifications.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match create_source(&*api, &payload).await {
                    Ok(source) => {
                        notifications.push(Notification::success(format!("Source {} added", source.value)));
                        refresh.emit(());
                    }
                    Err(err) => notifications.report(&err),
                }
            });
        })
    };

    let on_toggle_source = async_callback!([api, notifications, refresh] |source: (SourceId, bool)| {
        let (id, is_active) = source;
        let patch = SourcePatch {
            is_active: Some(!is_active),
            ..Default::default()
        };
        match update_source(&*api, id, &patch).await {
            Ok(_) => refresh.emit(()),
            Err(err) => notifications.report(&err),
        }
    });

    let on_delete_source = async_callback!([api, notifications, refresh] |id: SourceId| {
        match delete_source(&*api, id).await {
            Ok(deletion) => {
                announce_deletion(&notifications, "Source", deletion);
                refresh.emit(());
            }
            Err(err) => notifications.report(&err),
        }
    });

    // ---- channels ----

    let platform_ref = use_node_ref();
    let channel_name_ref = use_node_ref();
    let webhook_ref = use_node_ref();

    let on_create_channel = {
        let api = api.clone();
        let notifications = notifications.clone();
        let refresh = refresh.clone();
        let platform_ref = platform_ref.clone();
        let channel_name_ref = channel_name_ref.clone();
        let webhook_ref = webhook_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = input_value(&channel_name_ref);
            let webhook_url = input_value(&webhook_ref);
            if name.is_empty() || webhook_url.is_empty() {
                notifications.push(Notification::error("Channel name and webhook URL are required"));
                return;
            }
            let payload = NewChannel {
                platform: parse_platform(&select_value(&platform_ref)),
                webhook_url,
                name,
                is_active: true,
            };
            let api = api.clone();
            let notifications = notifications.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match create_channel(&*api, &payload).await {
                    Ok(channel) => {
                        notifications.push(Notification::success(format!("Channel {} added", channel.name)));
                        refresh.emit(());
                    }
                    Err(err) => notifications.report(&err),
                }
            });
        })
    };

    let on_toggle_channel = async_callback!([api, notifications, refresh] |channel: (ChannelId, bool)| {
        let (id, is_active) = channel;
        let patch = ChannelPatch {
            is_active: Some(!is_active),
            ..Default::default()
        };
        match update_channel(&*api, id, &patch).await {
            Ok(_) => refresh.emit(()),
            Err(err) => notifications.report(&err),
        }
    });

    let on_delete_channel = async_callback!([api, notifications, refresh] |id: ChannelId| {
        match delete_channel(&*api, id).await {
            Ok(deletion) => {
                announce_deletion(&notifications, "Channel", deletion);
                refresh.emit(());
            }
            Err(err) => notifications.report(&err),
        }
    });

    // ---- bindings ----

    let bind_source_ref = use_node_ref();
    let bind_channel_ref = use_node_ref();

    let on_create_binding = {
        let api = api.clone();
        let notifications = notifications.clone();
        let refresh = refresh.clone();
        let bind_source_ref = bind_source_ref.clone();
        let bind_channel_ref = bind_channel_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let source_id = select_value(&bind_source_ref).parse::<i64>();
            let channel_id = select_value(&bind_channel_ref).parse::<i64>();
            let (Ok(source_id), Ok(channel_id)) = (source_id, channel_id) else {
                notifications.push(Notification::error("Pick a source and a channel"));
                return;
            };
            let payload = NewBinding {
                source_id: source_id.into(),
                channel_id: channel_id.into(),
            };
            let api = api.clone();
            let notifications = notifications.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match create_source_channel_binding(&*api, &payload).await {
                    Ok(_) => {
                        notifications.push(Notification::success("Binding added"));
                        refresh.emit(());
                    }
                    Err(err) => notifications.report(&err),
                }
            });
        })
    };

    let on_delete_binding = async_callback!([api, notifications, refresh] |id: BindingId| {
        match delete_source_channel_binding(&*api, id).await {
            Ok(deletion) => {
                announce_deletion(&notifications, "Binding", deletion);
                refresh.emit(());
            }
            Err(err) => notifications.report(&err),
        }
    });

    let source_name = |id: SourceId| {
        sources
            .iter()
            .find(|s| s.id == id)
            .map_or_else(|| format!("#{id}"), |s| s.value.clone())
    };
    let channel_name = |id: ChannelId| {
        channels
            .iter()
            .find(|c| c.id == id)
            .map_or_else(|| format!("#{id}"), |c| c.name.clone())
    };

    let row_button = "text-sm text-blue-600 cursor-pointer mr-3";
    let input_class = "px-3 py-2 border border-gray-300 rounded";

    html! {
        <div class="space-y-8">
            <h1 class="text-2xl font-bold">{ "Settings" }</h1>

            <section>
                <h2 class="text-xl font-semibold mb-2">{ "Sources" }</h2>
                <form class="flex gap-2 mb-3" onsubmit={on_create_source}>
                    <select class={input_class} ref={source_type_ref}>
                        <option value="author">{ "Author" }</option>
                        <option value="keyword">{ "Keyword" }</option>
                    </select>
                    <input class={input_class} placeholder="Handle or keyword" ref={source_value_ref} />
                    <input class={input_class} placeholder="Remark (optional)" ref={source_remark_ref} />
                    <button type="submit" class="bg-blue-600 text-white px-4 py-2 rounded">{ "Add" }</button>
                </form>
                <ul class="space-y-1">
                    { for sources.iter().map(|source| {
                        let id = source.id;
                        let is_active = source.is_active;
                        let toggle = on_toggle_source.clone();
                        let delete = on_delete_source.clone();
                        html! {
                            <li key={id.value()} class="flex items-center gap-3">
                                <span class="flex-1">
                                    { format!("{:?}: {}", source.kind, source.value) }
                                    if let Some(remark) = &source.remark {
                                        <span class="text-gray-500">{ format!(" ({remark})") }</span>
                                    }
                                </span>
                                <button class={row_button} onclick={Callback::from(move |_| toggle.emit((id, is_active)))}>
                                    { if is_active { "Disable" } else { "Enable" } }
                                </button>
                                <button class={row_button} onclick={Callback::from(move |_| delete.emit(id))}>{ "Delete" }</button>
                            </li>
                        }
                    }) }
                </ul>
            </section>

            <section>
                <h2 class="text-xl font-semibold mb-2">{ "Channels" }</h2>
                <form class="flex gap-2 mb-3" onsubmit={on_create_channel}>
                    <select class={input_class} ref={platform_ref}>
                        <option value="wechat">{ "WeChat" }</option>
                        <option value="dingtalk">{ "DingTalk" }</option>
                        <option value="feishu">{ "Feishu" }</option>
                    </select>
                    <input class={input_class} placeholder="Name" ref={channel_name_ref} />
                    <input class={classes!(input_class, "flex-1")} placeholder="Webhook URL" ref={webhook_ref} />
                    <button type="submit" class="bg-blue-600 text-white px-4 py-2 rounded">{ "Add" }</button>
                </form>
                <ul class="space-y-1">
                    { for channels.iter().map(|channel| {
                        let id = channel.id;
                        let is_active = channel.is_active;
                        let toggle = on_toggle_channel.clone();
                        let delete = on_delete_channel.clone();
                        html! {
                            <li key={id.value()} class="flex items-center gap-3">
                                <span class="flex-1">{ format!("{} [{}]", channel.name, channel.platform.as_str()) }</span>
                                <button class={row_button} onclick={Callback::from(move |_| toggle.emit((id, is_active)))}>
                                    { if is_active { "Disable" } else { "Enable" } }
                                </button>
                                <button class={row_button} onclick={Callback::from(move |_| delete.emit(id))}>{ "Delete" }</button>
                            </li>
                        }
                    }) }
                </ul>
            </section>

            <section>
                <h2 class="text-xl font-semibold mb-2">{ "Bindings" }</h2>
                <form class="flex gap-2 mb-3" onsubmit={on_create_binding}>
                    <select class={input_class} ref={bind_source_ref}>
                        { for sources.iter().map(|s| html! {
                            <option key={s.id.value()} value={s.id.to_string()}>{ s.value.clone() }</option>
                        }) }
                    </select>
                    <select class={input_class} ref={bind_channel_ref}>
                        { for channels.iter().map(|c| html! {
                            <option key={c.id.value()} value={c.id.to_string()}>{ c.name.clone() }</option>
                        }) }
                    </select>
                    <button type="submit" class="bg-blue-600 text-white px-4 py-2 rounded">{ "Bind" }</button>
                </form>
                <ul class="space-y-1">
                    { for bindings.iter().map(|binding| {
                        let id = binding.id;
                        let delete = on_delete_binding.clone();
                        html! {
                            <li key={id.value()} class="flex items-center gap-3">
                                <span class="flex-1">
                                    { format!("{} → {}", source_name(binding.source_id), channel_name(binding.channel_id)) }
                                </span>
                                <button class={row_button} onclick={Callback::from(move |_| delete.emit(id))}>{ "Unbind" }</button>
                            </li>
                        }
                    }) }
                </ul>
            </section>
        </div>
    }
}
