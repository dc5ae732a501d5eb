use beacon::async_callback;
use beacon::data::{LogQuery, Page, PushLog, PushLogDetail, PushStatus};
use beacon::id::LogId;
use beacon::resources::{get_log_detail, list_logs};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::Pager;
use crate::providers::{use_api, use_notifications};

const PAGE_SIZE: u32 = 20;

fn parse_status(value: &str) -> Option<PushStatus> {
    match value {
        "success" => Some(PushStatus::Success),
        "failed" => Some(PushStatus::Failed),
        _ => None,
    }
}

fn status_label(status: PushStatus) -> &'static str {
    match status {
        PushStatus::Success => "success",
        PushStatus::Failed => "failed",
    }
}

#[function_component(HistoryPage)]
pub fn history_page() -> Html {
    let api = use_api();
    let notifications = use_notifications();
    let query = use_state(|| LogQuery {
        page: Some(1),
        page_size: Some(PAGE_SIZE),
        ..Default::default()
    });
    let logs = use_state(|| None::<Page<PushLog>>);
    let detail = use_state(|| None::<PushLogDetail>);

    {
        let api = api.clone();
        let notifications = notifications.clone();
        let logs = logs.clone();
        use_effect_with((*query).clone(), move |query| {
            let query = query.clone();
            spawn_local(async move {
                match list_logs(&*api, &query).await {
                    Ok(page) => logs.set(Some(page)),
                    Err(err) => notifications.report(&err),
                }
            });
        });
    }

    let on_status = {
        let query = query.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            query.set(LogQuery {
                page: Some(1),
                status: parse_status(&value),
                ..(*query).clone()
            });
        })
    };

    let on_page = {
        let query = query.clone();
        Callback::from(move |page: u32| {
            query.set(LogQuery {
                page: Some(page),
                ..(*query).clone()
            });
        })
    };

    let on_open = async_callback!([api, notifications, detail] |id: LogId| {
        match get_log_detail(&*api, id).await {
            Ok(log) => detail.set(Some(log)),
            Err(err) => notifications.report(&err),
        }
    });

    let on_close = {
        let detail = detail.clone();
        Callback::from(move |_| detail.set(None))
    };

    html! {
        <div>
            <h1 class="text-2xl font-bold mb-4">{ "Push history" }</h1>

            <select class="mb-4 px-3 py-2 border border-gray-300 rounded" onchange={on_status}>
                <option value="">{ "All statuses" }</option>
                <option value="success">{ "Success" }</option>
                <option value="failed">{ "Failed" }</option>
            </select>

            {
                match (*logs).as_ref() {
                    None => html! { <p>{ "Loading..." }</p> },
                    Some(page) => html! {
                        <>
                            <table class="w-full text-sm">
                                <thead>
                                    <tr class="text-left text-gray-500">
                                        <th>{ "ID" }</th>
                                        <th>{ "Source" }</th>
                                        <th>{ "Status" }</th>
                                        <th>{ "Time" }</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    { for page.items.iter().map(|log| {
                                        let id = log.id;
                                        let on_open = on_open.clone();
                                        html! {
                                            <tr key={id.value()} class="cursor-pointer hover:bg-gray-50" onclick={Callback::from(move |_| on_open.emit(id))}>
                                                <td>{ id.to_string() }</td>
                                                <td>{ log.source_id.to_string() }</td>
                                                <td>{ status_label(log.status) }</td>
                                                <td>{ log.created_at.clone() }</td>
                                            </tr>
                                        }
                                    }) }
                                </tbody>
                            </table>
                            <Pager meta={page.meta} on_page={on_page.clone()} />
                        </>
                    },
                }
            }

            if let Some(log) = (*detail).as_ref() {
                <div class="mt-6 p-4 border border-gray-200 rounded">
                    <div class="flex justify-between mb-2">
                        <h2 class="font-bold">{ format!("Push #{} ({})", log.id, status_label(log.status)) }</h2>
                        <button class="text-sm text-gray-500 cursor-pointer" onclick={on_close}>{ "Close" }</button>
                    </div>
                    <h3 class="text-sm font-medium">{ "AI summary" }</h3>
                    <p class="mb-2 whitespace-pre-wrap">{ log.ai_summary.clone().unwrap_or_default() }</p>
                    <h3 class="text-sm font-medium">{ "Raw content" }</h3>
                    <pre class="whitespace-pre-wrap text-xs bg-gray-50 p-2">{ log.raw_content.clone().unwrap_or_default() }</pre>
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_values() {
        assert_eq!(parse_status("success"), Some(PushStatus::Success));
        assert_eq!(parse_status("failed"), Some(PushStatus::Failed));
        assert_eq!(parse_status(""), None);
        assert_eq!(status_label(PushStatus::Failed), "failed");
    }
}
