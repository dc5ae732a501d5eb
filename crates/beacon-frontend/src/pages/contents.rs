use beacon::async_callback;
use beacon::data::{ContentItem, ContentQuery, Page};
use beacon::id::ContentId;
use beacon::resources::{analyze_content, list_contents};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::Pager;
use crate::hooks::use_refresh;
use crate::providers::{Notification, use_api, use_notifications};

const PAGE_SIZE: u32 = 20;

#[function_component(ContentsPage)]
pub fn contents_page() -> Html {
    let api = use_api();
    let notifications = use_notifications();
    let (generation, refresh) = use_refresh();
    let draft = use_state(String::new);
    let query = use_state(|| ContentQuery {
        page: Some(1),
        page_size: Some(PAGE_SIZE),
        ..Default::default()
    });
    let contents = use_state(|| None::<Page<ContentItem>>);

    {
        let api = api.clone();
        let notifications = notifications.clone();
        let contents = contents.clone();
        use_effect_with(((*query).clone(), generation), move |(query, _)| {
            let query = query.clone();
            spawn_local(async move {
                match list_contents(&*api, &query).await {
                    Ok(page) => contents.set(Some(page)),
                    Err(err) => notifications.report(&err),
                }
            });
        });
    }

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            draft.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_search = {
        let draft = draft.clone();
        let query = query.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let keyword = draft.trim().to_string();
            query.set(ContentQuery {
                page: Some(1),
                keyword: (!keyword.is_empty()).then_some(keyword),
                ..(*query).clone()
            });
        })
    };

    let on_page = {
        let query = query.clone();
        Callback::from(move |page: u32| {
            query.set(ContentQuery {
                page: Some(page),
                ..(*query).clone()
            });
        })
    };

    let on_analyze = async_callback!([api, notifications, refresh] |id: ContentId| {
        match analyze_content(&*api, id).await {
            Ok(item) => {
                let status = item.ai.map(|ai| ai.status).unwrap_or_default();
                notifications.push(Notification::success(format!("Analysis {status}")));
                refresh.emit(());
            }
            Err(err) => notifications.report(&err),
        }
    });

    html! {
        <div>
            <h1 class="text-2xl font-bold mb-4">{ "Contents" }</h1>

            <form class="flex gap-2 mb-4" onsubmit={on_search}>
                <input
                    type="text"
                    class="flex-1 px-3 py-2 border border-gray-300 rounded"
                    placeholder="Search title, text, author or summary..."
                    value={(*draft).clone()}
                    oninput={on_input}
                />
                <button type="submit" class="bg-blue-600 text-white px-4 py-2 rounded">{ "Search" }</button>
            </form>

            {
                match (*contents).as_ref() {
                    None => html! { <p>{ "Loading..." }</p> },
                    Some(page) => html! {
                        <>
                            <ul class="space-y-3">
                                { for page.items.iter().map(|item| content_row(item, &on_analyze)) }
                            </ul>
                            <Pager meta={page.meta} on_page={on_page.clone()} />
                        </>
                    },
                }
            }
        </div>
    }
}

fn content_row(item: &ContentItem, on_analyze: &Callback<ContentId>) -> Html {
    let id = item.id;
    let onclick = {
        let on_analyze = on_analyze.clone();
        Callback::from(move |_| on_analyze.emit(id))
    };
    let title = item
        .title
        .clone()
        .unwrap_or_else(|| item.content_text.chars().take(80).collect());

    html! {
        <li key={id.value()} class="p-4 border border-gray-200 rounded">
            <div class="flex justify-between">
                <a href={item.url.clone()} target="_blank" class="font-medium text-blue-700">{ title }</a>
                <span class="text-sm text-gray-500">{ format!("@{} · hotness {}", item.author_name, item.hotness) }</span>
            </div>
            {
                match &item.ai {
                    Some(ai) => html! {
                        <p class="mt-2 text-sm">{ format!("[{}] score {} · {}", ai.status, ai.ai_score, ai.summary) }</p>
                    },
                    None => html! { <p class="mt-2 text-sm text-gray-500">{ "Not analyzed yet" }</p> },
                }
            }
            <button class="mt-2 text-sm text-blue-600 cursor-pointer" {onclick}>{ "Analyze" }</button>
        </li>
    }
}
