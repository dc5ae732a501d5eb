use beacon::async_callback;
use beacon::data::{ChannelQuery, ContentQuery, JobState, JobStatus, LogQuery, SourceQuery};
use beacon::resources::{
    fetch_run_now_status, list_channels, list_contents, list_logs, list_sources, ready,
    run_now_job,
};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::providers::{Notification, use_api, use_notifications};

const POLL_INTERVAL_MS: u32 = 2000;

#[derive(Clone, Default, PartialEq)]
struct Totals {
    sources: Option<u64>,
    channels: Option<u64>,
    contents: Option<u64>,
    logs: Option<u64>,
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let api = use_api();
    let notifications = use_notifications();
    let backend = use_state(|| None::<String>);
    let totals = use_state(Totals::default);
    let job = use_state(|| None::<JobStatus>);

    {
        let api = api.clone();
        let backend = backend.clone();
        let totals = totals.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let status = ready(&*api)
                    .await
                    .map(|s| s.status)
                    .unwrap_or_else(|_| "unavailable".to_string());
                backend.set(Some(status));

                // A one-row page is enough to read the total.
                let one = Some(1);
                totals.set(Totals {
                    sources: list_sources(&*api, &SourceQuery { page_size: one, ..Default::default() })
                        .await
                        .ok()
                        .map(|p| p.meta.total),
                    channels: list_channels(&*api, &ChannelQuery { page_size: one, ..Default::default() })
                        .await
                        .ok()
                        .map(|p| p.meta.total),
                    contents: list_contents(&*api, &ContentQuery { page_size: one, ..Default::default() })
                        .await
                        .ok()
                        .map(|p| p.meta.total),
                    logs: list_logs(&*api, &LogQuery { page_size: one, ..Default::default() })
                        .await
                        .ok()
                        .map(|p| p.meta.total),
                });
            });
        });
    }

    let run_now = async_callback!([api, notifications, job] {
        let accepted = match run_now_job(&*api).await {
            Ok(accepted) => accepted,
            Err(err) => {
                notifications.report(&err);
                return;
            }
        };
        notifications.push(Notification::info("Run started"));

        let mut status = JobStatus {
            job_id: accepted.job_id.clone(),
            status: accepted.status,
            result: None,
            error: None,
            updated_at: None,
        };
        job.set(Some(status.clone()));

        while !status.status.is_finished() {
            TimeoutFuture::new(POLL_INTERVAL_MS).await;
            match fetch_run_now_status(&*api, &accepted.job_id).await {
                Ok(next) => {
                    status = next;
                    job.set(Some(status.clone()));
                }
                Err(err) => {
                    notifications.report(&err);
                    return;
                }
            }
        }

        match status.status {
            JobState::Done => notifications.push(Notification::success("Run finished")),
            JobState::Failed => notifications.push(Notification::error(
                status.error.clone().unwrap_or_else(|| "Run failed".to_string()),
            )),
            _ => notifications.push(Notification::error("Run status was lost")),
        }
    });

    let running = (*job).as_ref().is_some_and(|job| !job.status.is_finished());
    let stat = |label: &str, value: Option<u64>| {
        html! {
            <div class="p-4 border border-gray-200 rounded">
                <div class="text-sm text-gray-500">{ label.to_string() }</div>
                <div class="text-2xl font-bold">{ value.map_or_else(|| "-".to_string(), |v| v.to_string()) }</div>
            </div>
        }
    };

    html! {
        <div>
            <h1 class="text-2xl font-bold mb-4">{ "Dashboard" }</h1>
            <p class="mb-4">
                <span class="font-medium">{ "Backend: " }</span>
                { (*backend).as_deref().unwrap_or("checking...") }
            </p>

            <div class="grid grid-cols-4 gap-4 mb-8">
                { stat("Sources", totals.sources) }
                { stat("Channels", totals.channels) }
                { stat("Contents", totals.contents) }
                { stat("Pushes", totals.logs) }
            </div>

            <button
                class="bg-blue-600 text-white px-4 py-2 rounded hover:bg-blue-700 disabled:opacity-50 cursor-pointer"
                onclick={run_now}
                disabled={running}
            >
                { if running { "Running..." } else { "Run now" } }
            </button>

            {
                if let Some(job) = (*job).as_ref() {
                    html! {
                        <div class="mt-4 p-4 bg-gray-50 rounded text-sm">
                            <p>{ format!("Job {}: {:?}", job.job_id, job.status) }</p>
                            if let Some(result) = job.result {
                                <p>{ format!(
                                    "{} sources, {} succeeded, {} failed",
                                    result.total_sources, result.success_count, result.failed_count
                                ) }</p>
                            }
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
