use crate::api::{ApiClient, ApiResult};
use crate::data::{LogQuery, Page, PushLog, PushLogDetail};
use crate::id::LogId;

const LOGS: &str = "/api/logs";

pub async fn list_logs<C: ApiClient>(client: &C, query: &LogQuery) -> ApiResult<Page<PushLog>> {
    client.get(LOGS, query).await
}

pub async fn get_log_detail<C: ApiClient>(client: &C, id: LogId) -> ApiResult<PushLogDetail> {
    client.get(&format!("{LOGS}/{id}"), &()).await
}
