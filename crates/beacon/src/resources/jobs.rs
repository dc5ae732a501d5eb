use crate::api::{ApiClient, ApiResult};
use crate::data::{JobAccepted, JobStatus};
use crate::id::JobId;

const RUN_NOW: &str = "/api/jobs/run-now";

/// Kick off a crawl-analyze-push run in the background.
pub async fn run_now_job<C: ApiClient>(client: &C) -> ApiResult<JobAccepted> {
    client.post(RUN_NOW, &()).await
}

pub async fn fetch_run_now_status<C: ApiClient>(client: &C, id: &JobId) -> ApiResult<JobStatus> {
    client.get(&format!("{RUN_NOW}/{id}"), &()).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::api::HttpMethod;
    use crate::data::JobState;
    use crate::testing::{self, MockTransport};

    #[test]
    fn run_then_poll() {
        let mock = MockTransport::new();
        mock.push_envelope(json!({"job_id": "0f3a", "status": "accepted"}));
        mock.push_envelope(json!({"job_id": "0f3a", "status": "running", "updated_at": 1.0}));
        let client = testing::client(&mock);

        let accepted = block_on(run_now_job(&client)).unwrap();
        assert_eq!(accepted.status, JobState::Accepted);
        let status = block_on(fetch_run_now_status(&client, &accepted.job_id)).unwrap();
        assert_eq!(status.status, JobState::Running);

        let requests = mock.requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, "/api/jobs/run-now");
        assert_eq!(requests[0].body, None);
        assert_eq!(requests[1].method, HttpMethod::Get);
        assert_eq!(requests[1].url, "/api/jobs/run-now/0f3a");
    }
}
