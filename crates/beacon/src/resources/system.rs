//! Liveness and readiness probes, served outside `/api`.

use crate::api::{ApiClient, ApiResult};
use crate::data::SystemStatus;

pub async fn health<C: ApiClient>(client: &C) -> ApiResult<SystemStatus> {
    client.get("/health", &()).await
}

/// Succeeds only once the backend can reach its database.
pub async fn ready<C: ApiClient>(client: &C) -> ApiResult<SystemStatus> {
    client.get("/ready", &()).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::testing::{self, MockTransport};

    #[test]
    fn probes_unwrap_status() {
        let mock = MockTransport::new();
        mock.push_envelope(json!({"status": "ok"}));
        mock.push_envelope(json!({"status": "ready"}));
        let client = testing::client(&mock);

        assert_eq!(block_on(health(&client)).unwrap().status, "ok");
        assert_eq!(block_on(ready(&client)).unwrap().status, "ready");

        let urls: Vec<_> = mock.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec!["/health", "/ready"]);
    }
}
