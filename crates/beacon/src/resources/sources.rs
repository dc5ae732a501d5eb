use crate::api::{ApiClient, ApiResult};
use crate::data::{Deletion, NewSource, Page, Source, SourcePatch, SourceQuery};
use crate::id::SourceId;

const SOURCES: &str = "/api/sources";

pub async fn list_sources<C: ApiClient>(client: &C, query: &SourceQuery) -> ApiResult<Page<Source>> {
    client.get(SOURCES, query).await
}

pub async fn create_source<C: ApiClient>(client: &C, payload: &NewSource) -> ApiResult<Source> {
    client.post(SOURCES, payload).await
}

pub async fn update_source<C: ApiClient>(
    client: &C,
    id: SourceId,
    payload: &SourcePatch,
) -> ApiResult<Source> {
    client.put(&format!("{SOURCES}/{id}"), payload).await
}

pub async fn delete_source<C: ApiClient>(client: &C, id: SourceId) -> ApiResult<Deletion> {
    client.delete(&format!("{SOURCES}/{id}")).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::api::HttpMethod;
    use crate::data::SourceType;
    use crate::testing::{self, MockTransport};

    #[test]
    fn delete_hits_exactly_one_path() {
        let mock = MockTransport::new();
        mock.push_envelope(json!({"deleted": true, "id": 42}));
        let client = testing::client(&mock);

        let deletion = block_on(delete_source(&client, SourceId::new(42))).unwrap();
        assert_eq!(deletion.id, Some(42));

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert_eq!(requests[0].url, "/api/sources/42");
        assert!(requests[0].query.is_empty());
        assert_eq!(requests[0].body, None);
    }

    #[test]
    fn already_deleted_is_reported_not_failed() {
        let mock = MockTransport::new();
        mock.push_envelope(json!({"deleted": false, "reason": "source_not_found"}));
        let client = testing::client(&mock);

        let deletion = block_on(delete_source(&client, SourceId::new(3))).unwrap();
        assert!(!deletion.deleted);
        assert_eq!(deletion.reason.as_deref(), Some("source_not_found"));
    }

    #[test]
    fn create_and_update_send_type_field() {
        let mock = MockTransport::new();
        let row = json!({"id": 8, "type": "author", "value": "rustlang", "is_active": true, "remark": null});
        mock.push_envelope(row.clone());
        mock.push_envelope(row);
        let client = testing::client(&mock);

        let payload = NewSource {
            kind: SourceType::Author,
            value: "rustlang".into(),
            is_active: true,
            remark: None,
        };
        let created = block_on(create_source(&client, &payload)).unwrap();
        block_on(update_source(
            &client,
            created.id,
            &SourcePatch {
                remark: Some("core team".into()),
                ..Default::default()
            },
        ))
        .unwrap();

        let requests = mock.requests();
        assert_eq!(
            requests[0].body,
            Some(json!({"type": "author", "value": "rustlang", "is_active": true}))
        );
        assert_eq!(requests[1].url, "/api/sources/8");
        assert_eq!(requests[1].body, Some(json!({"remark": "core team"})));
    }
}
