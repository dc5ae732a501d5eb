use crate::api::{ApiClient, ApiResult};
use crate::data::{ContentItem, ContentQuery, Page};
use crate::id::ContentId;

const CONTENTS: &str = "/api/contents";

pub async fn list_contents<C: ApiClient>(client: &C, query: &ContentQuery) -> ApiResult<Page<ContentItem>> {
    client.get(CONTENTS, query).await
}

/// Run (or re-run) the AI analysis of one item; resolves to the refreshed item.
pub async fn analyze_content<C: ApiClient>(client: &C, id: ContentId) -> ApiResult<ContentItem> {
    client.post(&format!("{CONTENTS}/{id}/analyze"), &()).await
}
