use crate::api::{ApiClient, ApiResult};
use crate::data::{Binding, BindingQuery, Deletion, NewBinding, Page};
use crate::id::BindingId;

const BINDINGS: &str = "/api/source-channel-bindings";

pub async fn list_source_channel_bindings<C: ApiClient>(
    client: &C,
    query: &BindingQuery,
) -> ApiResult<Page<Binding>> {
    client.get(BINDINGS, query).await
}

pub async fn create_source_channel_binding<C: ApiClient>(
    client: &C,
    payload: &NewBinding,
) -> ApiResult<Binding> {
    client.post(BINDINGS, payload).await
}

pub async fn delete_source_channel_binding<C: ApiClient>(
    client: &C,
    id: BindingId,
) -> ApiResult<Deletion> {
    client.delete(&format!("{BINDINGS}/{id}")).await
}
