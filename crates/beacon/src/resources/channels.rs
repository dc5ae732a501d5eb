use crate::api::{ApiClient, ApiResult};
use crate::data::{Channel, ChannelPatch, ChannelQuery, Deletion, NewChannel, Page};
use crate::id::ChannelId;

const CHANNELS: &str = "/api/channels";

pub async fn list_channels<C: ApiClient>(client: &C, query: &ChannelQuery) -> ApiResult<Page<Channel>> {
    client.get(CHANNELS, query).await
}

pub async fn create_channel<C: ApiClient>(client: &C, payload: &NewChannel) -> ApiResult<Channel> {
    client.post(CHANNELS, payload).await
}

pub async fn update_channel<C: ApiClient>(
    client: &C,
    id: ChannelId,
    payload: &ChannelPatch,
) -> ApiResult<Channel> {
    client.put(&format!("{CHANNELS}/{id}"), payload).await
}

pub async fn delete_channel<C: ApiClient>(client: &C, id: ChannelId) -> ApiResult<Deletion> {
    client.delete(&format!("{CHANNELS}/{id}")).await
}
