//! Data structures exchanged with the backend.
//!
//! These mirror the backend's response schemas one to one. Timestamps are
//! kept as the ISO-8601 strings the backend sends.

use serde::{Deserialize, Serialize};

use crate::id::{BindingId, ChannelId, ContentId, JobId, LogId, SourceId};

/// One page of a list endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

/// Result of a delete call. Deleting something already gone is not an error;
/// the backend answers `deleted: false` with a reason instead.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    pub deleted: bool,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub reason: Option<String>,
}

// ---- channels ----

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChannelPlatform {
    Wechat,
    Dingtalk,
    Feishu,
}

impl ChannelPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelPlatform::Wechat => "wechat",
            ChannelPlatform::Dingtalk => "dingtalk",
            ChannelPlatform::Feishu => "feishu",
        }
    }
}

/// A webhook that receives pushed digests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: ChannelId,
    pub platform: ChannelPlatform,
    pub webhook_url: String,
    pub name: String,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewChannel {
    pub platform: ChannelPlatform,
    pub webhook_url: String,
    pub name: String,
    pub is_active: bool,
}

/// Partial update; unset fields are left untouched by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ChannelPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<ChannelPlatform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ChannelQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<ChannelPlatform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ---- sources ----

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Author,
    Keyword,
}

/// Something the crawler watches: an author timeline or a keyword search.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Source {
    pub id: SourceId,
    #[serde(rename = "type")]
    pub kind: SourceType,
    pub value: String,
    pub is_active: bool,
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewSource {
    #[serde(rename = "type")]
    pub kind: SourceType,
    pub value: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SourcePatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct SourceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ---- contents ----

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContentAnalysis {
    pub status: String,
    pub ai_score: i64,
    pub summary: String,
    pub model: String,
    pub updated_at: String,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

/// A crawled post together with its cached AI analysis, if any.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub id: ContentId,
    pub platform: String,
    pub source_type: String,
    pub external_id: String,
    pub author_name: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    pub content_text: String,
    pub hotness: i64,
    #[serde(default)]
    pub published_at: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub ai: Option<ContentAnalysis>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ContentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_status: Option<String>,
}

// ---- push logs ----

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PushStatus {
    Success,
    Failed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PushLog {
    pub id: LogId,
    pub source_id: SourceId,
    pub status: PushStatus,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PushLogDetail {
    pub id: LogId,
    pub source_id: SourceId,
    pub status: PushStatus,
    pub created_at: String,
    #[serde(default)]
    pub raw_content: Option<String>,
    #[serde(default)]
    pub ai_summary: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct LogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PushStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<SourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

// ---- source/channel bindings ----

/// Routes pushes for one source to one channel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Binding {
    pub id: BindingId,
    pub source_id: SourceId,
    pub channel_id: ChannelId,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBinding {
    pub source_id: SourceId,
    pub channel_id: ChannelId,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct BindingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<SourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
}

// ---- jobs ----

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Accepted,
    Running,
    Done,
    Failed,
    NotFound,
}

impl JobState {
    /// Whether polling should stop.
    pub fn is_finished(&self) -> bool {
        matches!(self, JobState::Done | JobState::Failed | JobState::NotFound)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobAccepted {
    pub job_id: JobId,
    pub status: JobState,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobResult {
    pub total_sources: u32,
    pub success_count: u32,
    pub failed_count: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JobStatus {
    pub job_id: JobId,
    pub status: JobState,
    #[serde(default)]
    pub result: Option<JobResult>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub updated_at: Option<f64>,
}

// ---- system ----

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SystemStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn source_uses_type_on_the_wire() {
        let source: Source = serde_json::from_value(json!({
            "id": 3,
            "type": "keyword",
            "value": "rust",
            "is_active": true,
            "remark": null,
        }))
        .unwrap();
        assert_eq!(source.kind, SourceType::Keyword);
        assert_eq!(source.id.value(), 3);

        let patch = SourcePatch {
            kind: Some(SourceType::Author),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"type": "author"}));
    }

    #[test]
    fn content_item_tolerates_missing_analysis() {
        let item: ContentItem = serde_json::from_value(json!({
            "id": 10,
            "platform": "twitter",
            "source_type": "author_timeline",
            "external_id": "1790",
            "author_name": "rustlang",
            "url": "https://x.com/rustlang/status/1790",
            "content_text": "Rust 1.80 is out",
            "hotness": 88,
            "created_at": "2024-07-25T10:00:00+08:00",
        }))
        .unwrap();
        assert!(item.ai.is_none());
        assert!(item.title.is_none());
    }

    #[test]
    fn job_status_reads_finished_run() {
        let status: JobStatus = serde_json::from_value(json!({
            "job_id": "b1c2",
            "status": "done",
            "updated_at": 1721900000.5,
            "result": {"total_sources": 4, "success_count": 3, "failed_count": 1},
        }))
        .unwrap();
        assert!(status.status.is_finished());
        assert_eq!(status.result.map(|r| r.failed_count), Some(1));

        let missing: JobStatus =
            serde_json::from_value(json!({"job_id": "zz", "status": "not_found"})).unwrap();
        assert_eq!(missing.status, JobState::NotFound);
        assert!(!JobState::Running.is_finished());
    }
}
