use serde::{Deserialize, Serialize};

/// One public catalog ("Explore") entry.
///
/// The catalog store is the system of record for these documents; everything
/// the cache layer holds is a derived snapshot. `media_url` is never stored
/// authoritatively: it is resolved from `media_key` on the read path and
/// travels inside cached snapshots with its own, shorter-lived credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable slug primary key, derived from the title at creation.
    pub id: String,
    /// Legacy alternate identifier; lookups fall back to it when `id` misses.
    #[serde(rename = "realId", default, skip_serializing_if = "Option::is_none")]
    pub real_id: Option<String>,
    pub title: String,
    pub description: String,
    /// Participates in case-insensitive prefix filtering.
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genesis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Object storage key for the item's media; `None` means no media and no
    /// URL resolution is attempted.
    #[serde(rename = "mediaKey", default, skip_serializing_if = "Option::is_none")]
    pub media_key: Option<String>,
    /// Presigned retrieval URL, present only on read responses and cached
    /// snapshots.
    #[serde(rename = "mediaUrl", default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// Moderation flag, defaults false at creation.
    #[serde(default)]
    pub accepted: bool,
}

impl CatalogItem {
    /// Minimal item as produced by the create endpoint; supplemental fields
    /// arrive through seeding or later edits.
    pub fn new(
        id: String,
        title: String,
        description: String,
        category: String,
        kind: Option<String>,
        tags: Vec<String>,
        media_key: Option<String>,
    ) -> Self {
        Self {
            id,
            real_id: None,
            title,
            description,
            category,
            tags,
            kind,
            summary: None,
            bio: None,
            genesis: None,
            development: None,
            legacy: None,
            content: None,
            external_url: None,
            logo_url: None,
            media_key,
            media_url: None,
            accepted: false,
        }
    }
}

/// Fields accepted by the multipart create endpoint.
#[derive(Debug, Clone, Default)]
pub struct NewCatalogItem {
    pub title: String,
    pub description: String,
    pub category: String,
    pub kind: Option<String>,
    /// Raw comma-separated tag string as submitted.
    pub tags: Option<String>,
    pub media: Option<MediaUpload>,
}

#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemResponse {
    pub ok: bool,
    pub id: String,
    #[serde(rename = "mediaKey", skip_serializing_if = "Option::is_none")]
    pub media_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteItemResponse {
    pub ok: bool,
    pub title: String,
    pub deleted_count: u64,
}
