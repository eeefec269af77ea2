//! Cache key namespaces
//!
//! These exact key shapes are an interoperability contract: operators run
//! manual cache maintenance against them, so they must not drift.

/// Unfiltered "all items" list.
pub const LIST_KEY: &str = "catalog:list";

/// Prefix shared by every key this service owns; used by the targeted flush.
pub const CATALOG_PREFIX: &str = "catalog:";

/// Per-category list, keyed by the normalized category.
pub fn category_list_key(normalized_category: &str) -> String {
    format!("{}:category:{}", LIST_KEY, normalized_category)
}

/// Single item snapshot, keyed by the id the caller asked for.
pub fn item_key(item_id: &str) -> String {
    format!("catalog:item:{}", item_id)
}

/// Presigned URL for one media key.
pub fn signed_url_key(media_key: &str) -> String {
    format!("catalog:signedurl:{}", media_key)
}

/// Normalize a raw category filter: trim, strip trailing commas, lowercase.
///
/// Applied identically when deriving list cache keys, when querying the
/// catalog store, and when invalidating, so the three always agree on which
/// key a category maps to.
pub fn normalize_category(raw: &str) -> String {
    raw.trim().trim_end_matches(',').to_lowercase()
}
