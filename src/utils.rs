//! Utility functions for the Explore Catalog application

/// Derive the stable slug id for a catalog item from its title.
///
/// Lowercased, whitespace-separated words joined with `-`. Creation upserts
/// by this id, so the same title always maps to the same document.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse a comma-separated tag string into an order-preserving list.
///
/// Blank segments are dropped; duplicates are kept as entered.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
