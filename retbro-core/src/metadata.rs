use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Value used for any descriptive field the provider did not supply.
pub const UNKNOWN: &str = "Unknown";

/// Description used when a provider record has no synopsis.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Description used by the fallback record.
pub const NO_INFO: &str = "No info found.";

/// Maximum number of screenshots kept per record.
pub const MAX_SCREENSHOTS: usize = 8;

/// Default placeholder image service (portrait box-art proportions).
pub const DEFAULT_PLACEHOLDER_BASE: &str = "https://picsum.photos/300/420";

/// Normalized descriptive data for one title.
///
/// Every field always holds a usable value; absent provider data is
/// replaced with [`UNKNOWN`] or an empty collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub name: String,
    pub description: String,
    pub cover_image_url: String,
    pub screenshots: Vec<String>,
    pub system: String,
    pub genres: BTreeSet<String>,
    pub developer: String,
    pub publisher: String,
    pub players: String,
    pub year: String,
}

impl MetadataRecord {
    /// Record served when the provider fails or has no match.
    ///
    /// Deterministic for a given name and cover URL.
    pub fn fallback(display_name: impl Into<String>, cover_image_url: impl Into<String>) -> Self {
        Self {
            name: display_name.into(),
            description: NO_INFO.to_string(),
            cover_image_url: cover_image_url.into(),
            screenshots: Vec::new(),
            system: UNKNOWN.to_string(),
            genres: BTreeSet::new(),
            developer: UNKNOWN.to_string(),
            publisher: UNKNOWN.to_string(),
            players: UNKNOWN.to_string(),
            year: UNKNOWN.to_string(),
        }
    }

    /// Genres joined for display, or [`UNKNOWN`] when there are none.
    pub fn genres_label(&self) -> String {
        if self.genres.is_empty() {
            UNKNOWN.to_string()
        } else {
            self.genres.iter().cloned().collect::<Vec<_>>().join(", ")
        }
    }
}

/// Replace an empty or whitespace-only value with [`UNKNOWN`].
pub fn or_unknown(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Synthesizes stable cover images for titles without provider artwork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderImages {
    base: String,
}

impl Default for PlaceholderImages {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_BASE)
    }
}

impl PlaceholderImages {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Placeholder URL seeded by the lookup key, so the same title always
    /// gets the same image and different titles usually differ.
    pub fn cover_for(&self, lookup_key: &str) -> String {
        format!("{}?random={}", self.base, urlencoding::encode(lookup_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_fields_are_unknown() {
        let record = MetadataRecord::fallback("Foo (USA)", "https://img/foo");
        assert_eq!(record.name, "Foo (USA)");
        assert_eq!(record.description, NO_INFO);
        assert_eq!(record.system, UNKNOWN);
        assert_eq!(record.developer, UNKNOWN);
        assert_eq!(record.publisher, UNKNOWN);
        assert_eq!(record.players, UNKNOWN);
        assert_eq!(record.year, UNKNOWN);
        assert!(record.genres.is_empty());
        assert!(record.screenshots.is_empty());
        assert_eq!(record.genres_label(), UNKNOWN);
    }

    #[test]
    fn placeholder_contains_encoded_lookup() {
        let images = PlaceholderImages::default();
        let url = images.cover_for("Mega Man");
        assert_eq!(url, "https://picsum.photos/300/420?random=Mega%20Man");
        assert_eq!(url, images.cover_for("Mega Man"));
        assert_ne!(url, images.cover_for("Contra"));
    }

    #[test]
    fn or_unknown_handles_blank_values() {
        assert_eq!(or_unknown(None), UNKNOWN);
        assert_eq!(or_unknown(Some("  ".to_string())), UNKNOWN);
        assert_eq!(or_unknown(Some(" Capcom ".to_string())), "Capcom");
    }

    #[test]
    fn genres_label_is_sorted() {
        let mut record = MetadataRecord::fallback("x", "y");
        record.genres.insert("Platform".to_string());
        record.genres.insert("Action".to_string());
        assert_eq!(record.genres_label(), "Action, Platform");
    }
}
