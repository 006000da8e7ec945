use std::sync::Arc;

use retbro_core::{MetadataRecord, PlaceholderImages, lookup_key};

use crate::cache::MetadataCache;
use crate::error::ScrapeError;
use crate::lookup::select_match;
use crate::normalize::to_record;
use crate::provider::MetadataProvider;

/// Resolves display names to metadata through a provider and a
/// session-scoped cache. Never fails: errors become the fallback record.
pub struct MetadataResolver<P> {
    provider: P,
    cache: MetadataCache,
    placeholders: PlaceholderImages,
}

impl<P: MetadataProvider> MetadataResolver<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cache: MetadataCache::new(),
            placeholders: PlaceholderImages::default(),
        }
    }

    pub fn with_placeholders(mut self, placeholders: PlaceholderImages) -> Self {
        self.placeholders = placeholders;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Cached record for a display name, without querying.
    pub fn cached(&self, display_name: &str) -> Option<Arc<MetadataRecord>> {
        self.cache.get(display_name)
    }

    pub fn clear_cache(&self) {
        log::debug!("Clearing {} cached metadata record(s)", self.cache.len());
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Metadata for a title, from cache when present.
    ///
    /// A miss queries the provider with the title's lookup key. Whatever
    /// comes back, including the fallback, is cached under the display name.
    pub async fn get_metadata(&self, display_name: &str) -> Arc<MetadataRecord> {
        if let Some(hit) = self.cache.get(display_name) {
            log::debug!("Metadata cache hit for {:?}", display_name);
            return hit;
        }

        let key = lookup_key(display_name);
        log::debug!(
            "Metadata cache miss for {:?}, querying {} with {:?}",
            display_name,
            self.provider.name(),
            key
        );
        let record = match self.lookup(display_name, &key).await {
            Ok(record) => record,
            Err(e) => {
                log::warn!(
                    "No metadata for {:?} from {}: {}",
                    display_name,
                    self.provider.name(),
                    e
                );
                self.fallback(display_name)
            }
        };
        self.cache.insert(display_name, Arc::new(record))
    }

    /// The record served when lookup fails for a display name.
    pub fn fallback(&self, display_name: &str) -> MetadataRecord {
        let cover = self.placeholders.cover_for(&lookup_key(display_name));
        MetadataRecord::fallback(display_name, cover)
    }

    async fn lookup(&self, display_name: &str, key: &str) -> Result<MetadataRecord, ScrapeError> {
        let payload = self.provider.query(key).await?;
        let found =
            select_match(payload.into_candidates(), key).ok_or_else(|| ScrapeError::not_found(key))?;
        log::debug!("Matched {:?} ({} match)", key, found.tier);
        Ok(to_record(&found.game, display_name, key, &self.placeholders))
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
