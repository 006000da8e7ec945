use crate::error::ScrapeError;
use crate::types::ProviderPayload;

/// A remote service that can be asked about a title.
///
/// Implementations return whatever shape the service speaks, decoded into a
/// [`ProviderPayload`]; matching and normalization happen in the resolver so
/// providers stay swappable.
#[allow(async_fn_in_trait)]
pub trait MetadataProvider {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Query the service for games matching a cleaned lookup key.
    async fn query(&self, lookup_key: &str) -> Result<ProviderPayload, ScrapeError>;
}

/// Provider used when network lookups are disabled. Every query fails, so
/// every title gets its fallback record.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineProvider;

impl MetadataProvider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    async fn query(&self, _lookup_key: &str) -> Result<ProviderPayload, ScrapeError> {
        Err(ScrapeError::Offline)
    }
}
