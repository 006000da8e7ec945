use std::time::Duration;

use retbro_core::PlaceholderImages;
use retbro_scraper::{
    ClientOptions, Credentials, MetadataProvider, MetadataResolver, OfflineProvider,
    ProviderPayload, ScrapeError, ScreenScraperClient,
};

use crate::settings::{MetadataSettings, ProviderKind};

/// The metadata provider picked from settings.
pub enum Provider {
    ScreenScraper(ScreenScraperClient),
    Offline(OfflineProvider),
}

impl Provider {
    /// Build the configured provider. `force_offline` overrides the setting.
    pub fn from_settings(settings: &MetadataSettings, force_offline: bool) -> Result<Self, ScrapeError> {
        let kind = if force_offline {
            ProviderKind::Offline
        } else {
            settings.provider
        };
        match kind {
            ProviderKind::Offline => Ok(Self::Offline(OfflineProvider)),
            ProviderKind::ScreenScraper => {
                let creds = Credentials::load();
                if creds.is_demo() {
                    log::debug!("Using ScreenScraper demo credentials");
                }
                let options = ClientOptions {
                    timeout: Duration::from_secs(settings.timeout_secs),
                    min_request_interval: Duration::from_millis(settings.min_request_interval_ms),
                };
                Ok(Self::ScreenScraper(ScreenScraperClient::new(creds, options)?))
            }
        }
    }
}

impl MetadataProvider for Provider {
    fn name(&self) -> &str {
        match self {
            Self::ScreenScraper(client) => client.name(),
            Self::Offline(offline) => offline.name(),
        }
    }

    async fn query(&self, lookup_key: &str) -> Result<ProviderPayload, ScrapeError> {
        match self {
            Self::ScreenScraper(client) => client.query(lookup_key).await,
            Self::Offline(offline) => offline.query(lookup_key).await,
        }
    }
}

/// Resolver wired to the configured provider and placeholder service.
pub fn resolver_from_settings(
    settings: &MetadataSettings,
    force_offline: bool,
) -> Result<MetadataResolver<Provider>, ScrapeError> {
    let provider = Provider::from_settings(settings, force_offline)?;
    Ok(MetadataResolver::new(provider)
        .with_placeholders(PlaceholderImages::new(settings.placeholder_base.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_flag_overrides_setting() {
        let settings = MetadataSettings::default();
        let resolver = resolver_from_settings(&settings, true).unwrap();
        assert_eq!(resolver.provider().name(), "offline");

        let record = resolver.get_metadata("Contra (USA)").await;
        assert_eq!(record.name, "Contra (USA)");
        assert!(record.cover_image_url.starts_with(&settings.placeholder_base));
    }

    #[test]
    fn offline_setting_selects_offline() {
        let settings = MetadataSettings {
            provider: ProviderKind::Offline,
            ..Default::default()
        };
        let provider = Provider::from_settings(&settings, false).unwrap();
        assert!(matches!(provider, Provider::Offline(_)));
    }
}
