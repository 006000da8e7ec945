use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::credentials::Credentials;
use crate::error::ScrapeError;
use crate::provider::MetadataProvider;
use crate::types::ProviderPayload;

const BASE_URL: &str = "https://api.screenscraper.fr/api2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1200);

/// Connection tuning for [`ScreenScraperClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub min_request_interval: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            min_request_interval: MIN_REQUEST_INTERVAL,
        }
    }
}

/// HTTP client for the ScreenScraper API with rate limiting.
pub struct ScreenScraperClient {
    http: reqwest::Client,
    creds: Credentials,
    min_interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl ScreenScraperClient {
    pub fn new(creds: Credentials, options: ClientOptions) -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()?;

        Ok(Self {
            http,
            creds,
            min_interval: options.min_request_interval,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Look up games by ROM name via jeuInfos.php.
    pub async fn lookup_by_name(&self, rom_name: &str) -> Result<String, ScrapeError> {
        let mut params = self.base_params();
        params.insert("output", "json".to_string());
        params.insert("romnom", rom_name.to_string());

        self.rate_limit().await;
        log::debug!("jeuInfos.php romnom={:?}", rom_name);

        let resp = self
            .http
            .get(format!("{}/jeuInfos.php", BASE_URL))
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        check_response(status, &text, rom_name)?;
        Ok(text)
    }

    /// Enforce rate limiting: wait until at least the minimum interval has
    /// passed since the last API request.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn base_params(&self) -> HashMap<&'static str, String> {
        let mut params = HashMap::new();
        params.insert("devid", self.creds.dev_id.clone());
        params.insert("devpassword", self.creds.dev_password.clone());
        params.insert("softname", self.creds.soft_name.clone());
        if let Some(ref id) = self.creds.user_id {
            params.insert("ssid", id.clone());
        }
        if let Some(ref pw) = self.creds.user_password {
            params.insert("sspassword", pw.clone());
        }
        params
    }
}

/// Classify a raw jeuInfos.php reply. ScreenScraper answers many failures
/// with HTTP 200 and a plain-text message.
pub fn check_response(
    status: reqwest::StatusCode,
    text: &str,
    rom_name: &str,
) -> Result<(), ScrapeError> {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ScrapeError::InvalidCredentials(
            "Credentials rejected".to_string(),
        ));
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ScrapeError::RateLimit);
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ScrapeError::not_found(rom_name));
    }
    if !status.is_success() {
        return Err(ScrapeError::ServerError {
            status: status.as_u16(),
            message: text.chars().take(200).collect(),
        });
    }

    if text.trim().is_empty() || text.contains("Erreur") || text.contains("Jeu non trouvé") {
        return Err(ScrapeError::not_found(rom_name));
    }
    if text.contains("API fermé") || text.contains("API closed") {
        return Err(ScrapeError::ServerClosed(
            "ScreenScraper API is temporarily closed".to_string(),
        ));
    }
    if text.contains("Le quota de scrape journalier") {
        return Err(ScrapeError::QuotaExceeded);
    }
    Ok(())
}

impl MetadataProvider for ScreenScraperClient {
    fn name(&self) -> &str {
        "screenscraper"
    }

    async fn query(&self, lookup_key: &str) -> Result<ProviderPayload, ScrapeError> {
        let text = self.lookup_by_name(lookup_key).await?;
        ProviderPayload::decode(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn plain_text_errors_are_classified() {
        assert!(matches!(
            check_response(StatusCode::OK, "Erreur : Rom/Iso/Dossier non trouvée !", "x"),
            Err(ScrapeError::NotFound(_))
        ));
        assert!(matches!(
            check_response(StatusCode::OK, "", "x"),
            Err(ScrapeError::NotFound(_))
        ));
        assert!(matches!(
            check_response(StatusCode::OK, "API closed for maintenance", "x"),
            Err(ScrapeError::ServerClosed(_))
        ));
        assert!(matches!(
            check_response(StatusCode::OK, "Le quota de scrape journalier est dépassé", "x"),
            Err(ScrapeError::QuotaExceeded)
        ));
    }

    #[test]
    fn http_status_is_classified() {
        assert!(matches!(
            check_response(StatusCode::FORBIDDEN, "", "x"),
            Err(ScrapeError::InvalidCredentials(_))
        ));
        assert!(matches!(
            check_response(StatusCode::TOO_MANY_REQUESTS, "", "x"),
            Err(ScrapeError::RateLimit)
        ));
        assert!(matches!(
            check_response(StatusCode::BAD_GATEWAY, "oops", "x"),
            Err(ScrapeError::ServerError { status: 502, .. })
        ));
    }

    #[test]
    fn json_body_passes() {
        assert!(check_response(StatusCode::OK, r#"{"response": {}}"#, "x").is_ok());
    }

    #[test]
    fn base_params_include_optional_user() {
        let mut creds = Credentials::default();
        let client = ScreenScraperClient::new(creds.clone(), ClientOptions::default()).unwrap();
        assert!(!client.base_params().contains_key("ssid"));

        creds.user_id = Some("me".into());
        let client = ScreenScraperClient::new(creds, ClientOptions::default()).unwrap();
        let params = client.base_params();
        assert_eq!(params.get("ssid").map(String::as_str), Some("me"));
        assert_eq!(params.get("devid").map(String::as_str), Some("demo"));
    }
}
