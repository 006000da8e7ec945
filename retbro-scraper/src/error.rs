/// Errors that can occur while querying a metadata provider.
///
/// None of these reach the user: the resolver turns every one of them into
/// the fallback record.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by ScreenScraper API")]
    RateLimit,

    #[error("Daily quota exceeded")]
    QuotaExceeded,

    #[error("Game not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("ScreenScraper server is closed: {0}")]
    ServerClosed(String),

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Unrecognized response shape: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Metadata provider is offline")]
    Offline,
}

impl ScrapeError {
    pub fn not_found(lookup: impl Into<String>) -> Self {
        Self::NotFound(lookup.into())
    }

    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
