use thiserror::Error;

use retbro_lib::LoadError;
use retbro_scraper::ScrapeError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Catalog could not be read
    #[error("Catalog error: {0}")]
    Load(#[from] LoadError),

    /// Metadata provider could not be set up
    #[error("Metadata error: {0}")]
    Scrape(#[from] ScrapeError),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// System name not present in the catalog
    #[error("Unknown system: {0}")]
    UnknownSystem(String),

    /// Title name or index not present in the system
    #[error("Unknown title: {0}")]
    UnknownTitle(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn unknown_system(msg: impl Into<String>) -> Self {
        Self::UnknownSystem(msg.into())
    }

    pub(crate) fn unknown_title(msg: impl Into<String>) -> Self {
        Self::UnknownTitle(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
