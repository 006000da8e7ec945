use retbro_core::CatalogError;

/// Errors that can occur while loading a catalog descriptor.
///
/// A failed load never touches the session: the previous catalog stays in
/// place and the message is shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog request failed with HTTP {0}")]
    Status(u16),

    #[error("Unsupported catalog file {0:?} (expected .json or .retbrorl)")]
    UnsupportedExtension(String),

    #[error("Invalid catalog source: {0}")]
    InvalidSource(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl LoadError {
    pub fn invalid_source(msg: impl Into<String>) -> Self {
        Self::InvalidSource(msg.into())
    }
}
