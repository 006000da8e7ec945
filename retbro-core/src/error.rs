use thiserror::Error;

/// Errors that can occur while turning a catalog descriptor into a [`Catalog`].
///
/// [`Catalog`]: crate::Catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The descriptor text is not valid JSON
    #[error("Catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an object of systems
    #[error("Catalog must be a JSON object mapping system names to ROM lists")]
    NotAnObject,

    /// The descriptor parsed but contains no systems
    #[error("No ROMs found in the file.")]
    EmptyCatalog,

    /// A system value is neither a URL list nor a `{ sys_image, roms }` record
    #[error("Invalid entry for system '{system}': {reason}")]
    InvalidEntry { system: String, reason: String },
}

impl CatalogError {
    pub fn invalid_entry(system: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            system: system.into(),
            reason: reason.into(),
        }
    }
}
