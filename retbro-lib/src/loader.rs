//! Catalog loading from a local file or a URL.
//!
//! Loaders only read and parse; installing the result into a session is the
//! caller's decision, so a failed load leaves the current catalog untouched.

use std::path::{Path, PathBuf};

use retbro_core::Catalog;

use crate::error::LoadError;

/// File extensions accepted for local catalog descriptors.
pub const CATALOG_EXTENSIONS: &[&str] = &["json", "retbrorl"];

/// Page query parameter that carries a catalog URL.
pub const CATALOG_QUERY_PARAM: &str = "retbrorl";

/// Status line shown after a successful load.
pub const LOADED_STATUS: &str = "← → to choose a system, Enter/A to open.";

/// Where a catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Url(String),
    File(PathBuf),
}

impl CatalogSource {
    /// Interpret a user-supplied source string.
    ///
    /// A page URL carrying `?retbrorl=<url>` resolves to the inner URL, any
    /// other `http(s)` URL is fetched directly, and everything else is a
    /// file path.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if let Some(url) = catalog_url_from_query(input) {
            return Self::Url(url);
        }
        if is_http(input) {
            Self::Url(input.to_string())
        } else {
            Self::File(PathBuf::from(input))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn is_http(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Extract the catalog URL from a page URL or raw query string.
///
/// Accepts `https://host/index.html?retbrorl=...`, `?retbrorl=...` and
/// `retbrorl=...`. The value is percent-decoded; an empty value is `None`.
pub fn catalog_url_from_query(query: &str) -> Option<String> {
    let query = match query.split_once('?') {
        Some((_, q)) => q,
        None if query.contains('=') => query,
        None => return None,
    };
    let query = query.split('#').next().unwrap_or_default();

    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != CATALOG_QUERY_PARAM {
            return None;
        }
        let value = value.replace('+', " ");
        let decoded = urlencoding::decode(&value)
            .map(|v| v.into_owned())
            .unwrap_or(value);
        let decoded = decoded.trim().to_string();
        (!decoded.is_empty()).then_some(decoded)
    })
}

/// Check that a path names a catalog descriptor by its extension.
pub fn check_extension(path: &Path) -> Result<(), LoadError> {
    let ok = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| CATALOG_EXTENSIONS.iter().any(|c| c.eq_ignore_ascii_case(e)))
        .unwrap_or(false);
    if ok {
        Ok(())
    } else {
        Err(LoadError::UnsupportedExtension(
            path.display().to_string(),
        ))
    }
}

/// Read and parse a local descriptor.
pub fn load_from_file(path: &Path) -> Result<Catalog, LoadError> {
    check_extension(path)?;
    let text = std::fs::read_to_string(path)?;
    let catalog = Catalog::from_json_str(&text)?;
    log::debug!(
        "Loaded {} system(s) from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Fetch and parse a remote descriptor.
pub async fn load_from_url(http: &reqwest::Client, url: &str) -> Result<Catalog, LoadError> {
    let resp = http.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::Status(status.as_u16()));
    }
    let text = resp.text().await?;
    let catalog = Catalog::from_json_str(&text)?;
    log::debug!("Loaded {} system(s) from {}", catalog.len(), url);
    Ok(catalog)
}

/// Load from whichever source was given.
pub async fn load(http: &reqwest::Client, source: &CatalogSource) -> Result<Catalog, LoadError> {
    match source {
        CatalogSource::Url(url) => load_from_url(http, url).await,
        CatalogSource::File(path) => load_from_file(path),
    }
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod tests;
