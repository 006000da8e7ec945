//! Remote metadata for retbro titles.
//!
//! A [`MetadataProvider`] answers raw queries; the [`MetadataResolver`]
//! matches, normalizes, caches, and falls back so callers always get a
//! complete [`retbro_core::MetadataRecord`].

pub mod cache;
pub mod client;
pub mod credentials;
pub mod error;
pub mod lookup;
pub mod normalize;
pub mod provider;
pub mod resolver;
pub mod types;

pub use cache::MetadataCache;
pub use client::{ClientOptions, ScreenScraperClient};
pub use credentials::{CredentialSource, CredentialSources, Credentials};
pub use error::ScrapeError;
pub use lookup::{LookupResult, MatchTier};
pub use provider::{MetadataProvider, OfflineProvider};
pub use resolver::MetadataResolver;
pub use types::ProviderPayload;
