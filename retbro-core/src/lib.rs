//! Core data model for the ROM library browser.
//!
//! Pure types with no network or disk access: the catalog of systems and
//! titles, title naming rules, the normalized metadata record, and the
//! extension table used to hand a title to the player.

pub mod catalog;
pub mod error;
pub mod handoff;
pub mod metadata;
pub mod platform;
pub mod title;

pub use catalog::{Catalog, EntryShape, SystemEntry};
pub use error::CatalogError;
pub use handoff::Handoff;
pub use metadata::{MetadataRecord, PlaceholderImages};
pub use platform::{Platform, PlatformParseError};
pub use title::{Title, display_name, lookup_key};
