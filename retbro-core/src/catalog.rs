//! In-memory catalog of systems and their title URLs.
//!
//! The descriptor is a JSON object whose keys are system names. Each value
//! uses one of two shapes:
//! ```text
//! { "NES":  ["roms/Contra (USA).nes", ...],
//!   "SNES": { "sys_image": "img/snes.png", "roms": ["roms/F-Zero (USA).sfc"] } }
//! ```
//! Display order is the key order of the descriptor.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CatalogError;
use crate::title::Title;

/// Raw shape of one system value, as found in the descriptor.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Urls(Vec<String>),
    Record(RawRecord),
}

/// Record form. Both spellings of each field may appear; `sys_image` and
/// `roms` win over `displayImage` and `titles`.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    sys_image: Option<String>,
    #[serde(default, rename = "displayImage")]
    display_image: Option<String>,
    #[serde(default)]
    roms: Option<Vec<String>>,
    #[serde(default)]
    titles: Option<Vec<String>>,
}

/// Normalized entry for one system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryShape {
    /// Bare ordered list of title URLs.
    Urls(Vec<String>),
    /// Record form with an optional tile image.
    Record {
        display_image: Option<String>,
        titles: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemEntry {
    pub name: String,
    pub shape: EntryShape,
}

impl SystemEntry {
    /// Title URLs in descriptor order, whichever shape was supplied.
    pub fn title_urls(&self) -> &[String] {
        match &self.shape {
            EntryShape::Urls(urls) => urls,
            EntryShape::Record { titles, .. } => titles,
        }
    }

    /// Tile image for the record form. `None` means the caller should use
    /// its default asset.
    pub fn display_image(&self) -> Option<&str> {
        match &self.shape {
            EntryShape::Urls(_) => None,
            EntryShape::Record { display_image, .. } => display_image.as_deref(),
        }
    }

    pub fn titles(&self) -> Vec<Title> {
        self.title_urls().iter().map(Title::from_url).collect()
    }
}

/// Ordered mapping of system name to entry.
///
/// A catalog is immutable once built; loading a new descriptor produces a
/// new catalog that replaces the old one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    systems: Vec<SystemEntry>,
}

impl Catalog {
    /// Build a catalog from an already-decoded JSON value.
    pub fn parse(raw: &Value) -> Result<Self, CatalogError> {
        let object = raw.as_object().ok_or(CatalogError::NotAnObject)?;
        if object.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut systems = Vec::with_capacity(object.len());
        for (name, value) in object {
            let raw_entry = RawEntry::deserialize(value).map_err(|_| {
                CatalogError::invalid_entry(
                    name.as_str(),
                    "expected an array of URL strings or an object with a 'roms' array",
                )
            })?;
            let shape = match raw_entry {
                RawEntry::Urls(urls) => EntryShape::Urls(urls),
                RawEntry::Record(record) => EntryShape::Record {
                    display_image: record.sys_image.or(record.display_image),
                    titles: record.roms.or(record.titles).unwrap_or_default(),
                },
            };
            systems.push(SystemEntry {
                name: name.clone(),
                shape,
            });
        }

        Ok(Self { systems })
    }

    /// Decode descriptor text and build a catalog from it.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(text)?;
        Self::parse(&value)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn system(&self, index: usize) -> Option<&SystemEntry> {
        self.systems.get(index)
    }

    pub fn systems(&self) -> &[SystemEntry] {
        &self.systems
    }

    /// Find a system by exact name, falling back to a case-insensitive match.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.systems
            .iter()
            .position(|s| s.name == name)
            .or_else(|| {
                self.systems
                    .iter()
                    .position(|s| s.name.eq_ignore_ascii_case(name))
            })
    }

    /// System names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(|s| s.name.as_str())
    }
}
