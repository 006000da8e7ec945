use std::sync::Arc;

use retbro_core::MetadataRecord;

use crate::session::Mode;

/// What the detail pane shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPane {
    /// Nothing selected yet.
    Prompt,
    /// Waiting for metadata for this title.
    Loading { title: String },
    Ready(Arc<MetadataRecord>),
    /// The overlay's visible list is empty.
    NoResults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemTile {
    pub name: String,
    /// Tile image from the catalog; `None` means use the default asset.
    pub image: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRow {
    pub display_name: String,
    pub selected: bool,
}

/// Snapshot of the session for a presentation sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub mode: Mode,
    pub systems: Vec<SystemTile>,
    /// Visible titles of the open system; empty while browsing.
    pub titles: Vec<TitleRow>,
    pub filter: String,
    pub detail: DetailPane,
}

impl View {
    pub fn selected_system(&self) -> Option<&SystemTile> {
        self.systems.iter().find(|s| s.selected)
    }

    pub fn selected_title(&self) -> Option<&TitleRow> {
        self.titles.iter().find(|t| t.selected)
    }
}
