//! The browsing session: catalog, cursors, filter, and the detail pane.
//!
//! A [`Session`] is a two-state machine (`Browsing` the system carousel, or
//! `Overlay` showing one system's titles). It consumes [`Command`]s from the
//! input layer and answers with an [`Effect`] telling the caller what to do
//! next: nothing, fetch metadata, or hand a title to the player.
//!
//! Metadata fetches run outside the session. Each request carries a
//! [`RequestTicket`]; only the response for the most recent ticket may update
//! the detail pane, so a slow answer for a title that is no longer selected
//! is dropped (its record still lands in the resolver's cache).

use std::future::Future;
use std::sync::Arc;

use retbro_core::{Catalog, Handoff, MetadataRecord, Title};
use retbro_scraper::{MetadataProvider, MetadataResolver};

use crate::filter::{apply_filter, normalize_query};
use crate::view::{DetailPane, SystemTile, TitleRow, View};

/// Navigation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// System carousel, overlay closed.
    Browsing,
    /// One system's titles visible, search active.
    Overlay,
}

/// The command vocabulary shared by every input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Relative move in the system carousel.
    MoveSystem(i32),
    /// Relative move in the visible title list.
    MoveTitle(i32),
    /// Put the system cursor on an index (pointer hover).
    SelectSystem(usize),
    /// Put the title cursor on a visible index (pointer hover).
    SelectTitle(usize),
    /// Open a system's overlay; `None` opens the current system.
    Open(Option<usize>),
    Close,
    Launch,
}

/// Identifies one metadata request issued by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// A metadata lookup the caller should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRequest {
    pub ticket: RequestTicket,
    pub display_name: String,
}

/// Result of running a [`MetadataRequest`].
#[derive(Debug, Clone)]
pub struct MetadataResponse {
    pub ticket: RequestTicket,
    pub display_name: String,
    pub record: Arc<MetadataRecord>,
}

/// What the caller must do after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Fetch(MetadataRequest),
    Launch(Handoff),
}

/// Cursor and overlay state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub active_system: usize,
    /// Index into the visible list; meaningless while it is empty.
    pub active_title: usize,
    pub overlay_open: bool,
    pub filter_query: String,
}

pub struct Session<P> {
    catalog: Arc<Catalog>,
    resolver: Arc<MetadataResolver<P>>,
    state: SelectionState,
    /// Every title of the open system.
    titles: Vec<Title>,
    /// Indices into `titles` that pass the filter.
    visible: Vec<usize>,
    detail: DetailPane,
    next_ticket: u64,
    pending: Option<RequestTicket>,
    handed_off: Option<Handoff>,
}

/// `(current + delta) mod count`, for any sign of `delta`.
fn wrap(current: usize, delta: i32, count: usize) -> usize {
    let count = count as i64;
    (current as i64 + delta as i64).rem_euclid(count) as usize
}

impl<P: MetadataProvider> Session<P> {
    pub fn new(catalog: Catalog, resolver: Arc<MetadataResolver<P>>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            resolver,
            state: SelectionState::default(),
            titles: Vec::new(),
            visible: Vec::new(),
            detail: DetailPane::Prompt,
            next_ticket: 0,
            pending: None,
            handed_off: None,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.state.overlay_open {
            Mode::Overlay
        } else {
            Mode::Browsing
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn resolver(&self) -> &Arc<MetadataResolver<P>> {
        &self.resolver
    }

    pub fn detail(&self) -> &DetailPane {
        &self.detail
    }

    /// Ticket of the request the detail pane is waiting for.
    pub fn pending(&self) -> Option<RequestTicket> {
        self.pending
    }

    /// The handoff, once a title has been launched.
    pub fn handed_off(&self) -> Option<&Handoff> {
        self.handed_off.as_ref()
    }

    /// Replace the catalog wholesale and return to the carousel. A previous
    /// handoff is cleared, so the session accepts commands again.
    pub fn load_catalog(&mut self, catalog: Catalog) {
        log::debug!("Installing catalog with {} system(s)", catalog.len());
        self.catalog = Arc::new(catalog);
        self.state = SelectionState::default();
        self.titles.clear();
        self.visible.clear();
        self.detail = DetailPane::Prompt;
        self.pending = None;
        self.handed_off = None;
    }

    /// Apply one command. Once a title has been handed off, the session is
    /// finished and every further command is ignored.
    pub fn handle(&mut self, command: Command) -> Effect {
        if self.handed_off.is_some() {
            log::debug!("Ignoring {:?} after handoff", command);
            return Effect::None;
        }
        match command {
            Command::MoveSystem(delta) => {
                self.move_system(delta);
                Effect::None
            }
            Command::MoveTitle(delta) => self.move_title(delta),
            Command::SelectSystem(index) => {
                self.select_system(index);
                Effect::None
            }
            Command::SelectTitle(index) => self.select_title(index),
            Command::Open(index) => self.open(index),
            Command::Close => {
                self.close();
                Effect::None
            }
            Command::Launch => self.launch(),
        }
    }

    /// Open a system's overlay (the current one when `index` is `None`).
    ///
    /// Works from either mode: opening while an overlay is up switches to
    /// the new system. The filter is reset, the metadata cache is cleared,
    /// and the first title is selected.
    pub fn open(&mut self, index: Option<usize>) -> Effect {
        let index = index.unwrap_or(self.state.active_system);
        let Some(system) = self.catalog.system(index) else {
            return Effect::None;
        };

        self.titles = system.titles();
        self.visible = (0..self.titles.len()).collect();
        self.state.active_system = index;
        self.state.overlay_open = true;
        self.state.filter_query.clear();
        self.state.active_title = 0;
        self.resolver.clear_cache();
        log::debug!(
            "Opened {} with {} title(s)",
            system.name,
            self.titles.len()
        );
        self.refresh_detail()
    }

    /// Close the overlay, discarding filter and cursor state.
    pub fn close(&mut self) {
        if !self.state.overlay_open {
            return;
        }
        self.state.overlay_open = false;
        self.state.filter_query.clear();
        self.state.active_title = 0;
        self.titles.clear();
        self.visible.clear();
        self.detail = DetailPane::Prompt;
        self.pending = None;
    }

    pub fn move_system(&mut self, delta: i32) {
        let count = self.catalog.len();
        if self.state.overlay_open || count == 0 {
            return;
        }
        self.state.active_system = wrap(self.state.active_system, delta, count);
    }

    pub fn select_system(&mut self, index: usize) {
        if !self.state.overlay_open && index < self.catalog.len() {
            self.state.active_system = index;
        }
    }

    pub fn move_title(&mut self, delta: i32) -> Effect {
        let count = self.visible.len();
        if !self.state.overlay_open || count == 0 {
            return Effect::None;
        }
        let current = self.state.active_title.min(count - 1);
        self.state.active_title = wrap(current, delta, count);
        self.refresh_detail()
    }

    pub fn select_title(&mut self, index: usize) -> Effect {
        if !self.state.overlay_open || index >= self.visible.len() {
            return Effect::None;
        }
        let settled = matches!(self.detail, DetailPane::Loading { .. } | DetailPane::Ready(_));
        if index == self.state.active_title && settled {
            return Effect::None;
        }
        self.state.active_title = index;
        self.refresh_detail()
    }

    /// Re-filter the open system's titles and select the first match.
    pub fn set_filter(&mut self, query: &str) -> Effect {
        if !self.state.overlay_open {
            return Effect::None;
        }
        self.state.filter_query = query.trim().to_string();
        self.visible = apply_filter(&self.state.filter_query, &self.titles);
        self.state.active_title = 0;
        log::debug!(
            "Filter {:?} leaves {} of {} title(s)",
            normalize_query(query),
            self.visible.len(),
            self.titles.len()
        );
        self.refresh_detail()
    }

    /// Hand the selected title to the player.
    pub fn launch(&mut self) -> Effect {
        let Some(title) = self.selected_title() else {
            return Effect::None;
        };
        let handoff = Handoff::for_title(title);
        log::debug!("Launching {} as {}", handoff.rom_url, handoff.platform);
        self.handed_off = Some(handoff.clone());
        self.pending = None;
        Effect::Launch(handoff)
    }

    /// The title under the cursor, if the overlay shows any.
    pub fn selected_title(&self) -> Option<&Title> {
        if !self.state.overlay_open || self.visible.is_empty() {
            return None;
        }
        let slot = self.state.active_title.min(self.visible.len() - 1);
        self.titles.get(self.visible[slot])
    }

    /// Titles passing the current filter, in catalog order.
    pub fn visible_titles(&self) -> impl Iterator<Item = &Title> {
        self.visible.iter().filter_map(|&i| self.titles.get(i))
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Point the detail pane at the current selection: an empty list shows
    /// "no results", a cached title shows at once, anything else needs a
    /// fetch under a fresh ticket.
    fn refresh_detail(&mut self) -> Effect {
        let Some(title) = self.selected_title() else {
            self.detail = DetailPane::NoResults;
            self.pending = None;
            return Effect::None;
        };
        let display_name = title.display_name.clone();

        if let Some(record) = self.resolver.cached(&display_name) {
            self.detail = DetailPane::Ready(record);
            self.pending = None;
            return Effect::None;
        }

        self.next_ticket += 1;
        let ticket = RequestTicket(self.next_ticket);
        self.pending = Some(ticket);
        self.detail = DetailPane::Loading {
            title: display_name.clone(),
        };
        log::debug!("Request {:?} for {:?}", ticket, display_name);
        Effect::Fetch(MetadataRequest {
            ticket,
            display_name,
        })
    }

    /// Install a fetched record if it answers the current request.
    ///
    /// Returns `false` for a stale response, which is discarded.
    pub fn apply(&mut self, response: MetadataResponse) -> bool {
        if self.pending != Some(response.ticket) {
            log::debug!(
                "Discarding stale metadata for {:?} ({:?})",
                response.display_name,
                response.ticket
            );
            return false;
        }
        self.pending = None;
        self.detail = DetailPane::Ready(response.record);
        true
    }

    /// Snapshot of everything the presentation sink renders.
    pub fn view(&self) -> View {
        let systems = self
            .catalog
            .systems()
            .iter()
            .enumerate()
            .map(|(i, s)| SystemTile {
                name: s.name.clone(),
                image: s.display_image().map(str::to_string),
                selected: i == self.state.active_system,
            })
            .collect();
        let titles = self
            .visible_titles()
            .enumerate()
            .map(|(i, t)| TitleRow {
                display_name: t.display_name.clone(),
                selected: i == self.state.active_title,
            })
            .collect();
        View {
            mode: self.mode(),
            systems,
            titles,
            filter: self.state.filter_query.clone(),
            detail: self.detail.clone(),
        }
    }
}

impl<P: MetadataProvider + 'static> Session<P> {
    /// Future that runs a request against the shared resolver.
    ///
    /// It borrows nothing from the session, so it can be spawned while the
    /// session keeps handling input.
    pub fn fetch(
        &self,
        request: MetadataRequest,
    ) -> impl Future<Output = MetadataResponse> + use<P> {
        let resolver = Arc::clone(&self.resolver);
        async move {
            let record = resolver.get_metadata(&request.display_name).await;
            MetadataResponse {
                ticket: request.ticket,
                display_name: request.display_name,
                record,
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
