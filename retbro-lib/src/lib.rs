//! Session engine for the retbro ROM-library browser.
//!
//! Ties the catalog, the metadata resolver, and the input sources together:
//! [`Session`] is the navigation state machine, [`InputUnifier`] turns
//! device events into its commands, and [`loader`] reads catalogs.

pub mod error;
pub mod filter;
pub mod gamepad;
pub mod input;
pub mod loader;
pub mod poll_loop;
pub mod provider;
pub mod session;
pub mod settings;
pub mod view;

pub use error::LoadError;
pub use gamepad::{GamepadConfig, GamepadMapper, GamepadSample};
pub use input::{InputUnifier, Key, PointerEvent};
pub use loader::CatalogSource;
pub use poll_loop::{GamepadSource, PollLoop};
pub use provider::{Provider, resolver_from_settings};
pub use session::{
    Command, Effect, MetadataRequest, MetadataResponse, Mode, RequestTicket, SelectionState,
    Session,
};
pub use settings::Settings;
pub use view::{DetailPane, View};
