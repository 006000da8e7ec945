//! Input unification: keyboard, pointer, and gamepad events become
//! [`Command`]s.
//!
//! This is the only place that looks at device data. Mapping depends on the
//! current [`Mode`] (arrows mean different things in the carousel and in the
//! overlay), so every entry point takes it.

use tokio::time::Instant;

use crate::gamepad::{GamepadConfig, GamepadMapper, GamepadSample};
use crate::session::{Command, Mode};

/// Keys the browser reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Escape,
    Other,
}

/// Pointer activity over an item, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    HoverSystem(usize),
    HoverTitle(usize),
    ClickSystem(usize),
    ClickTitle(usize),
}

pub fn map_key(key: Key, mode: Mode) -> Option<Command> {
    match (key, mode) {
        (Key::Left, Mode::Browsing) => Some(Command::MoveSystem(-1)),
        (Key::Right, Mode::Browsing) => Some(Command::MoveSystem(1)),
        (Key::Up, Mode::Overlay) => Some(Command::MoveTitle(-1)),
        (Key::Down, Mode::Overlay) => Some(Command::MoveTitle(1)),
        (Key::Enter, Mode::Browsing) => Some(Command::Open(None)),
        (Key::Enter, Mode::Overlay) => Some(Command::Launch),
        (Key::Escape, _) => Some(Command::Close),
        _ => None,
    }
}

pub fn map_pointer(event: PointerEvent, mode: Mode) -> Option<Command> {
    match (event, mode) {
        (PointerEvent::HoverSystem(i), Mode::Browsing) => Some(Command::SelectSystem(i)),
        (PointerEvent::HoverSystem(_), Mode::Overlay) => None,
        (PointerEvent::HoverTitle(i), Mode::Overlay) => Some(Command::SelectTitle(i)),
        (PointerEvent::HoverTitle(_), Mode::Browsing) => None,
        (PointerEvent::ClickSystem(i), _) => Some(Command::Open(Some(i))),
        (PointerEvent::ClickTitle(_), Mode::Overlay) => Some(Command::Launch),
        (PointerEvent::ClickTitle(_), Mode::Browsing) => None,
    }
}

/// Funnels all three sources into one command stream. Keyboard and pointer
/// mapping is stateless; the gamepad needs the previous sample. Hand the
/// same unifier to [`PollLoop::start`](crate::PollLoop::start) so polled
/// samples and direct input share that state.
#[derive(Debug, Clone)]
pub struct InputUnifier {
    gamepad: GamepadMapper,
}

impl InputUnifier {
    pub fn new(config: GamepadConfig) -> Self {
        Self {
            gamepad: GamepadMapper::new(config),
        }
    }

    pub fn key(&self, key: Key, mode: Mode) -> Option<Command> {
        map_key(key, mode)
    }

    pub fn pointer(&self, event: PointerEvent, mode: Mode) -> Option<Command> {
        map_pointer(event, mode)
    }

    pub fn gamepad(&mut self, sample: &GamepadSample, mode: Mode, now: Instant) -> Vec<Command> {
        self.gamepad.poll(sample, mode, now)
    }
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
