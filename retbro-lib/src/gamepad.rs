//! Polled gamepad state turned into commands.
//!
//! Buttons fire on the press edge. The left stick fires once when an axis
//! crosses the dead zone and then repeats on a fixed schedule measured from
//! that crossing (`crossing + k * interval`), so the number of moves depends
//! on how long the stick is held, not on how often it is sampled.

use std::time::Duration;

use tokio::time::Instant;

use crate::session::{Command, Mode};

/// Face button that opens in the carousel and launches in the overlay.
pub const BUTTON_CONFIRM: usize = 0;
/// Face button that closes the overlay.
pub const BUTTON_BACK: usize = 1;
/// Start button; opens the current system.
pub const BUTTON_START: usize = 9;

pub const DEFAULT_DEAD_ZONE: f32 = 0.45;
pub const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(160);

/// One sample of a standard-layout gamepad.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadSample {
    /// Pressed state per button index.
    pub buttons: Vec<bool>,
    /// Left stick, horizontal then vertical, each in `[-1, 1]`.
    pub axes: [f32; 2],
}

impl GamepadSample {
    pub fn with_axes(x: f32, y: f32) -> Self {
        Self {
            buttons: Vec::new(),
            axes: [x, y],
        }
    }

    pub fn with_button(index: usize) -> Self {
        let mut buttons = vec![false; index + 1];
        buttons[index] = true;
        Self {
            buttons,
            axes: [0.0, 0.0],
        }
    }

    fn pressed(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GamepadConfig {
    pub dead_zone: f32,
    pub repeat_interval: Duration,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            dead_zone: DEFAULT_DEAD_ZONE,
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
        }
    }
}

/// Held direction of one axis.
#[derive(Debug, Clone, Copy, Default)]
struct AxisState {
    /// -1, 0 or 1.
    direction: i32,
    crossed_at: Option<Instant>,
    repeats: u32,
}

impl AxisState {
    /// Advance with a new reading. Returns the direction to move, if any.
    fn update(&mut self, value: f32, dead_zone: f32, interval: Duration, now: Instant) -> Option<i32> {
        let direction = if value > dead_zone {
            1
        } else if value < -dead_zone {
            -1
        } else {
            0
        };

        if direction == 0 {
            *self = Self::default();
            return None;
        }

        if direction != self.direction {
            *self = Self {
                direction,
                crossed_at: Some(now),
                repeats: 0,
            };
            return Some(direction);
        }

        let crossed_at = self.crossed_at?;
        if interval.is_zero() {
            return None;
        }
        let due = (now.saturating_duration_since(crossed_at).as_nanos() / interval.as_nanos()) as u32;
        if due > self.repeats {
            // Missed slots are skipped so a stalled poll does not burst.
            self.repeats = due;
            Some(direction)
        } else {
            None
        }
    }
}

/// Stateful mapping from gamepad samples to commands.
#[derive(Debug, Clone)]
pub struct GamepadMapper {
    config: GamepadConfig,
    previous_buttons: Vec<bool>,
    axes: [AxisState; 2],
}

impl GamepadMapper {
    pub fn new(config: GamepadConfig) -> Self {
        Self {
            config,
            previous_buttons: Vec::new(),
            axes: [AxisState::default(); 2],
        }
    }

    fn just_pressed(&self, sample: &GamepadSample, index: usize) -> bool {
        sample.pressed(index) && !self.previous_buttons.get(index).copied().unwrap_or(false)
    }

    /// Process one sample taken at `now`.
    pub fn poll(&mut self, sample: &GamepadSample, mode: Mode, now: Instant) -> Vec<Command> {
        let mut commands = Vec::new();

        if self.just_pressed(sample, BUTTON_CONFIRM) {
            commands.push(match mode {
                Mode::Browsing => Command::Open(None),
                Mode::Overlay => Command::Launch,
            });
        }
        if self.just_pressed(sample, BUTTON_BACK) && mode == Mode::Overlay {
            commands.push(Command::Close);
        }
        if self.just_pressed(sample, BUTTON_START) && mode == Mode::Browsing {
            commands.push(Command::Open(None));
        }
        self.previous_buttons.clone_from(&sample.buttons);

        let GamepadConfig {
            dead_zone,
            repeat_interval,
        } = self.config;
        let [x, y] = sample.axes;
        let horizontal = self.axes[0].update(x, dead_zone, repeat_interval, now);
        let vertical = self.axes[1].update(y, dead_zone, repeat_interval, now);

        match mode {
            Mode::Browsing => commands.extend(horizontal.map(Command::MoveSystem)),
            Mode::Overlay => commands.extend(vertical.map(Command::MoveTitle)),
        }
        commands
    }
}

#[cfg(test)]
#[path = "tests/gamepad_tests.rs"]
mod tests;
