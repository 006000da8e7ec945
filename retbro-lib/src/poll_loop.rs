//! Periodic gamepad sampling as an owned task.
//!
//! The loop ticks once per frame on a tokio interval. Late ticks are skipped
//! rather than replayed, so a busy frame never queues up extra polls. Stop
//! the loop with [`PollLoop::stop`] or by dropping it.
//!
//! The loop drives the same [`InputUnifier`] the caller uses for keyboard
//! and pointer input, so there is one gamepad mapper per session.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::gamepad::GamepadSample;
use crate::input::InputUnifier;
use crate::session::{Command, Mode};

/// Something that can be sampled for gamepad state.
pub trait GamepadSource {
    /// Current state, or `None` when no pad is connected.
    fn sample(&mut self) -> Option<GamepadSample>;
}

impl<F> GamepadSource for F
where
    F: FnMut() -> Option<GamepadSample>,
{
    fn sample(&mut self) -> Option<GamepadSample> {
        self()
    }
}

pub struct PollLoop {
    handle: JoinHandle<()>,
}

impl PollLoop {
    /// Spawn the loop on the current `LocalSet`.
    ///
    /// `mode` tracks the session's navigation level; commands go to
    /// `commands`. The loop ends on its own once the receiver is dropped.
    pub fn start<S>(
        mut source: S,
        input: Rc<RefCell<InputUnifier>>,
        period: Duration,
        mode: watch::Receiver<Mode>,
        commands: mpsc::UnboundedSender<Command>,
    ) -> Self
    where
        S: GamepadSource + 'static,
    {
        let handle = tokio::task::spawn_local(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            log::debug!("Gamepad polling every {:?}", period);

            loop {
                let now = ticker.tick().await;
                let Some(sample) = source.sample() else {
                    continue;
                };
                let current = *mode.borrow();
                let polled = input.borrow_mut().gamepad(&sample, current, now);
                for command in polled {
                    if commands.send(command).is_err() {
                        log::debug!("Gamepad command receiver closed, stopping poll loop");
                        return;
                    }
                }
            }
        });
        Self { handle }
    }

    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PollLoop {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
