//! Input vocabulary, per-tick results and fixed-cadence frame pacing.
//!
//! The session never blocks; the outer loop owns timing and feeds one
//! event or tick at a time, so every mutation runs to completion before
//! the next one starts.

use crate::character::perks::PurchaseOutcome;
use crate::character::player::ClickResult;
use crate::core::layout::Point;
use std::thread;
use std::time::{Duration, Instant};

/// Discrete events delivered by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerUp,
    /// Toggles pause.
    Escape,
    /// Window closed / process exiting.
    Quit,
}

/// What the outer loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Quit,
}

/// What a click resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A BUY button was under the pointer.
    Shop(PurchaseOutcome),
    /// The enemy was hit.
    Attack(ClickResult),
    /// Nothing under the pointer, the enemy is not alive, or the game is paused.
    Ignored,
}

/// Result of one game tick, for the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickResult {
    /// The enemy's death was committed this tick.
    pub enemy_died: bool,
    /// The enemy respawned this tick with this base health.
    pub enemy_respawned: Option<u64>,
    /// The autosave interval elapsed this tick.
    pub autosave_due: bool,
}

/// Holds a loop to a fixed number of steps per second.
pub struct FrameLimiter {
    frame: Duration,
    next_frame: Instant,
}

impl FrameLimiter {
    pub fn new(steps_per_second: u32) -> Self {
        let frame = Duration::from_secs(1) / steps_per_second.max(1);
        Self {
            frame,
            next_frame: Instant::now() + frame,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Sleeps until the next frame boundary. A late frame does not try to
    /// catch up; the schedule restarts from now.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next_frame {
            thread::sleep(self.next_frame - now);
            self.next_frame += self.frame;
        } else {
            self.next_frame = now + self.frame;
        }
    }
}
