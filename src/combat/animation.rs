//! Frame playback and the click-feedback squash.
//!
//! Neither of these gates game state on its own; the enemy only asks
//! whether the death animation has reached its last frame.

use crate::assets::AnimationKind;
use crate::core::constants::{
    ANIMATION_SPEED_INITIAL, ANIMATION_STEP, GROW_DURATION, SHRINK_DURATION,
};
use crate::core::economy::animation_speed;

/// Playback cursor over the current animation's frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    pub kind: AnimationKind,
    pub frame_index: usize,
    timer: f64,
    speed: f64,
}

impl Playback {
    pub fn new(kind: AnimationKind) -> Self {
        Self {
            kind,
            frame_index: 0,
            timer: 0.0,
            speed: ANIMATION_SPEED_INITIAL,
        }
    }

    /// Switches to `kind` from its first frame. No-op if already playing it.
    pub fn play(&mut self, kind: AnimationKind) -> bool {
        if self.kind == kind {
            return false;
        }
        self.kind = kind;
        self.restart();
        true
    }

    pub fn restart(&mut self) {
        self.frame_index = 0;
        self.timer = 0.0;
    }

    pub fn is_on_last_frame(&self, frame_count: usize) -> bool {
        self.frame_index + 1 >= frame_count.max(1)
    }

    /// Advances by one tick, then retunes the frame interval for `frame_count`.
    pub fn advance(&mut self, frame_count: usize) {
        let frame_count = frame_count.max(1);
        self.timer += ANIMATION_STEP;
        if self.timer >= self.speed {
            self.frame_index = (self.frame_index + 1) % frame_count;
            self.timer = 0.0;
        }
        self.speed = animation_speed(frame_count);
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

/// Shrink-then-grow size pulse played on a successful click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Squash {
    Idle,
    Shrinking { timer: f64 },
    Growing { timer: f64 },
}

impl Squash {
    pub fn is_active(&self) -> bool {
        !matches!(self, Squash::Idle)
    }

    /// Advances one tick and returns the size to draw at.
    pub fn advance(&mut self, original: (i32, i32)) -> (i32, i32) {
        let scale = |factor: f64| {
            (
                (original.0 as f64 * factor) as i32,
                (original.1 as f64 * factor) as i32,
            )
        };

        let mut size = original;
        if let Squash::Shrinking { timer } = *self {
            let timer = timer + ANIMATION_STEP;
            size = scale(1.0 - timer / SHRINK_DURATION);
            *self = if timer >= SHRINK_DURATION {
                Squash::Growing { timer: 0.0 }
            } else {
                Squash::Shrinking { timer }
            };
        }
        if let Squash::Growing { timer } = *self {
            let timer = timer + ANIMATION_STEP;
            size = scale(timer / GROW_DURATION);
            if timer >= GROW_DURATION {
                *self = Squash::Idle;
                size = original;
            } else {
                *self = Squash::Growing { timer };
            }
        }
        size
    }
}
