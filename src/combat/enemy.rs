//! The enemy: health scaling, the kill/respawn state machine and the
//! sprite animation that gates when a respawn happens.
//!
//! A kill is committed in two phases. `hit` applies damage and, on the
//! killing blow, moves the enemy to [`EnemyPhase::PendingDeath`] and returns
//! the loot. The next `update` commits the death (kill counter, death
//! animation) exactly once. When the death animation shows its last frame
//! the enemy respawns with grown base health.

use crate::assets::{tier_for, AnimationKind, AssetProvider, Frame};
use crate::combat::animation::{Playback, Squash};
use crate::core::constants::{
    BASE_HEALTH_GROWTH_FACTOR, BASE_HEALTH_GROWTH_RATE, BASE_HEALTH_INCREASE, ENEMY_BASE_HEALTH,
    ENEMY_SIZE,
};
use crate::core::economy::{grow_base_health, loot_drop};
use crate::core::layout::{Point, Rect};
use log::{debug, info};
use rand::Rng;

/// Where the enemy is in its kill/respawn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyPhase {
    /// Taking hits.
    Alive,
    /// Health reached zero; the death is committed on the next tick.
    PendingDeath,
    /// Death animation playing; respawns on its last frame.
    Dying,
}

/// What an `update` tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyTick {
    /// The death was committed this tick.
    pub died: bool,
    /// The enemy came back this tick, with this base health.
    pub respawned_with: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    base_health: u64,
    health: u64,
    base_health_increase: u64,
    base_health_growth_rate: f64,
    base_health_growth_factor: f64,
    enemy_count: u32,
    phase: EnemyPhase,

    position: Point,
    original_size: (i32, i32),
    size: (i32, i32),
    rect: Rect,
    idle_frames: Vec<Frame>,
    death_frames: Vec<Frame>,
    playback: Playback,
    squash: Squash,
}

/// Persisted part of an enemy, independent of its on-screen placement.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyState {
    pub base_health: u64,
    pub health: u64,
    pub base_health_increase: u64,
    pub base_health_growth_rate: f64,
    pub base_health_growth_factor: f64,
    pub enemy_count: u32,
    pub is_dead: bool,
    pub idle_frames: Vec<Frame>,
    pub death_frames: Vec<Frame>,
}

impl Enemy {
    /// A fresh first-tier enemy centred on `position`.
    pub fn new(position: Point, assets: &dyn AssetProvider) -> Self {
        let size = ENEMY_SIZE;
        Self {
            base_health: ENEMY_BASE_HEALTH,
            health: ENEMY_BASE_HEALTH,
            base_health_increase: BASE_HEALTH_INCREASE,
            base_health_growth_rate: BASE_HEALTH_GROWTH_RATE,
            base_health_growth_factor: BASE_HEALTH_GROWTH_FACTOR,
            enemy_count: 0,
            phase: EnemyPhase::Alive,
            position,
            original_size: size,
            size,
            rect: Rect::centered(position, size),
            idle_frames: assets.frames(0, AnimationKind::Idle),
            death_frames: assets.frames(0, AnimationKind::Death),
            playback: Playback::new(AnimationKind::Idle),
            squash: Squash::Idle,
        }
    }

    /// Rebuilds an enemy from persisted state. The phase is derived: a dead
    /// flag resumes the death animation, zero health without it resumes a
    /// pending death.
    pub fn from_state(position: Point, state: EnemyState) -> Self {
        let phase = if state.is_dead {
            EnemyPhase::Dying
        } else if state.health == 0 {
            EnemyPhase::PendingDeath
        } else {
            EnemyPhase::Alive
        };
        let kind = if phase == EnemyPhase::Dying {
            AnimationKind::Death
        } else {
            AnimationKind::Idle
        };
        let size = ENEMY_SIZE;
        Self {
            base_health: state.base_health,
            health: state.health,
            base_health_increase: state.base_health_increase,
            base_health_growth_rate: state.base_health_growth_rate,
            base_health_growth_factor: state.base_health_growth_factor,
            enemy_count: state.enemy_count,
            phase,
            position,
            original_size: size,
            size,
            rect: Rect::centered(position, size),
            idle_frames: state.idle_frames,
            death_frames: state.death_frames,
            playback: Playback::new(kind),
            squash: Squash::Idle,
        }
    }

    pub fn to_state(&self) -> EnemyState {
        EnemyState {
            base_health: self.base_health,
            health: self.health,
            base_health_increase: self.base_health_increase,
            base_health_growth_rate: self.base_health_growth_rate,
            base_health_growth_factor: self.base_health_growth_factor,
            enemy_count: self.enemy_count,
            is_dead: self.is_dead(),
            idle_frames: self.idle_frames.clone(),
            death_frames: self.death_frames.clone(),
        }
    }

    /// Applies `damage`. Returns the loot on the killing blow, 0 otherwise.
    ///
    /// Loot is computed from the base health at the moment of the kill,
    /// before the next growth step. Hits on an enemy that is not alive
    /// change nothing and drop nothing.
    pub fn hit(&mut self, damage: u32, rng: &mut impl Rng) -> u64 {
        if self.phase != EnemyPhase::Alive {
            return 0;
        }
        self.health = self.health.saturating_sub(damage as u64);
        if self.health == 0 {
            self.phase = EnemyPhase::PendingDeath;
            return loot_drop(self.base_health, rng);
        }
        0
    }

    /// Per-tick update: commit a pending death, respawn at the end of the
    /// death animation, otherwise advance squash and frame playback.
    pub fn update(&mut self, assets: &dyn AssetProvider) -> EnemyTick {
        let mut tick = EnemyTick::default();

        if self.phase == EnemyPhase::PendingDeath {
            self.enemy_count = self.enemy_count.saturating_add(1);
            self.phase = EnemyPhase::Dying;
            self.play_death_animation();
            tick.died = true;
            info!(
                "enemy defeated (kills: {}, base health: {})",
                self.enemy_count, self.base_health
            );
        }

        if self.phase == EnemyPhase::Dying
            && self.playback.is_on_last_frame(self.death_frames.len())
        {
            self.respawn(assets);
            tick.respawned_with = Some(self.base_health);
            return tick;
        }

        self.size = self.squash.advance(self.original_size);
        self.rect = Rect::centered(self.position, self.size);

        let frame_count = self.current_frames().len();
        self.playback.advance(frame_count);

        tick
    }

    fn respawn(&mut self, assets: &dyn AssetProvider) {
        let tier = self.tier();
        self.idle_frames = assets.frames(tier, AnimationKind::Idle);
        self.death_frames = assets.frames(tier, AnimationKind::Death);

        let (base_health, factor) = grow_base_health(
            self.base_health,
            self.base_health_increase,
            self.base_health_growth_factor,
            self.base_health_growth_rate,
        );
        self.base_health = base_health;
        self.base_health_growth_factor = factor;
        self.health = self.base_health;
        self.phase = EnemyPhase::Alive;
        self.play_idle_animation();
        debug!(
            "enemy respawned (tier {}, base health {})",
            tier, self.base_health
        );
    }

    /// Starts the squash pulse; only while the idle animation is showing.
    pub fn play_click_animation(&mut self) {
        if self.playback.kind == AnimationKind::Idle {
            self.playback.restart();
            self.squash = Squash::Shrinking { timer: 0.0 };
        }
    }

    fn play_death_animation(&mut self) {
        self.playback.play(AnimationKind::Death);
        self.reset_squash();
    }

    fn play_idle_animation(&mut self) {
        if self.playback.play(AnimationKind::Idle) {
            self.reset_squash();
        }
    }

    fn reset_squash(&mut self) {
        self.squash = Squash::Idle;
        self.size = self.original_size;
        self.rect = Rect::centered(self.position, self.size);
    }

    fn current_frames(&self) -> &[Frame] {
        match self.playback.kind {
            AnimationKind::Idle => &self.idle_frames,
            AnimationKind::Death => &self.death_frames,
        }
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.current_frames().get(self.playback.frame_index)
    }

    pub fn is_alive(&self) -> bool {
        self.phase == EnemyPhase::Alive
    }

    /// True from the committed death until the respawn.
    pub fn is_dead(&self) -> bool {
        self.phase == EnemyPhase::Dying
    }

    pub fn phase(&self) -> EnemyPhase {
        self.phase
    }

    pub fn health(&self) -> u64 {
        self.health
    }

    pub fn base_health(&self) -> u64 {
        self.base_health
    }

    pub fn growth_factor(&self) -> f64 {
        self.base_health_growth_factor
    }

    pub fn enemy_count(&self) -> u32 {
        self.enemy_count
    }

    /// Cosmetic sprite tier for the current kill count.
    pub fn tier(&self) -> u32 {
        tier_for(self.enemy_count)
    }

    /// Health-bar fill, clamped to `[0, 1]`.
    pub fn health_fraction(&self) -> f64 {
        if self.base_health == 0 {
            return 0.0;
        }
        (self.health as f64 / self.base_health as f64).clamp(0.0, 1.0)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> (i32, i32) {
        self.size
    }

    /// Current hit region; follows the squash size.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn animation(&self) -> AnimationKind {
        self.playback.kind
    }

    pub fn frame_index(&self) -> usize {
        self.playback.frame_index
    }

    pub fn frame_counts(&self) -> (usize, usize) {
        (self.idle_frames.len(), self.death_frames.len())
    }

    pub fn is_squashing(&self) -> bool {
        self.squash.is_active()
    }
}
