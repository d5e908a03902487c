//! Economy formulas shared by the player, the enemy and the perk shop.
//!
//! These are pure functions; the only randomness enters through an
//! explicit `rng` argument so callers decide where draws come from.

use crate::core::constants::{
    ANIMATION_MAX_SPEED, ANIMATION_MIN_SPEED, ANIMATION_THRESHOLD_FRAMES, LOOT_VARIANCE_MAX,
    LOOT_VARIANCE_MIN,
};
use rand::Rng;

/// Result of a player attack calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    /// Damage dealt (after crit bonus if applicable).
    pub damage: u32,
    /// Whether this attack was a critical hit.
    pub is_crit: bool,
}

/// Price of a perk at `level`: `floor(base_price * price_scale^level)`.
pub fn perk_price(base_price: u64, price_scale: f64, level: u32) -> u64 {
    (base_price as f64 * price_scale.powf(level as f64)).floor() as u64
}

/// Bonus granted by a perk at `level`: `floor(base_bonus + level * bonus_scale)`.
pub fn perk_bonus(base_bonus: u32, bonus_scale: f64, level: u32) -> u32 {
    (base_bonus as f64 + level as f64 * bonus_scale).floor() as u32
}

/// Loot dropped by an enemy with the given base health and variance roll.
///
/// Works out to `floor(sqrt(base_health) * roll)`.
pub fn loot_drop_with_roll(base_health: u64, roll: f64) -> u64 {
    ((base_health as f64).sqrt() * roll).floor() as u64
}

/// Loot dropped by an enemy, drawing the variance roll from `rng`.
pub fn loot_drop(base_health: u64, rng: &mut impl Rng) -> u64 {
    let roll = rng.gen_range(LOOT_VARIANCE_MIN..=LOOT_VARIANCE_MAX);
    loot_drop_with_roll(base_health, roll)
}

/// Raw reward scaled by the loot bonus percentage.
pub fn reward_with_bonus(reward: u64, loot_bonus_percent: u32) -> u64 {
    let scaled = reward as u128 * (100 + loot_bonus_percent as u128) / 100;
    scaled.min(u64::MAX as u128) as u64
}

/// Damage after applying the crit bonus percentage on a critical hit.
pub fn damage_with_crit(base_damage: u32, crit_damage_percent: u32, is_crit: bool) -> u32 {
    if !is_crit {
        return base_damage;
    }
    let boosted = base_damage as u64 * (100 + crit_damage_percent as u64) / 100;
    boosted.min(u32::MAX as u64) as u32
}

/// Roll for critical hit: one draw in `[0, 100)`, crit when strictly below the rate.
pub fn roll_crit(crit_rate_percent: u32, rng: &mut impl Rng) -> bool {
    let roll = rng.gen_range(0..100);
    roll < crit_rate_percent
}

/// Calculate player attack damage with crit roll.
pub fn calculate_attack(
    base_damage: u32,
    crit_rate_percent: u32,
    crit_damage_percent: u32,
    rng: &mut impl Rng,
) -> AttackResult {
    let is_crit = roll_crit(crit_rate_percent, rng);
    AttackResult {
        damage: damage_with_crit(base_damage, crit_damage_percent, is_crit),
        is_crit,
    }
}

/// Seconds per animation frame for an animation with `frame_count` frames.
///
/// Up to the threshold every animation plays at the slowest speed; past it
/// the interval shrinks toward the minimum so long animations finish sooner.
pub fn animation_speed(frame_count: usize) -> f64 {
    if frame_count > ANIMATION_THRESHOLD_FRAMES {
        let speed_range = ANIMATION_MAX_SPEED - ANIMATION_MIN_SPEED;
        let adjusted = (frame_count - ANIMATION_THRESHOLD_FRAMES) as f64 / frame_count as f64
            * speed_range;
        ANIMATION_MAX_SPEED - adjusted
    } else {
        ANIMATION_MAX_SPEED
    }
}

/// One step of the base-health growth recurrence.
///
/// Returns `(new_base_health, new_growth_factor)`.
pub fn grow_base_health(
    base_health: u64,
    increase: u64,
    growth_factor: f64,
    growth_rate: f64,
) -> (u64, f64) {
    let factor = growth_factor + growth_rate;
    let step = (increase as f64 * factor).round() as u64;
    (base_health.saturating_add(step), factor)
}
