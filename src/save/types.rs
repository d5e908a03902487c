//! The persisted save document and its field-by-field mapping to game types.

use super::error::SaveError;
use crate::assets::Frame;
use crate::character::perks::{Perk, PerkStat, Perks};
use crate::character::player::Player;
use crate::combat::enemy::{Enemy, EnemyState};
use crate::core::constants::{
    DEFAULT_BONUS_SCALE, DEFAULT_PRICE_SCALE, MAX_CRITICAL_RATE, MAX_PERK_LEVEL, SAVE_VERSION,
};
use crate::core::layout::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerRecord {
    pub loot: u64,
    pub loot_bonus: u32,
    pub base_damage: u32,
    pub critical_damage: u32,
    pub critical_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnemyRecord {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerkRecord {
    pub name: String,
    pub base_price: u64,
    pub base_bonus: u32,
    #[serde(default = "default_price_scale")]
    pub price_scale: f64,
    #[serde(default = "default_bonus_scale")]
    pub bonus_scale: f64,
    pub level: u32,
}

fn default_price_scale() -> f64 {
    DEFAULT_PRICE_SCALE
}

fn default_bonus_scale() -> f64 {
    DEFAULT_BONUS_SCALE
}

/// Everything persisted for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Unix timestamp of the save; 0 for documents written without one.
    #[serde(default)]
    pub last_save_time: i64,
    pub player: PlayerRecord,
    pub enemy: EnemyRecord,
    pub cr: PerkRecord,
    pub cd: PerkRecord,
    pub ld: PerkRecord,
    pub db: PerkRecord,
}

fn default_version() -> u32 {
    SAVE_VERSION
}

impl From<&Player> for PlayerRecord {
    fn from(player: &Player) -> Self {
        Self {
            loot: player.loot,
            loot_bonus: player.loot_bonus,
            base_damage: player.base_damage,
            critical_damage: player.critical_damage,
            critical_rate: player.critical_rate,
        }
    }
}

impl From<&Perk> for PerkRecord {
    fn from(perk: &Perk) -> Self {
        Self {
            name: perk.name.clone(),
            base_price: perk.base_price,
            base_bonus: perk.base_bonus,
            price_scale: perk.price_scale,
            bonus_scale: perk.bonus_scale,
            level: perk.level,
        }
    }
}

impl From<EnemyState> for EnemyRecord {
    fn from(state: EnemyState) -> Self {
        Self {
            base_health: state.base_health,
            health: state.health,
            base_health_increase: state.base_health_increase,
            base_health_growth_rate: state.base_health_growth_rate,
            base_health_growth_factor: state.base_health_growth_factor,
            enemy_count: state.enemy_count,
            is_dead: state.is_dead,
            idle_frames: state.idle_frames,
            death_frames: state.death_frames,
        }
    }
}

impl PlayerRecord {
    /// Restores the player verbatim; the damage offset is already baked in.
    pub fn into_player(self) -> Result<Player, SaveError> {
        if self.base_damage == 0 {
            return Err(SaveError::corrupt("player base_damage must be positive"));
        }
        if self.critical_rate > MAX_CRITICAL_RATE {
            return Err(SaveError::corrupt(format!(
                "player critical_rate {} exceeds {}",
                self.critical_rate, MAX_CRITICAL_RATE
            )));
        }
        Ok(Player {
            loot: self.loot,
            loot_bonus: self.loot_bonus,
            base_damage: self.base_damage,
            critical_damage: self.critical_damage,
            critical_rate: self.critical_rate,
        })
    }
}

fn validate_frames(label: &str, frames: &[Frame]) -> Result<(), SaveError> {
    if frames.is_empty() {
        return Err(SaveError::corrupt(format!("enemy {} are empty", label)));
    }
    if let Some(index) = frames.iter().position(|f| !f.is_well_formed()) {
        return Err(SaveError::corrupt(format!(
            "enemy {}[{}] pixel buffer does not match its size",
            label, index
        )));
    }
    Ok(())
}

impl EnemyRecord {
    pub fn into_enemy(self, position: Point) -> Result<Enemy, SaveError> {
        if self.base_health == 0 {
            return Err(SaveError::corrupt("enemy base_health must be positive"));
        }
        if self.health > self.base_health {
            return Err(SaveError::corrupt(format!(
                "enemy health {} exceeds base_health {}",
                self.health, self.base_health
            )));
        }
        if self.base_health_growth_factor.is_nan() || self.base_health_growth_factor < 1.0 {
            return Err(SaveError::corrupt(
                "enemy base_health_growth_factor must be at least 1.0",
            ));
        }
        if !self.base_health_growth_rate.is_finite() || self.base_health_growth_rate < 0.0 {
            return Err(SaveError::corrupt(
                "enemy base_health_growth_rate must be a non-negative number",
            ));
        }
        validate_frames("idle_frames", &self.idle_frames)?;
        validate_frames("death_frames", &self.death_frames)?;

        Ok(Enemy::from_state(
            position,
            EnemyState {
                base_health: self.base_health,
                health: self.health,
                base_health_increase: self.base_health_increase,
                base_health_growth_rate: self.base_health_growth_rate,
                base_health_growth_factor: self.base_health_growth_factor,
                enemy_count: self.enemy_count,
                is_dead: self.is_dead,
                idle_frames: self.idle_frames,
                death_frames: self.death_frames,
            },
        ))
    }
}

impl PerkRecord {
    /// Restores the perk stored under `stat`'s slot.
    pub fn into_perk(self, stat: PerkStat) -> Result<Perk, SaveError> {
        if self.name != stat.code() {
            return Err(SaveError::corrupt(format!(
                "perk under '{}' is named '{}', expected '{}'",
                stat.save_key(),
                self.name,
                stat.code()
            )));
        }
        if self.base_price == 0 {
            return Err(SaveError::corrupt(format!(
                "perk {} base_price must be positive",
                self.name
            )));
        }
        if !self.price_scale.is_finite() || self.price_scale < 1.0 {
            return Err(SaveError::corrupt(format!(
                "perk {} price_scale {} must be a finite number of at least 1.0",
                self.name, self.price_scale
            )));
        }
        if !self.bonus_scale.is_finite() || self.bonus_scale < 0.0 {
            return Err(SaveError::corrupt(format!(
                "perk {} bonus_scale {} must be a finite non-negative number",
                self.name, self.bonus_scale
            )));
        }
        if self.level > MAX_PERK_LEVEL {
            return Err(SaveError::corrupt(format!(
                "perk {} level {} exceeds {}",
                self.name, self.level, MAX_PERK_LEVEL
            )));
        }
        Ok(Perk {
            name: self.name,
            base_price: self.base_price,
            base_bonus: self.base_bonus,
            price_scale: self.price_scale,
            bonus_scale: self.bonus_scale,
            level: self.level,
            stat,
        })
    }
}

impl SaveDocument {
    pub fn capture(player: &Player, enemy: &Enemy, perks: &Perks, saved_at: i64) -> Self {
        Self {
            version: SAVE_VERSION,
            last_save_time: saved_at,
            player: player.into(),
            enemy: enemy.to_state().into(),
            cr: (&perks.crit_rate).into(),
            cd: (&perks.crit_damage).into(),
            ld: (&perks.loot_bonus).into(),
            db: (&perks.damage_bonus).into(),
        }
    }

    /// Converts the whole document or fails without producing anything.
    pub fn restore(self, enemy_position: Point) -> Result<(Player, Enemy, Perks), SaveError> {
        if self.version > SAVE_VERSION {
            return Err(SaveError::corrupt(format!(
                "save version {} is newer than supported {}",
                self.version, SAVE_VERSION
            )));
        }
        let player = self.player.into_player()?;
        let enemy = self.enemy.into_enemy(enemy_position)?;
        let perks = Perks {
            crit_rate: self.cr.into_perk(PerkStat::CriticalRate)?,
            crit_damage: self.cd.into_perk(PerkStat::CriticalDamage)?,
            loot_bonus: self.ld.into_perk(PerkStat::LootBonus)?,
            damage_bonus: self.db.into_perk(PerkStat::BaseDamage)?,
        };
        Ok((player, enemy, perks))
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(json)?)
    }
}
