//! Session configuration.

use crate::core::constants::{
    AUTOSAVE_INTERVAL_SECONDS, DISPLAY_HEIGHT, DISPLAY_WIDTH, STARTING_BASE_DAMAGE,
    STARTING_CRITICAL_DAMAGE, STARTING_CRITICAL_RATE, STARTING_LOOT, STARTING_LOOT_BONUS,
    TICKS_PER_SECOND,
};
use crate::core::layout::Point;
use log::LevelFilter;
use std::path::PathBuf;

/// Stats a brand-new player starts with (before the damage offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartingStats {
    pub loot: u64,
    pub loot_bonus: u32,
    pub base_damage: u32,
    pub critical_damage: u32,
    pub critical_rate: u32,
}

impl Default for StartingStats {
    fn default() -> Self {
        Self {
            loot: STARTING_LOOT,
            loot_bonus: STARTING_LOOT_BONUS,
            base_damage: STARTING_BASE_DAMAGE,
            critical_damage: STARTING_CRITICAL_DAMAGE,
            critical_rate: STARTING_CRITICAL_RATE,
        }
    }
}

/// Where log output goes and how much of it.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default level when `RUST_LOG` is not set.
    pub level: LevelFilter,
    /// Write to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            file: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub display_width: i32,
    pub display_height: i32,
    /// Centre of the enemy sprite.
    pub enemy_position: Point,
    pub starting_stats: StartingStats,
    /// Fixed update cadence.
    pub ticks_per_second: u32,
    /// Ticks between autosaves; 0 disables autosave.
    pub autosave_interval_ticks: u64,
    /// Save file override; `None` uses the platform config directory.
    pub save_path: Option<PathBuf>,
    pub log: LogConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
            enemy_position: Point::new(DISPLAY_WIDTH / 2 - 20, DISPLAY_HEIGHT / 2 + 50),
            starting_stats: StartingStats::default(),
            ticks_per_second: TICKS_PER_SECOND,
            autosave_interval_ticks: AUTOSAVE_INTERVAL_SECONDS * TICKS_PER_SECOND as u64,
            save_path: None,
            log: LogConfig::default(),
        }
    }
}

impl GameConfig {
    /// Headless runs: no autosave, quieter logging.
    pub fn headless() -> Self {
        Self {
            autosave_interval_ticks: 0,
            log: LogConfig {
                level: LevelFilter::Warn,
                file: None,
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = GameConfig::default();
        assert_eq!(config.enemy_position, Point::new(380, 300));
        assert_eq!(config.autosave_interval_ticks, 1800);
    }

    #[test]
    fn test_headless_disables_autosave() {
        let config = GameConfig::headless();
        assert_eq!(config.autosave_interval_ticks, 0);
        assert_eq!(config.ticks_per_second, TICKS_PER_SECOND);
    }
}
