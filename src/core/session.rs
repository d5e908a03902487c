//! The game session: one player, one enemy, four perks, one random source.
//!
//! Every entry point runs to completion before returning; the outer loop
//! calls them one at a time from a single thread.

use crate::assets::{AssetProvider, Frame};
use crate::character::perks::{PerkStat, Perks, PurchaseOutcome};
use crate::character::player::Player;
use crate::combat::enemy::Enemy;
use crate::config::GameConfig;
use crate::core::game_loop::{ClickOutcome, InputEvent, SessionControl, TickResult};
use crate::core::layout::{button_at, shop_buttons, Point, ShopButton};
use crate::save::{SaveDocument, SaveError, SaveManager};
use chrono::Utc;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Read-only view of the player for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerView {
    pub loot: u64,
    pub loot_bonus: u32,
    pub base_damage: u32,
    pub critical_rate: u32,
    pub critical_damage: u32,
}

/// Read-only view of the enemy for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyView {
    pub health: u64,
    pub base_health: u64,
    pub health_fraction: f64,
    pub is_dead: bool,
    pub position: Point,
    pub size: (i32, i32),
    pub frame_index: usize,
    pub tier: u32,
    pub enemy_count: u32,
}

/// Read-only view of one perk for the shop panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerkView {
    pub stat: PerkStat,
    pub name: String,
    pub price: u64,
    pub bonus: u32,
    pub level: u32,
    pub affordable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub player: PlayerView,
    pub enemy: EnemyView,
    pub perks: Vec<PerkView>,
    pub paused: bool,
}

pub struct GameSession<R: Rng = StdRng> {
    config: GameConfig,
    player: Player,
    enemy: Enemy,
    perks: Perks,
    assets: Box<dyn AssetProvider>,
    rng: R,
    paused: bool,
    ticks: u64,
}

impl GameSession<StdRng> {
    /// A fresh session seeded from OS entropy.
    pub fn from_entropy(config: GameConfig, assets: Box<dyn AssetProvider>) -> Self {
        Self::new(config, assets, StdRng::from_entropy())
    }
}

impl<R: Rng> GameSession<R> {
    /// A fresh session drawing every random roll from `rng`.
    pub fn new(config: GameConfig, assets: Box<dyn AssetProvider>, rng: R) -> Self {
        let stats = config.starting_stats;
        let player = Player::new(
            stats.loot,
            stats.loot_bonus,
            stats.base_damage,
            stats.critical_damage,
            stats.critical_rate,
        );
        let enemy = Enemy::new(config.enemy_position, assets.as_ref());
        Self {
            config,
            player,
            enemy,
            perks: Perks::default(),
            assets,
            rng,
            paused: false,
            ticks: 0,
        }
    }

    /// Advances the enemy one step. Does nothing while paused.
    pub fn on_tick(&mut self) -> TickResult {
        if self.paused {
            return TickResult::default();
        }
        self.ticks += 1;

        let enemy_tick = self.enemy.update(self.assets.as_ref());
        let interval = self.config.autosave_interval_ticks;
        TickResult {
            enemy_died: enemy_tick.died,
            enemy_respawned: enemy_tick.respawned_with,
            autosave_due: interval > 0 && self.ticks % interval == 0,
        }
    }

    /// Resolves a click: a BUY button wins, otherwise the enemy is attacked.
    pub fn on_click(&mut self, point: Point) -> ClickOutcome {
        if self.paused {
            return ClickOutcome::Ignored;
        }
        if let Some(stat) = button_at(self.config.display_width, point) {
            return ClickOutcome::Shop(self.buy_perk(stat));
        }
        match self.player.click(&mut self.enemy, point, &mut self.rng) {
            Some(result) => {
                if result.killed() {
                    debug!(
                        "killing blow for {} damage, +{} loot",
                        result.attack.damage, result.loot_gained
                    );
                }
                ClickOutcome::Attack(result)
            }
            None => ClickOutcome::Ignored,
        }
    }

    /// Buys one level of a perk: pay and apply together, or change nothing.
    pub fn buy_perk(&mut self, stat: PerkStat) -> PurchaseOutcome {
        let outcome = self.perks.buy(stat, &mut self.player);
        match outcome {
            PurchaseOutcome::Purchased {
                price,
                bonus,
                new_level,
                ..
            } => info!(
                "bought {} for {} loot (+{}, now level {})",
                stat.code(),
                price,
                bonus,
                new_level
            ),
            PurchaseOutcome::InsufficientFunds { price, loot } => debug!(
                "cannot afford {}: costs {}, have {}",
                stat.code(),
                price,
                loot
            ),
            PurchaseOutcome::Maxed => debug!("{} is already maxed", stat.code()),
        }
        outcome
    }

    pub fn on_pause(&mut self) {
        self.paused = true;
    }

    pub fn on_resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Dispatches one input event. `Quit` saves on a best-effort basis.
    pub fn handle_input(&mut self, event: InputEvent, saves: &SaveManager) -> SessionControl {
        match event {
            InputEvent::PointerDown(point) => {
                self.on_click(point);
            }
            InputEvent::PointerUp => {}
            InputEvent::Escape => {
                debug!("escape pressed");
                if self.paused {
                    self.on_resume();
                } else {
                    self.on_pause();
                }
            }
            InputEvent::Quit => {
                if let Err(e) = self.save_to(saves) {
                    error!("could not save before exit: {}", e);
                }
                return SessionControl::Quit;
            }
        }
        SessionControl::Continue
    }

    /// Captures the whole session as a save document.
    pub fn save(&self) -> SaveDocument {
        SaveDocument::capture(
            &self.player,
            &self.enemy,
            &self.perks,
            Utc::now().timestamp(),
        )
    }

    /// Replaces the session state with `document`.
    ///
    /// Either everything is restored or nothing is: on error the current
    /// player, enemy and perks are left as they were.
    pub fn load(&mut self, document: SaveDocument) -> Result<(), SaveError> {
        let (player, enemy, perks) = document.restore(self.config.enemy_position)?;
        self.player = player;
        self.enemy = enemy;
        self.perks = perks;
        Ok(())
    }

    pub fn save_to(&self, saves: &SaveManager) -> Result<(), SaveError> {
        saves.save(&self.save())
    }

    /// Loads from disk. A missing save is reported but is not fatal to the
    /// caller; the session simply stays as it is.
    pub fn load_from(&mut self, saves: &SaveManager) -> Result<(), SaveError> {
        let result = saves.load().and_then(|document| self.load(document));
        match &result {
            Ok(()) => info!("continuing saved game"),
            Err(SaveError::MissingSaveFile) => {
                warn!("no save file at {}", saves.path().display())
            }
            Err(e) => error!("failed to load save: {}", e),
        }
        result
    }

    pub fn snapshot(&self) -> Snapshot {
        let enemy = &self.enemy;
        Snapshot {
            player: PlayerView {
                loot: self.player.loot,
                loot_bonus: self.player.loot_bonus,
                base_damage: self.player.base_damage,
                critical_rate: self.player.critical_rate,
                critical_damage: self.player.critical_damage,
            },
            enemy: EnemyView {
                health: enemy.health(),
                base_health: enemy.base_health(),
                health_fraction: enemy.health_fraction(),
                is_dead: enemy.is_dead(),
                position: enemy.position(),
                size: enemy.size(),
                frame_index: enemy.frame_index(),
                tier: enemy.tier(),
                enemy_count: enemy.enemy_count(),
            },
            perks: self
                .perks
                .iter()
                .map(|perk| PerkView {
                    stat: perk.stat,
                    name: perk.name.clone(),
                    price: perk.price(),
                    bonus: perk.bonus(),
                    level: perk.level,
                    affordable: !perk.is_maxed_for(&self.player)
                        && perk.price() <= self.player.loot,
                })
                .collect(),
            paused: self.paused,
        }
    }

    /// Frame the renderer should draw for the enemy right now.
    pub fn current_enemy_frame(&self) -> Option<&Frame> {
        self.enemy.current_frame()
    }

    pub fn shop_buttons(&self) -> [ShopButton; 4] {
        shop_buttons(self.config.display_width)
    }

    /// Centre of the BUY button for `stat`.
    pub fn buy_button_center(&self, stat: PerkStat) -> Point {
        self.shop_buttons()[stat.shop_index()].rect.center()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn perks(&self) -> &Perks {
        &self.perks
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::GeneratedAssets;
    use rand_chacha::ChaCha8Rng;

    fn new_session() -> GameSession<ChaCha8Rng> {
        GameSession::new(
            GameConfig::default(),
            Box::new(GeneratedAssets::default()),
            ChaCha8Rng::seed_from_u64(12345),
        )
    }

    fn enemy_center(session: &GameSession<ChaCha8Rng>) -> Point {
        session.enemy().rect().center()
    }

    #[test]
    fn test_new_session_defaults() {
        let session = new_session();
        assert_eq!(session.player().base_damage, 6);
        assert_eq!(session.enemy().base_health(), 10);
        assert_eq!(session.perks().iter().count(), 4);
        assert!(!session.is_paused());
    }

    #[test]
    fn test_click_enemy_attacks() {
        let mut session = new_session();
        let point = enemy_center(&session);
        let outcome = session.on_click(point);
        assert!(matches!(outcome, ClickOutcome::Attack(_)));
        assert_eq!(session.enemy().health(), 4);
    }

    #[test]
    fn test_click_buy_button_purchases_instead_of_attacking() {
        let mut session = new_session();
        session.player_mut().loot = 50;
        let point = session.buy_button_center(PerkStat::BaseDamage);

        let outcome = session.on_click(point);

        assert!(matches!(
            outcome,
            ClickOutcome::Shop(PurchaseOutcome::Purchased { price: 50, .. })
        ));
        assert_eq!(session.player().loot, 0);
        assert_eq!(session.player().base_damage, 11);
        assert_eq!(session.enemy().health(), 10);
    }

    #[test]
    fn test_buy_button_without_funds_is_rejected() {
        let mut session = new_session();
        let point = session.buy_button_center(PerkStat::CriticalRate);
        let outcome = session.on_click(point);
        assert_eq!(
            outcome,
            ClickOutcome::Shop(PurchaseOutcome::InsufficientFunds { price: 100, loot: 0 })
        );
        assert_eq!(session.perks().crit_rate.level, 0);
    }

    #[test]
    fn test_paused_session_ignores_clicks_and_ticks() {
        let mut session = new_session();
        session.on_pause();
        let point = enemy_center(&session);
        assert_eq!(session.on_click(point), ClickOutcome::Ignored);
        assert_eq!(session.on_tick(), TickResult::default());
        assert_eq!(session.ticks(), 0);
        assert_eq!(session.enemy().health(), 10);

        session.on_resume();
        assert!(matches!(session.on_click(point), ClickOutcome::Attack(_)));
    }

    #[test]
    fn test_kill_then_tick_reports_death() {
        let mut session = new_session();
        let point = enemy_center(&session);
        session.on_click(point);
        let outcome = session.on_click(point);
        let ClickOutcome::Attack(result) = outcome else {
            panic!("expected attack, got {:?}", outcome);
        };
        assert!(result.killed());
        assert_eq!(session.player().loot, result.loot_gained);

        let tick = session.on_tick();
        assert!(tick.enemy_died);
        assert!(session.snapshot().enemy.is_dead);
    }

    #[test]
    fn test_autosave_due_on_interval() {
        let config = GameConfig {
            autosave_interval_ticks: 3,
            ..GameConfig::default()
        };
        let mut session = GameSession::new(
            config,
            Box::new(GeneratedAssets::default()),
            ChaCha8Rng::seed_from_u64(1),
        );
        let due: Vec<bool> = (0..6).map(|_| session.on_tick().autosave_due).collect();
        assert_eq!(due, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn test_escape_toggles_pause() {
        let mut session = new_session();
        let saves = SaveManager::at(std::env::temp_dir().join("enemy-clicker-unused.json"));
        assert_eq!(
            session.handle_input(InputEvent::Escape, &saves),
            SessionControl::Continue
        );
        assert!(session.is_paused());
        session.handle_input(InputEvent::Escape, &saves);
        assert!(!session.is_paused());
    }

    #[test]
    fn test_failed_load_leaves_session_untouched() {
        let mut session = new_session();
        session.player_mut().loot = 77;
        let mut document = session.save();
        document.player.loot = 1;
        document.enemy.health = document.enemy.base_health + 5;

        assert!(session.load(document).is_err());
        assert_eq!(session.player().loot, 77);
        assert_eq!(session.enemy().health(), 10);
    }

    #[test]
    fn test_snapshot_perks_in_shop_order() {
        let mut session = new_session();
        session.player_mut().loot = 60;
        let snapshot = session.snapshot();
        let names: Vec<&str> = snapshot.perks.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["CR", "CD", "LB", "DB"]);
        let affordable: Vec<bool> = snapshot.perks.iter().map(|p| p.affordable).collect();
        assert_eq!(affordable, vec![false, true, false, true]);
        assert_eq!(snapshot.enemy.health_fraction, 1.0);
    }
}
