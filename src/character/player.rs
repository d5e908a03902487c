use crate::combat::enemy::Enemy;
use crate::core::constants::{
    BASE_DAMAGE_OFFSET, STARTING_BASE_DAMAGE, STARTING_CRITICAL_DAMAGE, STARTING_CRITICAL_RATE,
    STARTING_LOOT, STARTING_LOOT_BONUS,
};
use crate::core::economy::{calculate_attack, reward_with_bonus, AttackResult};
use crate::core::layout::Point;
use log::debug;
use rand::Rng;

/// The clicking player: currency plus combat stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Spendable currency.
    pub loot: u64,
    /// Percentage bonus applied to loot gained.
    pub loot_bonus: u32,
    /// Damage per non-critical hit.
    pub base_damage: u32,
    /// Percentage damage bonus on a critical hit.
    pub critical_damage: u32,
    /// Percent chance per hit of a critical, 0-100.
    pub critical_rate: u32,
}

/// What a qualifying click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickResult {
    pub attack: AttackResult,
    /// This hit took the enemy's health to zero.
    pub killing_blow: bool,
    /// Raw loot dropped by the enemy (0 unless this was the killing blow).
    pub loot_dropped: u64,
    /// Loot credited to the player after the loot bonus.
    pub loot_gained: u64,
}

impl ClickResult {
    pub fn killed(&self) -> bool {
        self.killing_blow
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(
            STARTING_LOOT,
            STARTING_LOOT_BONUS,
            STARTING_BASE_DAMAGE,
            STARTING_CRITICAL_DAMAGE,
            STARTING_CRITICAL_RATE,
        )
    }
}

impl Player {
    /// Creates a player. `base_damage` gets the fixed damage offset added.
    pub fn new(
        loot: u64,
        loot_bonus: u32,
        base_damage: u32,
        critical_damage: u32,
        critical_rate: u32,
    ) -> Self {
        Self {
            loot,
            loot_bonus,
            base_damage: base_damage + BASE_DAMAGE_OFFSET,
            critical_damage,
            critical_rate,
        }
    }

    /// Rolls one hit. Consumes exactly one random draw.
    pub fn calculate_damage(&self, rng: &mut impl Rng) -> AttackResult {
        calculate_attack(
            self.base_damage,
            self.critical_rate,
            self.critical_damage,
            rng,
        )
    }

    pub fn calculate_reward(&self, raw_reward: u64) -> u64 {
        reward_with_bonus(raw_reward, self.loot_bonus)
    }

    /// Resolves a click at `point` against `enemy`.
    ///
    /// Returns `None` (and touches nothing) when the point misses the enemy's
    /// current hit region or the enemy is not alive.
    pub fn click(
        &mut self,
        enemy: &mut Enemy,
        point: Point,
        rng: &mut impl Rng,
    ) -> Option<ClickResult> {
        debug!("player clicked at ({}, {})", point.x, point.y);
        if !enemy.rect().contains(point) || !enemy.is_alive() {
            return None;
        }

        enemy.play_click_animation();
        let attack = self.calculate_damage(rng);
        let loot_dropped = enemy.hit(attack.damage, rng);
        let killing_blow = !enemy.is_alive();
        let loot_gained = if loot_dropped > 0 {
            self.calculate_reward(loot_dropped)
        } else {
            0
        };
        self.loot = self.loot.saturating_add(loot_gained);

        Some(ClickResult {
            attack,
            killing_blow,
            loot_dropped,
            loot_gained,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::GeneratedAssets;
    use crate::core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn test_enemy() -> Enemy {
        Enemy::new(
            Point::new(DISPLAY_WIDTH / 2 - 20, DISPLAY_HEIGHT / 2 + 50),
            &GeneratedAssets::default(),
        )
    }

    #[test]
    fn test_new_player_adds_damage_offset() {
        let player = Player::new(0, 0, 1, 1, 0);
        assert_eq!(player.base_damage, 6);
        assert_eq!(Player::default(), player);
    }

    #[test]
    fn test_calculate_damage_without_crit() {
        let player = Player::new(0, 0, 5, 50, 0);
        let mut rng = create_test_rng();
        for _ in 0..100 {
            let attack = player.calculate_damage(&mut rng);
            assert!(!attack.is_crit);
            assert_eq!(attack.damage, 10);
        }
    }

    #[test]
    fn test_calculate_damage_always_crit() {
        let player = Player::new(0, 0, 5, 50, 100);
        let mut rng = create_test_rng();
        let attack = player.calculate_damage(&mut rng);
        assert!(attack.is_crit);
        assert_eq!(attack.damage, 15);
    }

    #[test]
    fn test_calculate_reward_applies_bonus() {
        let mut player = Player::default();
        assert_eq!(player.calculate_reward(4), 4);
        player.loot_bonus = 50;
        assert_eq!(player.calculate_reward(4), 6);
    }

    #[test]
    fn test_click_outside_enemy_is_ignored() {
        let mut player = Player::default();
        let mut enemy = test_enemy();
        let mut rng = create_test_rng();

        let result = player.click(&mut enemy, Point::new(5, 5), &mut rng);

        assert!(result.is_none());
        assert_eq!(player.loot, 0);
        assert_eq!(enemy.health(), enemy.base_health());
    }

    #[test]
    fn test_click_on_enemy_deals_damage() {
        let mut player = Player::new(0, 0, 1, 0, 0);
        let mut enemy = test_enemy();
        let mut rng = create_test_rng();
        let center = enemy.rect().center();

        let result = player.click(&mut enemy, center, &mut rng).unwrap();

        assert_eq!(result.attack.damage, 6);
        assert!(!result.killed());
        assert_eq!(enemy.health(), 4);
        assert_eq!(player.loot, 0);
    }

    #[test]
    fn test_killing_click_credits_loot() {
        let mut player = Player::new(0, 0, 5, 0, 0);
        let mut enemy = test_enemy();
        let mut rng = create_test_rng();
        let center = enemy.rect().center();

        let result = player.click(&mut enemy, center, &mut rng).unwrap();

        // sqrt(10) * [0.8, 1.2] floors to 2 or 3
        assert!(result.killed());
        assert!((2..=3).contains(&result.loot_dropped));
        assert_eq!(player.loot, result.loot_gained);
        assert_eq!(result.loot_gained, result.loot_dropped);
    }

    #[test]
    fn test_killing_blow_reported_when_no_loot_drops() {
        let mut zero_loot_kills = 0;
        for seed in 0..32 {
            let mut state = test_enemy().to_state();
            state.base_health = 1;
            state.health = 1;
            let mut enemy = Enemy::from_state(Point::new(380, 300), state);
            let mut player = Player::default();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let center = enemy.rect().center();

            let result = player.click(&mut enemy, center, &mut rng).unwrap();

            // floor(sqrt(1) * [0.8, 1.2]) is 0 or 1
            assert!(result.killed());
            assert!(!enemy.is_alive());
            if result.loot_dropped == 0 {
                zero_loot_kills += 1;
            }
        }
        assert!(zero_loot_kills > 0);
    }

    #[test]
    fn test_loot_saturates() {
        let mut player = Player {
            loot: u64::MAX - 1,
            ..Player::new(0, 0, 5, 0, 0)
        };
        let mut enemy = test_enemy();
        let mut rng = create_test_rng();
        let center = enemy.rect().center();

        let result = player.click(&mut enemy, center, &mut rng).unwrap();
        assert!(result.killed());
        assert_eq!(player.loot, u64::MAX);
    }

    #[test]
    fn test_click_on_dying_enemy_is_ignored() {
        let mut player = Player::new(0, 0, 5, 0, 0);
        let mut enemy = test_enemy();
        let mut rng = create_test_rng();
        let center = enemy.rect().center();

        player.click(&mut enemy, center, &mut rng).unwrap();
        let loot_after_kill = player.loot;

        // Same frame, before the tick marks the death
        assert!(player.click(&mut enemy, center, &mut rng).is_none());
        assert_eq!(player.loot, loot_after_kill);

        enemy.update(&GeneratedAssets::default());
        assert!(enemy.is_dead());
        assert!(player.click(&mut enemy, center, &mut rng).is_none());
        assert_eq!(player.loot, loot_after_kill);
        assert_eq!(enemy.health(), 0);
    }
}
