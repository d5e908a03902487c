//! Integration test: enemy kill/death/respawn cycle driven through a session.
//!
//! Covers the two-phase death (health hits zero on the click, the death is
//! committed on the following tick), the base-health recurrence across
//! respawns, and clicks that must not change anything.

use enemy_clicker::assets::GeneratedAssets;
use enemy_clicker::combat::EnemyPhase;
use enemy_clicker::config::GameConfig;
use enemy_clicker::core::{ClickOutcome, GameSession, Point};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn new_session(seed: u64) -> GameSession<ChaCha8Rng> {
    GameSession::new(
        GameConfig::headless(),
        Box::new(GeneratedAssets::default()),
        ChaCha8Rng::seed_from_u64(seed),
    )
}

fn click_enemy(session: &mut GameSession<ChaCha8Rng>) -> ClickOutcome {
    let point = session.enemy().rect().center();
    session.on_click(point)
}

/// Clicks until the killing blow lands. No ticks run in between.
fn kill(session: &mut GameSession<ChaCha8Rng>) {
    for _ in 0..1000 {
        if !session.enemy().is_alive() {
            return;
        }
        click_enemy(session);
    }
    panic!("enemy did not die within 1000 clicks");
}

/// Ticks until the enemy respawns, returning the new base health.
fn tick_until_respawn(session: &mut GameSession<ChaCha8Rng>) -> u64 {
    for _ in 0..1000 {
        if let Some(base_health) = session.on_tick().enemy_respawned {
            return base_health;
        }
    }
    panic!("enemy did not respawn within 1000 ticks");
}

#[test]
fn test_death_is_committed_on_next_tick() {
    let mut session = new_session(7);
    kill(&mut session);

    assert_eq!(session.enemy().phase(), EnemyPhase::PendingDeath);
    assert_eq!(session.enemy().health(), 0);
    assert_eq!(session.enemy().enemy_count(), 0);
    assert!(!session.enemy().is_dead());

    let tick = session.on_tick();
    assert!(tick.enemy_died);
    assert_eq!(tick.enemy_respawned, None);
    assert_eq!(session.enemy().phase(), EnemyPhase::Dying);
    assert_eq!(session.enemy().enemy_count(), 1);
    assert!(session.enemy().is_dead());

    // Only one death per kill
    assert!(!session.on_tick().enemy_died);
}

#[test]
fn test_base_health_recurrence_across_respawns() {
    let mut session = new_session(7);

    kill(&mut session);
    assert_eq!(tick_until_respawn(&mut session), 16);
    assert_eq!(session.enemy().health(), 16);
    assert_eq!(session.enemy().phase(), EnemyPhase::Alive);
    assert_eq!(session.enemy().tier(), 1);

    kill(&mut session);
    assert_eq!(tick_until_respawn(&mut session), 23);
    assert_eq!(session.enemy().enemy_count(), 2);
    assert!((session.enemy().growth_factor() - 1.4).abs() < 1e-9);
}

#[test]
fn test_kill_loot_within_variance() {
    let mut session = new_session(99);
    for _ in 0..1000 {
        if let ClickOutcome::Attack(result) = click_enemy(&mut session) {
            if result.killed() {
                // sqrt(10) * [0.8, 1.2], floored
                assert!((2..=3).contains(&result.loot_dropped));
                assert_eq!(result.loot_gained, result.loot_dropped);
                assert_eq!(session.player().loot, result.loot_gained);
                return;
            }
        }
    }
    panic!("no killing blow");
}

#[test]
fn test_clicks_on_dying_enemy_change_nothing() {
    let mut session = new_session(3);
    kill(&mut session);
    let loot = session.player().loot;

    // Pending death: the enemy is no longer alive
    assert_eq!(click_enemy(&mut session), ClickOutcome::Ignored);

    session.on_tick();
    assert_eq!(click_enemy(&mut session), ClickOutcome::Ignored);
    assert_eq!(session.player().loot, loot);
    assert_eq!(session.enemy().health(), 0);
    assert_eq!(session.enemy().enemy_count(), 1);
}

#[test]
fn test_click_outside_enemy_is_ignored() {
    let mut session = new_session(3);
    let before = session.snapshot();

    assert_eq!(session.on_click(Point::new(5, 5)), ClickOutcome::Ignored);
    let rect = session.enemy().rect();
    let just_outside = Point::new(rect.x + rect.width, rect.y + rect.height);
    assert_eq!(session.on_click(just_outside), ClickOutcome::Ignored);

    assert_eq!(session.snapshot(), before);
    assert!(!session.enemy().is_squashing());
}

#[test]
fn test_hit_starts_squash() {
    let mut session = new_session(3);
    click_enemy(&mut session);
    assert!(session.enemy().is_squashing());

    session.on_tick();
    let (width, height) = session.enemy().size();
    assert!(width < 250 && height < 250);
}
