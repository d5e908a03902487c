//! The enemy and its animation state.

pub mod animation;
pub mod enemy;

pub use enemy::{Enemy, EnemyPhase, EnemyState, EnemyTick};
