//! Save/load of the whole session as one JSON document.

pub mod error;
pub mod manager;
pub mod types;

pub use error::SaveError;
pub use manager::SaveManager;
pub use types::{EnemyRecord, PerkRecord, PlayerRecord, SaveDocument};
