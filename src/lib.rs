//! Enemy Clicker - progression and economy core of a click-to-attack game.
//!
//! Rendering and real input are left to the embedding front end; this
//! library owns the rules, the state and its persistence.

pub mod assets;
pub mod character;
pub mod combat;
pub mod config;
pub mod core;
pub mod logging;
pub mod save;

pub use assets::{AnimationKind, AssetProvider, Frame, GeneratedAssets};
pub use character::{Perk, PerkStat, Perks, Player, PurchaseOutcome};
pub use combat::{Enemy, EnemyPhase};
pub use config::GameConfig;
pub use crate::core::{ClickOutcome, GameSession, InputEvent, Point, SessionControl, TickResult};
pub use save::{SaveDocument, SaveError, SaveManager};
