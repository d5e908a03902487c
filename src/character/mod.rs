//! The player and the perks it buys.

pub mod perks;
pub mod player;

pub use perks::{Perk, PerkStat, Perks, PurchaseOutcome};
pub use player::{ClickResult, Player};
