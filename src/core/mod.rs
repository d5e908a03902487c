//! Economy formulas, layout, the game loop vocabulary and the session.

pub mod constants;
pub mod economy;
pub mod game_loop;
pub mod layout;
pub mod session;

pub use game_loop::{ClickOutcome, FrameLimiter, InputEvent, SessionControl, TickResult};
pub use layout::{Point, Rect};
pub use session::{EnemyView, GameSession, PerkView, PlayerView, Snapshot};
