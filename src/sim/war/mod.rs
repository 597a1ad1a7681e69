//! Space War simulation
//!
//! A vertical-scrolling shooter in single (Solo) and two player (Duo)
//! variants. Duo adds boss waves between levels and an endless mode once
//! the level table is exhausted; Solo instead scales the level parameters
//! indefinitely.

pub mod levels;
pub mod state;
pub mod tick;

pub use levels::{LevelParams, next_level_threshold, params_for_level};
pub use state::{
    Boss, Bullet, BulletOwner, Enemy, Explosion, GamePhase, Player, PlayerId, WarMode, WarState,
};
pub use tick::{PlayerInput, TickInput, tick};
