//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (20 ms ticks)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod catcher;
pub mod collision;
pub mod war;

pub use collision::Aabb;
pub use war::{WarMode, WarState};

/// Current phase of gameplay, shared by every game in the suite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Paused,
    GameOver,
}
