//! Shape Catcher simulation
//!
//! Shapes rain from the top of the arena; the player slides a paddle along
//! the bottom to catch them. Every catch scores points and quickens the
//! spawn cadence; every miss costs a life.

pub mod state;
pub mod tick;

pub use state::{CatcherState, Shape, ShapeKind};
pub use tick::{TickInput, tick};
