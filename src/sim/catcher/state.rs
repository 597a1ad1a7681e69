//! Shape Catcher game state

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::GamePhase;
use crate::sim::collision::Aabb;

/// The five falling shape varieties. The star is the biggest target and
/// pays a small bonus for the trouble of lining it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Star,
    Hexagon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Star,
        ShapeKind::Hexagon,
    ];

    /// Bounding box edge length
    pub fn size(self) -> f32 {
        match self {
            ShapeKind::Circle | ShapeKind::Square => 50.0,
            ShapeKind::Triangle => 60.0,
            ShapeKind::Star => 70.0,
            ShapeKind::Hexagon => 55.0,
        }
    }

    /// Points awarded on catch
    pub fn points(self) -> u32 {
        match self {
            ShapeKind::Star => 15,
            _ => 10,
        }
    }
}

/// A falling shape
#[derive(Debug, Clone)]
pub struct Shape {
    pub kind: ShapeKind,
    pub pos: Vec2,
}

impl Shape {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.kind.size())
    }
}

/// Complete Shape Catcher state, advanced by [`super::tick::tick`]
#[derive(Debug, Clone)]
pub struct CatcherState {
    /// Arena dimensions in pixels
    pub arena: Vec2,
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    /// Horizontal center of the catcher paddle
    pub catcher_x: f32,
    pub shapes: Vec<Shape>,
    /// Ticks until the next shape drops
    pub spawn_timer: u32,
    /// Current spawn interval; shrinks with every catch
    pub spawn_interval_ms: f32,
    pub time_ticks: u64,
    pub(super) rng: Pcg32,
}

impl CatcherState {
    pub fn new(arena: Vec2, seed: u64) -> Self {
        Self {
            arena,
            seed,
            phase: GamePhase::Playing,
            score: 0,
            lives: CATCHER_LIVES,
            catcher_x: arena.x / 2.0,
            shapes: Vec::new(),
            // First shape drops on the first tick
            spawn_timer: 0,
            spawn_interval_ms: SHAPE_INTERVAL_MS,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Current drop speed, px/s. Starts at 6 px/tick and gains a pixel per
    /// tick for every 40 points scored.
    pub fn drop_speed(&self) -> f32 {
        (SHAPE_DROP_PIXELS + (self.score / 40) as f32) * 50.0
    }

    /// Current spawn interval in ticks
    pub fn spawn_interval_ticks(&self) -> u32 {
        ((self.spawn_interval_ms as u64) / TICK_MS).max(1) as u32
    }

    /// The catcher paddle's collision box
    pub fn catcher_bounds(&self) -> Aabb {
        let center_y = self.arena.y - CATCHER_BOTTOM_MARGIN - CATCHER_HEIGHT / 2.0;
        Aabb::new(
            Vec2::new(self.catcher_x, center_y),
            Vec2::new(CATCHER_WIDTH, CATCHER_HEIGHT),
        )
    }

    /// Drop one random shape just above the top edge
    pub fn spawn_shape(&mut self) {
        let kind = ShapeKind::ALL[self.rng.random_range(0..ShapeKind::ALL.len())];
        let size = kind.size();
        let x = self.rng.random_range(size..self.arena.x - size);
        self.shapes.push(Shape {
            kind,
            pos: Vec2::new(x, -size),
        });
    }
}
