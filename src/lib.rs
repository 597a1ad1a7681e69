//! Astro Arcade - a small suite of fixed-tick arcade games
//!
//! Core modules:
//! - `sim`: Deterministic simulations (Space War, Space War 2P, Shape Catcher)
//! - `highscores`: Top-10 leaderboard per game
//! - `persistence`: Final-score rows written at game over
//! - `settings`: Arena dimensions and data paths

pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz, the classic 20 ms arcade tick)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Tick interval in milliseconds
    pub const TICK_MS: u64 = 20;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    // --- Space War ---

    /// Player ship edge length
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Enemy ship edge length
    pub const ENEMY_SIZE: f32 = 25.0;
    /// Boss ship edge length (2P mode)
    pub const BOSS_SIZE: f32 = 60.0;
    /// Starting player health
    pub const PLAYER_HEALTH: i32 = 5;

    /// Player movement speed, px/s (single player)
    pub const PLAYER_SPEED_SOLO: f32 = 600.0;
    /// Player movement speed, px/s (two player)
    pub const PLAYER_SPEED_DUO: f32 = 500.0;
    /// Player bullet speed, px/s upward
    pub const BULLET_SPEED: f32 = 1500.0;
    /// Hostile bullet speed, px/s downward (single player)
    pub const HOSTILE_BULLET_SPEED_SOLO: f32 = 350.0;
    /// Hostile bullet speed, px/s downward (two player)
    pub const HOSTILE_BULLET_SPEED_DUO: f32 = 300.0;

    /// Player bullet hitbox edge
    pub const PLAYER_BULLET_SIZE: f32 = 6.0;
    /// Hostile bullet hitbox edge
    pub const HOSTILE_BULLET_SIZE: f32 = 8.0;
    /// Horizontal fan spacing between bullets in a volley
    pub const BULLET_SPREAD: f32 = 10.0;
    /// Ticks between player shots
    pub const FIRE_COOLDOWN_TICKS: u32 = 10;

    /// Points awarded for destroying a boss
    pub const BOSS_POINTS: u32 = 5;
    /// Endless mode spawns a fresh boss wave every this many points
    pub const ENDLESS_BOSS_STRIDE: u32 = 30;

    /// Explosion radius growth per tick
    pub const EXPLOSION_GROWTH: f32 = 2.0;

    // --- Shape Catcher ---

    /// Catcher paddle width
    pub const CATCHER_WIDTH: f32 = 180.0;
    /// Catcher paddle height
    pub const CATCHER_HEIGHT: f32 = 25.0;
    /// Gap between the catcher and the bottom edge
    pub const CATCHER_BOTTOM_MARGIN: f32 = 20.0;
    /// Catcher movement speed, px/s
    pub const CATCHER_SPEED: f32 = 900.0;

    /// Base shape drop speed, px per tick
    pub const SHAPE_DROP_PIXELS: f32 = 6.0;
    /// Initial shape spawn interval, ms
    pub const SHAPE_INTERVAL_MS: f32 = 1500.0;
    /// Spawn interval multiplier applied on every catch
    pub const DIFFICULTY_FACTOR: f32 = 0.94;
    /// Starting lives
    pub const CATCHER_LIVES: u32 = 3;
}
