//! Space War game state and entity types
//!
//! Entities are transient, in-memory structs scoped to one run. Health at
//! or below zero removes an entity; off-screen positions remove bullets,
//! enemies, and bosses.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::levels::{LevelParams, params_for_level};
use crate::consts::*;
use crate::sim::collision::Aabb;

pub use crate::sim::GamePhase;

/// Game variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarMode {
    Solo,
    Duo,
}

/// Which player fired a bullet (and collects its kills)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// Bullet attribution for scoring and collision filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player(PlayerId),
    Hostile,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    pub health: i32,
    /// Ticks until the next shot is allowed
    pub cooldown: u32,
    /// Kills credited to this player (drives the 2P scoreboard)
    pub score: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: PLAYER_SIZE,
            health: PLAYER_HEALTH,
            cooldown: 0,
            score: 0,
        }
    }

    pub fn alive(&self) -> bool {
        self.health > 0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: f32,
    pub health: i32,
    /// Descent speed, px/s
    pub speed: f32,
    /// Ticks until this enemy fires again
    pub cooldown: u32,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// Boss ship (2P mode). Slower and much tougher than a regular enemy.
#[derive(Debug, Clone)]
pub struct Boss {
    pub pos: Vec2,
    pub size: f32,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    pub cooldown: u32,
}

impl Boss {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: f32,
    /// Vertical velocity, px/s; negative is up-screen
    pub vel_y: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// Expanding ring left behind by a destroyed or damaged ship
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    /// Remaining ticks; equals the spawn magnitude
    pub life: u32,
}

/// Complete Space War state, advanced by [`super::tick::tick`]
#[derive(Debug, Clone)]
pub struct WarState {
    pub mode: WarMode,
    /// Arena dimensions in pixels
    pub arena: Vec2,
    pub seed: u64,
    pub phase: GamePhase,
    /// 1-based difficulty level
    pub level: u32,
    /// Combined score (Duo: sum of both players' kills)
    pub score: u32,
    /// Parameters for the current level
    pub params: LevelParams,
    /// One entry in Solo, two in Duo
    pub players: Vec<Player>,
    pub bullets: Vec<Bullet>,
    pub hostile_bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub bosses: Vec<Boss>,
    pub explosions: Vec<Explosion>,
    /// Ticks until the next enemy wave
    pub spawn_timer: u32,
    /// A boss wave has been spawned for the current level gate (Duo)
    pub boss_spawned_for_level: bool,
    pub endless_mode: bool,
    /// Score at which the last endless boss wave spawned
    pub last_endless_boss_score: u32,
    /// HUD banner timers, ticks remaining
    pub boss_announce_ticks: u32,
    pub endless_announce_ticks: u32,
    pub time_ticks: u64,
    pub(super) rng: Pcg32,
}

impl WarState {
    pub fn new(mode: WarMode, arena: Vec2, seed: u64) -> Self {
        let players = match mode {
            WarMode::Solo => vec![Player::new(Vec2::new(arena.x / 2.0, arena.y - 60.0))],
            WarMode::Duo => vec![
                Player::new(Vec2::new(arena.x / 2.0 - 100.0, arena.y - 80.0)),
                Player::new(Vec2::new(arena.x / 2.0 + 100.0, arena.y - 80.0)),
            ],
        };

        Self {
            mode,
            arena,
            seed,
            phase: GamePhase::Playing,
            level: 1,
            score: 0,
            params: params_for_level(mode, 1),
            players,
            bullets: Vec::new(),
            hostile_bullets: Vec::new(),
            enemies: Vec::new(),
            bosses: Vec::new(),
            explosions: Vec::new(),
            // First wave spawns on the first tick
            spawn_timer: 0,
            boss_spawned_for_level: false,
            endless_mode: false,
            last_endless_boss_score: 0,
            boss_announce_ticks: 0,
            endless_announce_ticks: 0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Player movement speed for this mode, px/s
    pub fn player_speed(&self) -> f32 {
        match self.mode {
            WarMode::Solo => PLAYER_SPEED_SOLO,
            WarMode::Duo => PLAYER_SPEED_DUO,
        }
    }

    /// Hostile bullet speed for this mode, px/s
    pub fn hostile_bullet_speed(&self) -> f32 {
        match self.mode {
            WarMode::Solo => HOSTILE_BULLET_SPEED_SOLO,
            WarMode::Duo => HOSTILE_BULLET_SPEED_DUO,
        }
    }

    /// Reload the level parameter block after a level change
    pub fn apply_level_params(&mut self) {
        self.params = params_for_level(self.mode, self.level);
    }

    /// The score persisted at game over: the best individual tally in Duo,
    /// the run score in Solo.
    pub fn final_score(&self) -> u32 {
        match self.mode {
            WarMode::Solo => self.score,
            WarMode::Duo => self.players.iter().map(|p| p.score).max().unwrap_or(0),
        }
    }

    pub fn all_players_dead(&self) -> bool {
        self.players.iter().all(|p| !p.alive())
    }

    /// Credit a kill to the bullet's owner
    pub fn award(&mut self, owner: BulletOwner, points: u32) {
        self.score += points;
        if let BulletOwner::Player(id) = owner {
            if let Some(player) = self.players.get_mut(id.index()) {
                player.score += points;
            }
        }
    }

    pub fn spawn_explosion(&mut self, pos: Vec2, magnitude: u32) {
        self.explosions.push(Explosion {
            pos,
            radius: 1.0,
            life: magnitude,
        });
    }

    /// Spawn one wave of enemies above the top edge at random positions
    pub fn spawn_enemy_wave(&mut self) {
        for _ in 0..self.params.enemy_count {
            let x = self.rng.random_range(40.0..self.arena.x - 40.0);
            let y = self.rng.random_range(-200.0..-40.0);
            let cooldown = self
                .rng
                .random_range(self.params.cooldown_min..=self.params.cooldown_max);
            self.enemies.push(Enemy {
                pos: Vec2::new(x, y),
                size: ENEMY_SIZE,
                health: self.params.enemy_health,
                speed: self.params.enemy_speed,
                cooldown,
            });
        }
    }

    /// Spawn the two-boss wave that gates each Duo level
    pub fn spawn_boss_wave(&mut self) {
        self.bosses.clear();
        for idx in 0..2 {
            let x = self.arena.x / 3.0 * (idx + 1) as f32;
            let health = (self.params.enemy_health * 5).max(5);
            let cooldown = self.rng.random_range(40..=90);
            self.bosses.push(Boss {
                pos: Vec2::new(x, -80.0),
                size: BOSS_SIZE,
                health,
                max_health: health,
                speed: (self.params.enemy_speed * 0.6).max(75.0),
                cooldown,
            });
        }
        self.boss_announce_ticks = 80;
    }

    /// Fire a volley from `player_idx`: `fire_power` bullets fanned
    /// horizontally around the ship's nose.
    pub fn player_shoot(&mut self, player_idx: usize) {
        let fire_power = self.params.fire_power;
        let (pos, size) = {
            let p = &self.players[player_idx];
            (p.pos, p.size)
        };
        let owner = BulletOwner::Player(if player_idx == 0 {
            PlayerId::One
        } else {
            PlayerId::Two
        });
        for i in 0..fire_power {
            let offset = (i as f32 - (fire_power - 1) as f32 / 2.0) * BULLET_SPREAD;
            self.bullets.push(Bullet {
                pos: Vec2::new(pos.x + offset, pos.y - size / 2.0),
                size: PLAYER_BULLET_SIZE,
                vel_y: -BULLET_SPEED,
                owner,
            });
        }
        self.players[player_idx].cooldown = FIRE_COOLDOWN_TICKS;
    }
}
