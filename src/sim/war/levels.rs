//! Level/difficulty table
//!
//! Levels are 1-based. Solo and Duo tune the same knobs differently: Duo
//! starts gentler (two players share the screen) and caps at level 3, after
//! which endless mode takes over; Solo keeps scaling the table's last entry.

use super::state::WarMode;

/// Difficulty parameters in effect for one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    /// Score required to reach this level
    pub score_threshold: u32,
    pub enemy_health: i32,
    /// Enemy descent speed, px/s
    pub enemy_speed: f32,
    /// Bullets per player volley
    pub fire_power: u32,
    /// Milliseconds between enemy waves
    pub spawn_interval_ms: u32,
    /// Enemies per wave
    pub enemy_count: u32,
    /// Enemy re-fire cooldown range, ticks
    pub cooldown_min: u32,
    pub cooldown_max: u32,
}

const SOLO_LEVELS: [LevelParams; 3] = [
    LevelParams {
        score_threshold: 0,
        enemy_health: 1,
        enemy_speed: 125.0,
        fire_power: 1,
        spawn_interval_ms: 2500,
        enemy_count: 3,
        cooldown_min: 50,
        cooldown_max: 150,
    },
    LevelParams {
        score_threshold: 20,
        enemy_health: 1,
        enemy_speed: 200.0,
        fire_power: 2,
        spawn_interval_ms: 1800,
        enemy_count: 4,
        cooldown_min: 50,
        cooldown_max: 150,
    },
    LevelParams {
        score_threshold: 50,
        enemy_health: 2,
        enemy_speed: 275.0,
        fire_power: 3,
        spawn_interval_ms: 1200,
        enemy_count: 5,
        cooldown_min: 50,
        cooldown_max: 150,
    },
];

const DUO_LEVELS: [LevelParams; 3] = [
    LevelParams {
        score_threshold: 0,
        enemy_health: 1,
        enemy_speed: 100.0,
        fire_power: 1,
        spawn_interval_ms: 2900,
        enemy_count: 2,
        cooldown_min: 100,
        cooldown_max: 200,
    },
    LevelParams {
        score_threshold: 20,
        enemy_health: 1,
        enemy_speed: 175.0,
        fire_power: 2,
        spawn_interval_ms: 2000,
        enemy_count: 3,
        cooldown_min: 80,
        cooldown_max: 160,
    },
    LevelParams {
        score_threshold: 50,
        enemy_health: 2,
        enemy_speed: 225.0,
        fire_power: 3,
        spawn_interval_ms: 1500,
        enemy_count: 4,
        cooldown_min: 50,
        cooldown_max: 100,
    },
];

fn table(mode: WarMode) -> &'static [LevelParams; 3] {
    match mode {
        WarMode::Solo => &SOLO_LEVELS,
        WarMode::Duo => &DUO_LEVELS,
    }
}

/// Parameters in effect at `level` (1-based). Solo levels past the table
/// keep scaling: spawn interval shrinks 10% per extra level (500 ms floor),
/// fire power grows to a cap of 5, and enemies descend 25 px/s faster per
/// extra level. Duo clamps to the table (endless mode reuses level 3).
pub fn params_for_level(mode: WarMode, level: u32) -> LevelParams {
    let levels = table(mode);
    let idx = (level.saturating_sub(1) as usize).min(levels.len() - 1);
    let mut params = levels[idx];

    if mode == WarMode::Solo && level as usize > levels.len() {
        let extra = level - levels.len() as u32;
        params.spawn_interval_ms =
            ((params.spawn_interval_ms as f32 * 0.9f32.powi(extra as i32)) as u32).max(500);
        params.fire_power = (params.fire_power + extra / 2).min(5);
        params.enemy_speed += 25.0 * extra as f32;
    }

    params
}

/// Score needed to leave `level` (1-based). Past the table, Solo opens a new
/// 30-point band per level; Duo gates its final boss wave 25 points after
/// the last table entry.
pub fn next_level_threshold(mode: WarMode, level: u32) -> u32 {
    let levels = table(mode);
    let last = levels[levels.len() - 1].score_threshold;
    match mode {
        WarMode::Solo => {
            if (level as usize) < levels.len() {
                levels[level as usize].score_threshold
            } else {
                last + 30 * (level - levels.len() as u32 + 1)
            }
        }
        WarMode::Duo => {
            if (level as usize) < levels.len() {
                levels[level as usize].score_threshold
            } else {
                last + 25
            }
        }
    }
}
