//! Fixed timestep Space War tick
//!
//! Advances the simulation by one 20 ms step: movement, firing, explosion
//! aging, off-screen culling, pairwise AABB collision with removal, and
//! level/boss progression.

use glam::Vec2;
use rand::Rng;

use super::levels::next_level_threshold;
use super::state::{BulletOwner, GamePhase, WarMode, WarState};
use crate::consts::*;

/// One player's commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// Movement axes, each in [-1, 1]; +y is down-screen
    pub axis: Vec2,
    /// Fire button held
    pub fire: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub p1: PlayerInput,
    pub p2: PlayerInput,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - built-in pilot flies the ships
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut WarState, input: &TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.boss_announce_ticks = state.boss_announce_ticks.saturating_sub(1);
    state.endless_announce_ticks = state.endless_announce_ticks.saturating_sub(1);

    // Resolve pilot commands up front
    let mut inputs = [input.p1, input.p2];
    if input.autopilot {
        for idx in 0..state.players.len() {
            inputs[idx] = autopilot_input(state, idx);
        }
    }

    // Player movement, clamped to the arena
    let arena = state.arena;
    let speed = state.player_speed();
    for (idx, player) in state.players.iter_mut().enumerate() {
        if !player.alive() {
            continue;
        }
        let axis = inputs[idx].axis.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        let half = player.size / 2.0;
        player.pos += axis * speed * dt;
        player.pos.x = player.pos.x.clamp(half, arena.x - half);
        player.pos.y = player.pos.y.clamp(half, arena.y - half);
    }

    // Firing
    for idx in 0..state.players.len() {
        let player = &state.players[idx];
        if player.alive() && inputs[idx].fire && player.cooldown == 0 {
            state.player_shoot(idx);
        }
    }
    for player in state.players.iter_mut() {
        player.cooldown = player.cooldown.saturating_sub(1);
    }

    // Age explosions
    for exp in state.explosions.iter_mut() {
        exp.radius += EXPLOSION_GROWTH;
        exp.life = exp.life.saturating_sub(1);
    }
    state.explosions.retain(|e| e.life > 0);

    // Advance bullets and cull the off-screen ones
    for bullet in state
        .bullets
        .iter_mut()
        .chain(state.hostile_bullets.iter_mut())
    {
        bullet.pos.y += bullet.vel_y * dt;
    }
    state.bullets.retain(|b| b.pos.y >= -10.0);
    state.hostile_bullets.retain(|b| b.pos.y <= arena.y + 10.0);

    // Advance enemies: descend, count down fire cooldowns, shoot on expiry
    let hostile_speed = state.hostile_bullet_speed();
    let (cd_min, cd_max) = (state.params.cooldown_min, state.params.cooldown_max);
    for enemy in state.enemies.iter_mut() {
        enemy.pos.y += enemy.speed * dt;
        enemy.cooldown = enemy.cooldown.saturating_sub(1);
        if enemy.cooldown == 0 {
            state.hostile_bullets.push(hostile_shot(
                enemy.pos,
                enemy.size,
                hostile_speed,
            ));
            enemy.cooldown = state.rng.random_range(cd_min..=cd_max);
        }
    }
    state.enemies.retain(|e| e.pos.y <= arena.y + 40.0);

    for boss in state.bosses.iter_mut() {
        boss.pos.y += boss.speed * dt;
        boss.cooldown = boss.cooldown.saturating_sub(1);
        if boss.cooldown == 0 {
            state
                .hostile_bullets
                .push(hostile_shot(boss.pos, boss.size, hostile_speed));
            boss.cooldown = state.rng.random_range(30..=70);
        }
    }
    state.bosses.retain(|b| b.pos.y <= arena.y + 100.0);

    // Enemy waves on a level-paced timer
    if state.spawn_timer == 0 {
        state.spawn_enemy_wave();
        state.spawn_timer = (state.params.spawn_interval_ms as u64 / TICK_MS).max(1) as u32;
    } else {
        state.spawn_timer -= 1;
    }

    // Player bullets vs enemies and bosses
    let mut bi = 0;
    while bi < state.bullets.len() {
        let bbox = state.bullets[bi].bounds();
        let owner = state.bullets[bi].owner;

        if let Some(ei) = state
            .enemies
            .iter()
            .position(|e| e.bounds().overlaps(&bbox))
        {
            state.bullets.remove(bi);
            state.enemies[ei].health -= 1;
            if state.enemies[ei].health <= 0 {
                let enemy = state.enemies.remove(ei);
                state.award(owner, 1);
                state.spawn_explosion(enemy.pos, 8);
            }
            continue;
        }

        if let Some(gi) = state.bosses.iter().position(|b| b.bounds().overlaps(&bbox)) {
            state.bullets.remove(bi);
            state.bosses[gi].health -= 1;
            if state.bosses[gi].health <= 0 {
                let boss = state.bosses.remove(gi);
                state.award(owner, BOSS_POINTS);
                state.spawn_explosion(boss.pos, 15);
            }
            continue;
        }

        bi += 1;
    }

    // Hostile bullets vs players
    let mut bi = 0;
    while bi < state.hostile_bullets.len() {
        let bbox = state.hostile_bullets[bi].bounds();
        let hit = state
            .players
            .iter()
            .position(|p| p.alive() && p.bounds().overlaps(&bbox));
        if let Some(pi) = hit {
            state.hostile_bullets.remove(bi);
            state.players[pi].health -= 1;
            let pos = state.players[pi].pos;
            state.spawn_explosion(pos, 2);
            continue;
        }
        bi += 1;
    }

    // Enemy/boss crashes into players
    let mut ei = 0;
    while ei < state.enemies.len() {
        let ebox = state.enemies[ei].bounds();
        let hit = state
            .players
            .iter()
            .position(|p| p.alive() && p.bounds().overlaps(&ebox));
        if let Some(pi) = hit {
            let enemy = state.enemies.remove(ei);
            state.players[pi].health -= 1;
            state.spawn_explosion(enemy.pos, 5);
            continue;
        }
        ei += 1;
    }

    let mut gi = 0;
    while gi < state.bosses.len() {
        let bbox = state.bosses[gi].bounds();
        let hit = state
            .players
            .iter()
            .position(|p| p.alive() && p.bounds().overlaps(&bbox));
        if let Some(pi) = hit {
            let boss = state.bosses.remove(gi);
            state.players[pi].health -= 1;
            state.spawn_explosion(boss.pos, 10);
            continue;
        }
        gi += 1;
    }

    if state.all_players_dead() {
        state.phase = GamePhase::GameOver;
        return;
    }

    // Level / boss progression
    match state.mode {
        WarMode::Solo => {
            while state.score >= next_level_threshold(WarMode::Solo, state.level) {
                state.level += 1;
                state.apply_level_params();
            }
        }
        WarMode::Duo => {
            if !state.endless_mode {
                let threshold = next_level_threshold(WarMode::Duo, state.level);
                if !state.boss_spawned_for_level && state.score >= threshold {
                    state.boss_spawned_for_level = true;
                    state.spawn_boss_wave();
                }
                if state.boss_spawned_for_level
                    && state.bosses.is_empty()
                    && state.score >= threshold
                {
                    if state.level < 3 {
                        state.level += 1;
                        state.apply_level_params();
                        state.boss_spawned_for_level = false;
                        state.boss_announce_ticks = 0;
                    } else {
                        state.endless_mode = true;
                        state.boss_spawned_for_level = false;
                        state.endless_announce_ticks = 120;
                        state.last_endless_boss_score = state.score;
                    }
                }
            } else if state.bosses.is_empty()
                && state.score - state.last_endless_boss_score >= ENDLESS_BOSS_STRIDE
            {
                state.spawn_boss_wave();
                state.last_endless_boss_score = state.score;
            }
        }
    }
}

fn hostile_shot(pos: Vec2, size: f32, speed: f32) -> super::state::Bullet {
    super::state::Bullet {
        pos: Vec2::new(pos.x, pos.y + size / 2.0 + 6.0),
        size: HOSTILE_BULLET_SIZE,
        vel_y: speed,
        owner: BulletOwner::Hostile,
    }
}

/// Demo pilot: chase the nearest enemy column, sidestep incoming fire,
/// hold the home row, and keep the trigger down.
fn autopilot_input(state: &WarState, player_idx: usize) -> PlayerInput {
    let player = &state.players[player_idx];
    if !player.alive() {
        return PlayerInput::default();
    }

    // Closest threat by horizontal distance; bosses take priority
    let target_x = state
        .bosses
        .iter()
        .map(|b| b.pos.x)
        .chain(state.enemies.iter().map(|e| e.pos.x))
        .min_by(|a, b| {
            (a - player.pos.x)
                .abs()
                .partial_cmp(&(b - player.pos.x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(state.arena.x / 2.0);

    let mut axis = Vec2::ZERO;

    // Dodge takes precedence over chasing
    let incoming = state.hostile_bullets.iter().find(|b| {
        (b.pos.x - player.pos.x).abs() < 30.0
            && b.pos.y < player.pos.y
            && player.pos.y - b.pos.y < 250.0
    });
    if let Some(bullet) = incoming {
        axis.x = if bullet.pos.x >= player.pos.x { -1.0 } else { 1.0 };
    } else if (target_x - player.pos.x).abs() > 5.0 {
        axis.x = (target_x - player.pos.x).signum();
    }

    // Drift back to the home row
    let home_y = state.arena.y - 80.0;
    if (home_y - player.pos.y).abs() > 5.0 {
        axis.y = (home_y - player.pos.y).signum();
    }

    PlayerInput { axis, fire: true }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::war::state::{Boss, Bullet, Enemy, Explosion, PlayerId};

    const DT: f32 = SIM_DT;

    fn solo() -> WarState {
        let mut state = WarState::new(WarMode::Solo, Vec2::new(1280.0, 720.0), 7);
        // Keep the RNG-driven wave spawner out of the way
        state.spawn_timer = 10_000;
        state
    }

    fn duo() -> WarState {
        let mut state = WarState::new(WarMode::Duo, Vec2::new(1280.0, 720.0), 7);
        state.spawn_timer = 10_000;
        state
    }

    fn idle_enemy(x: f32, y: f32, health: i32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
            size: ENEMY_SIZE,
            health,
            speed: 0.0,
            cooldown: 10_000,
        }
    }

    #[test]
    fn test_player_bullet_moves_up_and_culls() {
        let mut state = solo();
        state.bullets.push(Bullet {
            pos: Vec2::new(100.0, 20.0),
            size: PLAYER_BULLET_SIZE,
            vel_y: -BULLET_SPEED,
            owner: BulletOwner::Player(PlayerId::One),
        });

        tick(&mut state, &TickInput::default(), DT);
        // 20 - 30 = -10, still on the (generous) screen
        assert_eq!(state.bullets.len(), 1);

        tick(&mut state, &TickInput::default(), DT);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_fire_cooldown_gates_shots() {
        let mut state = solo();
        let input = TickInput {
            p1: PlayerInput {
                axis: Vec2::ZERO,
                fire: true,
            },
            ..Default::default()
        };

        tick(&mut state, &input, DT);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.players[0].cooldown, FIRE_COOLDOWN_TICKS - 1);

        tick(&mut state, &input, DT);
        assert_eq!(state.bullets.len(), 1, "cooldown must block the second shot");
    }

    #[test]
    fn test_bullet_kill_awards_score_and_explosion() {
        let mut state = solo();
        state.enemies.push(idle_enemy(100.0, 300.0, 1));
        state.bullets.push(Bullet {
            pos: Vec2::new(100.0, 330.0),
            size: PLAYER_BULLET_SIZE,
            vel_y: -BULLET_SPEED,
            owner: BulletOwner::Player(PlayerId::One),
        });

        tick(&mut state, &TickInput::default(), DT);

        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 1);
        assert_eq!(state.players[0].score, 1);
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_bullet_wounds_tough_enemy_without_kill() {
        let mut state = solo();
        state.enemies.push(idle_enemy(100.0, 300.0, 2));
        state.bullets.push(Bullet {
            pos: Vec2::new(100.0, 330.0),
            size: PLAYER_BULLET_SIZE,
            vel_y: -BULLET_SPEED,
            owner: BulletOwner::Player(PlayerId::One),
        });

        tick(&mut state, &TickInput::default(), DT);

        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_boss_kill_awards_five_points() {
        let mut state = duo();
        state.bosses.push(Boss {
            pos: Vec2::new(400.0, 200.0),
            size: BOSS_SIZE,
            health: 1,
            max_health: 1,
            speed: 0.0,
            cooldown: 10_000,
        });
        state.bullets.push(Bullet {
            pos: Vec2::new(400.0, 230.0),
            size: PLAYER_BULLET_SIZE,
            vel_y: -BULLET_SPEED,
            owner: BulletOwner::Player(PlayerId::Two),
        });

        tick(&mut state, &TickInput::default(), DT);

        assert!(state.bosses.is_empty());
        assert_eq!(state.score, BOSS_POINTS);
        assert_eq!(state.players[1].score, BOSS_POINTS);
        assert_eq!(state.final_score(), BOSS_POINTS);
    }

    #[test]
    fn test_hostile_bullet_damages_player() {
        let mut state = solo();
        let player_pos = state.players[0].pos;
        state.hostile_bullets.push(Bullet {
            pos: player_pos - Vec2::new(0.0, 10.0),
            size: HOSTILE_BULLET_SIZE,
            vel_y: HOSTILE_BULLET_SPEED_SOLO,
            owner: BulletOwner::Hostile,
        });

        tick(&mut state, &TickInput::default(), DT);

        assert!(state.hostile_bullets.is_empty());
        assert_eq!(state.players[0].health, PLAYER_HEALTH - 1);
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_enemy_crash_removes_enemy_and_damages_player() {
        let mut state = solo();
        let player_pos = state.players[0].pos;
        state.enemies.push(idle_enemy(player_pos.x, player_pos.y, 1));

        tick(&mut state, &TickInput::default(), DT);

        assert!(state.enemies.is_empty());
        assert_eq!(state.players[0].health, PLAYER_HEALTH - 1);
        // Crash deals damage but awards no points
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_game_over_latches() {
        let mut state = solo();
        state.players[0].health = 1;
        let player_pos = state.players[0].pos;
        state.enemies.push(idle_enemy(player_pos.x, player_pos.y, 1));

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        let frozen = state.time_ticks;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.time_ticks, frozen, "game over must stop the clock");
    }

    #[test]
    fn test_duo_survives_one_player_down() {
        let mut state = duo();
        state.players[0].health = 1;
        let p1 = state.players[0].pos;
        state.enemies.push(idle_enemy(p1.x, p1.y, 1));

        tick(&mut state, &TickInput::default(), DT);

        assert!(!state.players[0].alive());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_enemy_culled_below_arena() {
        let mut state = solo();
        state.enemies.push(idle_enemy(100.0, 800.0, 1));

        tick(&mut state, &TickInput::default(), DT);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_solo_level_advances_once_per_threshold() {
        let mut state = solo();
        state.score = 19;
        state.enemies.push(idle_enemy(100.0, 300.0, 1));
        state.bullets.push(Bullet {
            pos: Vec2::new(100.0, 330.0),
            size: PLAYER_BULLET_SIZE,
            vel_y: -BULLET_SPEED,
            owner: BulletOwner::Player(PlayerId::One),
        });

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 20);
        assert_eq!(state.level, 2);
        assert_eq!(state.params.spawn_interval_ms, 1800);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.level, 2, "no re-trigger while the score holds still");
    }

    #[test]
    fn test_solo_catches_up_over_skipped_thresholds() {
        let mut state = solo();
        state.score = 79;
        state.enemies.push(idle_enemy(100.0, 300.0, 1));
        state.bullets.push(Bullet {
            pos: Vec2::new(100.0, 330.0),
            size: PLAYER_BULLET_SIZE,
            vel_y: -BULLET_SPEED,
            owner: BulletOwner::Player(PlayerId::One),
        });

        tick(&mut state, &TickInput::default(), DT);
        // 80 clears the 20, 50, and 80 gates in one pass
        assert_eq!(state.level, 4);
    }

    #[test]
    fn test_duo_boss_gate_and_level_advance() {
        let mut state = duo();
        state.score = 20;

        tick(&mut state, &TickInput::default(), DT);
        assert!(state.boss_spawned_for_level);
        assert_eq!(state.bosses.len(), 2);
        assert!(state.boss_announce_ticks > 0);
        assert_eq!(state.level, 1, "level holds until the bosses fall");

        state.bosses.clear();
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.level, 2);
        assert!(!state.boss_spawned_for_level);
    }

    #[test]
    fn test_duo_endless_mode_cadence() {
        let mut state = duo();
        state.level = 3;
        state.apply_level_params();
        state.score = 75;

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.bosses.len(), 2, "final level gate spawns a boss wave");

        state.bosses.clear();
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.endless_mode);
        assert_eq!(state.last_endless_boss_score, 75);
        assert!(state.endless_announce_ticks > 0);

        // Not enough progress yet
        state.score = 90;
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.bosses.is_empty());

        state.score = 105;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.bosses.len(), 2);
        assert_eq!(state.last_endless_boss_score, 105);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = solo();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause, DT);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = state.time_ticks;

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.time_ticks, frozen);

        tick(&mut state, &pause, DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_explosion_grows_then_dies() {
        let mut state = solo();
        state.explosions.push(Explosion {
            pos: Vec2::new(50.0, 50.0),
            radius: 1.0,
            life: 2,
        });

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.explosions.len(), 1);
        assert!((state.explosions[0].radius - 3.0).abs() < 1e-6);

        tick(&mut state, &TickInput::default(), DT);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_wave_spawns_on_timer() {
        let mut state = solo();
        state.spawn_timer = 0;

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.enemies.len(), state.params.enemy_count as usize);
        assert_eq!(
            state.spawn_timer,
            (state.params.spawn_interval_ms as u64 / TICK_MS) as u32
        );
        for enemy in &state.enemies {
            assert!(enemy.pos.x >= 40.0 && enemy.pos.x <= state.arena.x - 40.0);
            assert!(enemy.pos.y < 0.0);
        }
    }

    #[test]
    fn test_movement_clamped_to_arena() {
        let mut state = solo();
        state.players[0].pos = Vec2::new(20.0, 700.0);
        let input = TickInput {
            p1: PlayerInput {
                axis: Vec2::new(-1.0, 1.0),
                fire: false,
            },
            ..Default::default()
        };

        tick(&mut state, &input, DT);
        assert_eq!(state.players[0].pos.x, PLAYER_SIZE / 2.0);
        assert_eq!(state.players[0].pos.y, 720.0 - PLAYER_SIZE / 2.0);
    }

    #[test]
    fn test_autopilot_keeps_ship_alive_for_a_while() {
        let mut state = WarState::new(WarMode::Solo, Vec2::new(1280.0, 720.0), 42);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        // Ten seconds of play; the pilot should still be standing
        for _ in 0..500 {
            tick(&mut state, &input, DT);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert!(state.score > 0 || state.players[0].alive());
    }

    #[test]
    fn test_replays_are_deterministic() {
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let run = |seed: u64| {
            let mut state = WarState::new(WarMode::Duo, Vec2::new(1280.0, 720.0), seed);
            for _ in 0..300 {
                tick(&mut state, &input, DT);
            }
            (state.score, state.level, state.time_ticks, state.enemies.len())
        };
        assert_eq!(run(9), run(9));
    }
}
