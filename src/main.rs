//! Astro Arcade entry point
//!
//! Runs one of the arcade games headless with the built-in autopilot,
//! logging a HUD status line as it goes and recording the final score
//! when the run ends.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use astro_arcade::consts::{MAX_SUBSTEPS, SIM_DT, TICK_MS};
use astro_arcade::highscores::HighScores;
use astro_arcade::persistence::{ScoreRow, ScoreStore, now_timestamp};
use astro_arcade::sim::catcher::{self, CatcherState};
use astro_arcade::sim::war::{self, WarMode, WarState};
use astro_arcade::sim::GamePhase;
use astro_arcade::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Game {
    SpaceWar,
    SpaceWar2P,
    ShapeCatcher,
}

impl Game {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "space-war" => Some(Self::SpaceWar),
            "space-war-2p" => Some(Self::SpaceWar2P),
            "shape-catcher" => Some(Self::ShapeCatcher),
            _ => None,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::SpaceWar => "Space War",
            Self::SpaceWar2P => "Space War 2P",
            Self::ShapeCatcher => "Shape Catcher",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::SpaceWar => "space-war",
            Self::SpaceWar2P => "space-war-2p",
            Self::ShapeCatcher => "shape-catcher",
        }
    }
}

struct Args {
    game: Game,
    user: Option<String>,
    seed: Option<u64>,
    max_ticks: Option<u64>,
    settings_path: PathBuf,
}

fn parse_args() -> Result<Args, String> {
    let mut game = None;
    let mut user = None;
    let mut seed = None;
    let mut max_ticks = None;
    let mut settings_path = PathBuf::from("data/settings.json");

    let mut argv = std::env::args().skip(1);
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--user" => {
                user = Some(argv.next().ok_or("--user needs a value")?);
            }
            "--seed" => {
                let raw = argv.next().ok_or("--seed needs a value")?;
                seed = Some(raw.parse::<u64>().map_err(|e| format!("bad seed: {e}"))?);
            }
            "--ticks" => {
                let raw = argv.next().ok_or("--ticks needs a value")?;
                max_ticks = Some(raw.parse::<u64>().map_err(|e| format!("bad tick count: {e}"))?);
            }
            "--settings" => {
                settings_path = PathBuf::from(argv.next().ok_or("--settings needs a value")?);
            }
            other if game.is_none() && !other.starts_with('-') => {
                game = Some(Game::parse(other).ok_or_else(|| {
                    format!("unknown game '{other}' (expected space-war, space-war-2p, or shape-catcher)")
                })?);
            }
            other => return Err(format!("unexpected argument '{other}'")),
        }
    }

    let game = game.ok_or("usage: astro-arcade <game> [--user NAME] [--seed N] [--ticks N] [--settings PATH]")?;
    Ok(Args { game, user, seed, max_ticks, settings_path })
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let settings = Settings::load(&args.settings_path);
    let seed = args.seed.unwrap_or_else(now_timestamp);

    log::info!("{} starting (seed {seed})", args.game.title());

    let outcome = match args.game {
        Game::SpaceWar => run_war(WarMode::Solo, seed, &settings, args.max_ticks),
        Game::SpaceWar2P => run_war(WarMode::Duo, seed, &settings, args.max_ticks),
        Game::ShapeCatcher => run_catcher(seed, &settings, args.max_ticks),
    };

    log::info!(
        "{} over: score {} (level {}, {} ticks)",
        args.game.title(),
        outcome.score,
        outcome.level,
        outcome.ticks
    );

    if outcome.finished {
        record_score(args.game, &args.user, &settings, &outcome);
    } else {
        log::info!("Run stopped before game over, score not recorded");
    }

    ExitCode::SUCCESS
}

struct Outcome {
    score: u32,
    level: u32,
    ticks: u64,
    /// True when the game reached its own game-over, not a tick cap.
    finished: bool,
}

/// Fixed-timestep loop shared by both runners. `step` runs one
/// simulation tick and returns true when the game is over. Returns the
/// tick count and whether the game ended on its own (false means the
/// tick cap cut it short).
fn run_loop(max_ticks: Option<u64>, mut step: impl FnMut(u64) -> bool) -> (u64, bool) {
    let mut accumulator = 0.0f32;
    let mut last = Instant::now();
    let mut ticks: u64 = 0;

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32().min(0.1);
        last = now;
        accumulator += dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            accumulator -= SIM_DT;
            substeps += 1;
            ticks += 1;

            if step(ticks) {
                return (ticks, true);
            }
            if let Some(cap) = max_ticks {
                if ticks >= cap {
                    return (ticks, false);
                }
            }
        }

        thread::sleep(Duration::from_millis(TICK_MS / 2));
    }
}

fn run_war(mode: WarMode, seed: u64, settings: &Settings, max_ticks: Option<u64>) -> Outcome {
    let arena = glam::Vec2::new(settings.arena_width, settings.arena_height);
    let mut state = WarState::new(mode, arena, seed);
    let input = war::TickInput {
        autopilot: true,
        ..Default::default()
    };

    let hud_every = settings.hud_every_ticks;
    let (ticks, finished) = run_loop(max_ticks, |t| {
        war::tick(&mut state, &input, SIM_DT);
        if hud_every > 0 && t % hud_every == 0 {
            log::info!(
                "[{t:>6}] score {:>4}  level {}  enemies {}  bosses {}",
                state.score,
                state.level,
                state.enemies.len(),
                state.bosses.len()
            );
        }
        state.phase == GamePhase::GameOver
    });

    Outcome {
        score: state.final_score(),
        level: state.level,
        ticks,
        finished,
    }
}

fn run_catcher(seed: u64, settings: &Settings, max_ticks: Option<u64>) -> Outcome {
    let arena = glam::Vec2::new(settings.arena_width, settings.arena_height);
    let mut state = CatcherState::new(arena, seed);
    let input = catcher::TickInput {
        autopilot: true,
        ..Default::default()
    };

    let hud_every = settings.hud_every_ticks;
    let (ticks, finished) = run_loop(max_ticks, |t| {
        catcher::tick(&mut state, &input, SIM_DT);
        if hud_every > 0 && t % hud_every == 0 {
            log::info!(
                "[{t:>6}] score {:>4}  lives {}  falling {}",
                state.score,
                state.lives,
                state.shapes.len()
            );
        }
        state.phase == GamePhase::GameOver
    });

    Outcome {
        score: state.score,
        level: 1,
        ticks,
        finished,
    }
}

/// Append the run to the score file and fold it into the game's high
/// score table. Guest runs and zero scores are not recorded.
fn record_score(game: Game, user: &Option<String>, settings: &Settings, outcome: &Outcome) {
    let Some(user) = user else {
        log::info!("Guest run, score not recorded");
        return;
    };
    if outcome.score == 0 {
        log::info!("Zero score, not recorded");
        return;
    }

    let store = ScoreStore::new(settings.score_path());
    let row = ScoreRow {
        user: user.clone(),
        game: game.title().to_string(),
        score: outcome.score,
        level: outcome.level,
        timestamp: now_timestamp(),
    };
    if let Err(err) = store.append(row) {
        log::error!("Failed to record score: {err}");
    }

    let hs_path = settings.highscores_path(game.slug());
    let mut table = HighScores::load(&hs_path);
    if let Some(rank) = table.add_score(outcome.score, outcome.level, now_timestamp()) {
        log::info!("New high score, rank {rank}!");
        if let Err(err) = table.save(&hs_path) {
            log::error!("Failed to save high scores: {err}");
        }
    }
}
