//! City Showdown headless runner
//!
//! Usage: `city-showdown [seed] [tuning.json]`
//!
//! Plays an autopilot session at the fixed timestep and prints the final
//! snapshot as JSON. Set `RUST_LOG=info` to follow phase changes.

use std::path::Path;

use city_showdown::Tuning;
use city_showdown::consts::SIM_DT;
use city_showdown::sim::{GamePhase, GameState, TickInput, tick};

/// Ten simulated minutes
const MAX_TICKS: u64 = 60 * 60 * 10;
const DEFAULT_SEED: u64 = 12345;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Invalid seed {:?}, using {}", arg, DEFAULT_SEED);
            DEFAULT_SEED
        }),
        None => DEFAULT_SEED,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(Path::new(&path)),
        None => Tuning::default(),
    };

    log::info!(
        "City Showdown (headless) starting, seed {}, targeting {}",
        seed,
        tuning.target_mode.as_str()
    );

    let mut state = GameState::with_tuning(seed, tuning);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut last_phase = state.phase;
    let mut ticks = 0;
    while ticks < MAX_TICKS {
        tick(&mut state, &input, SIM_DT);
        ticks += 1;

        if state.phase != last_phase {
            log::info!(
                "[{:>6.1}s] {:?} -> {:?}, wave {}, score {}, form {}",
                ticks as f32 * SIM_DT,
                last_phase,
                state.phase,
                state.wave.number,
                state.score,
                state.player.form.label()
            );
            last_phase = state.phase;
        }

        // Autopilot would restart immediately; stop on the first result instead
        if state.phase.is_terminal() {
            break;
        }
    }

    if state.phase == GamePhase::Victory {
        println!("Victory after {:.1}s", ticks as f32 * SIM_DT);
    } else if state.phase == GamePhase::GameOver {
        println!("Game over on wave {} after {:.1}s", state.wave.number, ticks as f32 * SIM_DT);
    } else {
        println!("Stopped on wave {} after {:.1}s", state.wave.number, ticks as f32 * SIM_DT);
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
