//! Breakout Sim entry point
//!
//! Headless demo: plays one game on autopilot and prints the final frame.
//!
//! Usage: `breakout-sim [seed] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
use breakout_sim::GameConfig;
#[cfg(not(target_arch = "wasm32"))]
use breakout_sim::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Give up on a demo game that never ends (ball stuck in a loop)
#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_TICKS: u64 = 100_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(err)) => {
            eprintln!("invalid seed: {err}");
            std::process::exit(2);
        }
        None => 12345,
    };
    let config = match args.next() {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{path}: {err}");
                std::process::exit(2);
            }
        },
        None => GameConfig::default(),
    };

    let mut state = match GameState::with_config(config, seed) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("invalid config: {err}");
            std::process::exit(2);
        }
    };
    log::info!("Breakout Sim (native) starting with seed {}", seed);

    let start = TickInput {
        activate: true,
        ..Default::default()
    };
    tick(&mut state, &start);

    let autopilot = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut bricks_destroyed = 0usize;
    while state.phase == GamePhase::Playing && state.time_ticks < MAX_DEMO_TICKS {
        for event in tick(&mut state, &autopilot) {
            if let GameEvent::BrickDestroyed { .. } = event {
                bricks_destroyed += 1;
            }
        }
    }

    log::info!(
        "Demo finished in {:?} after {} ticks, {} bricks destroyed",
        state.phase,
        state.time_ticks,
        bricks_destroyed
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("failed to serialize snapshot: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host page drives the simulation through the library API
}
