//! Astroblast headless harness
//!
//! Runs a scripted autopilot session against the simulation core at the
//! logical tick rate, routing sound events through the audio router to a
//! logging sink. Stands in for a windowed host: same tick/draw/drain cycle,
//! no pixels. Pass a seed to reproduce a run, `--dump` to print the final
//! state as JSON.

use astroblast::audio::{AudioRouter, AudioSink};
use astroblast::consts::TICK_RATE_HZ;
use astroblast::draw::build_draw_list;
use astroblast::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Sink that narrates sound requests to the log instead of playing them
#[derive(Default)]
struct LogAudio;

impl AudioSink for LogAudio {
    fn play_shot(&mut self) {
        log::trace!("audio: shot");
    }
    fn play_explosion(&mut self) {
        log::debug!("audio: explosion");
    }
    fn start_thrust_loop(&mut self) {
        log::debug!("audio: thrust loop on");
    }
    fn stop_thrust_loop(&mut self) {
        log::debug!("audio: thrust loop off");
    }
}

/// Canned pilot: always firing, thrusting and turning in bursts, and
/// restarting from the menu whenever a run ends.
fn autopilot(state: &GameState, t: u64) -> TickInput {
    TickInput {
        start: state.phase == GamePhase::Menu,
        rotate_left: t % 90 < 40,
        rotate_right: t % 130 < 20,
        thrust: t % 120 < 45,
        fire: true,
    }
}

fn main() {
    env_logger::init();

    let mut seed = 0xA57E;
    let mut dump = false;
    for arg in std::env::args().skip(1) {
        if arg == "--dump" {
            dump = true;
        } else {
            match arg.parse() {
                Ok(s) => seed = s,
                Err(_) => {
                    eprintln!("usage: astroblast [seed] [--dump]");
                    std::process::exit(2);
                }
            }
        }
    }

    let mut state = GameState::new(seed);
    let mut router = AudioRouter::new();
    let mut sink = LogAudio;
    let mut runs = 0u32;
    let mut best_score = 0u64;

    // One simulated minute
    let total_ticks = 60 * u64::from(TICK_RATE_HZ);
    for t in 0..total_ticks {
        let input = autopilot(&state, t);
        tick(&mut state, &input);

        let events = state.drain_events();
        for event in &events {
            match event {
                GameEvent::GameStarted => runs += 1,
                GameEvent::GameOver => {
                    best_score = best_score.max(state.score);
                    log::info!("run {runs} ended at tick {t}, score {}", state.score);
                }
                GameEvent::WaveSpawned { level, count } => {
                    log::info!("level {level}: {count} asteroids");
                }
                _ => {}
            }
        }
        router.route(&events, &mut sink);

        // A windowed host would blit this; here it only feeds the log
        let draw_list = build_draw_list(&state);
        log::trace!("tick {t}: {} sprites", draw_list.len());
    }

    best_score = best_score.max(state.score);
    log::info!(
        "seed {seed}: {runs} run(s), best score {best_score}, ended on level {} with {} lives",
        state.level,
        state.lives
    );

    if dump {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("state dump failed: {err}"),
        }
    }
}
