//! Sound event routing
//!
//! The simulation emits [`GameEvent`]s; the host supplies an [`AudioSink`]
//! that actually makes noise. The router in between latches the thrust loop
//! so starting an already-running loop (or stopping a silent one) is a no-op,
//! which lets the simulation request thrust state every tick without caring
//! what is currently playing.

use crate::sim::state::GameEvent;

/// Fire-and-forget audio requests the host must implement
pub trait AudioSink {
    fn play_shot(&mut self);
    fn play_explosion(&mut self);
    fn start_thrust_loop(&mut self);
    fn stop_thrust_loop(&mut self);
}

/// Sink that discards everything (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_shot(&mut self) {}
    fn play_explosion(&mut self) {}
    fn start_thrust_loop(&mut self) {}
    fn stop_thrust_loop(&mut self) {}
}

/// Maps drained game events onto an audio sink, deduplicating the per-tick
/// thrust requests into loop start/stop edges.
#[derive(Debug, Default)]
pub struct AudioRouter {
    thrust_looping: bool,
}

impl AudioRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one tick's worth of events into the sink
    pub fn route<S: AudioSink>(&mut self, events: &[GameEvent], sink: &mut S) {
        for event in events {
            match event {
                GameEvent::ShotFired => sink.play_shot(),
                GameEvent::ExplosionSpawned => sink.play_explosion(),
                GameEvent::ThrustOn => {
                    if !self.thrust_looping {
                        sink.start_thrust_loop();
                        self.thrust_looping = true;
                    }
                }
                GameEvent::ThrustOff => {
                    if self.thrust_looping {
                        sink.stop_thrust_loop();
                        self.thrust_looping = false;
                    }
                }
                // Not sound-shaped; hosts handle these elsewhere
                GameEvent::GameStarted
                | GameEvent::GameOver
                | GameEvent::WaveSpawned { .. } => {}
            }
        }
    }
}
