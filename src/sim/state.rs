//! Game state and core simulation types
//!
//! All state that must be persisted for snapshots/determinism lives here.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, EntityManager};
use crate::assets::SpriteKind;
use crate::consts::*;
use crate::heading_vector;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen; asteroids drift in the background
    Menu,
    /// Active gameplay
    Playing,
}

/// Fire-and-forget notifications emitted by the simulation each tick.
///
/// The host drains these after every tick and maps the sound-shaped ones
/// onto its audio sink (see [`crate::audio::AudioRouter`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A shot was actually fired (cooldown permitted it)
    ShotFired,
    /// An explosion animation started
    ExplosionSpawned,
    /// Thrust is held this tick; the thrust loop should be playing
    ThrustOn,
    /// Thrust is released this tick; the thrust loop should be silent
    ThrustOff,
    /// A new run started from the menu
    GameStarted,
    /// The last life was lost
    GameOver,
    /// A fresh asteroid wave spawned
    WaveSpawned { level: u32, count: u32 },
}

/// The player's ship.
///
/// A session-long singleton: `body.dead` gates drawing, control, and
/// collision, never destruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    body: Body,
    /// Mirrors the thrust input each playing tick
    pub thrust: bool,
}

impl Ship {
    pub fn new(position: Vec2) -> Self {
        let mut body = Body::new(SpriteKind::Ship, position);
        body.wrap = true;
        Self { body, thrust: false }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Unit vector the nose points along
    pub fn heading(&self) -> Vec2 {
        heading_vector(self.body.rotation())
    }

    /// Advance one tick. Runs in every phase, dead or not: thrust picks the
    /// animation frame and accelerates along the heading, drag always
    /// applies, and the thrust-loop request for this tick is emitted.
    pub fn update(&mut self, events: &mut Vec<GameEvent>) {
        if self.thrust {
            self.body.set_frame(1);
            let accel = self.heading() * SHIP_THRUST_ACCEL;
            self.body.velocity += accel;
            events.push(GameEvent::ThrustOn);
        } else {
            self.body.set_frame(0);
            events.push(GameEvent::ThrustOff);
        }
        self.body.velocity *= SHIP_DRAG;
        self.body.step();
    }
}

/// A fired shot with a finite time-to-live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    body: Body,
    ttl: u32,
}

impl Shot {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        let mut body = Body::new(SpriteKind::Shot, position);
        body.wrap = true;
        body.velocity = velocity;
        Self { body, ttl: SHOT_TTL_TICKS }
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }
}

impl Entity for Shot {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self) {
        if self.ttl > 0 {
            self.ttl -= 1;
            if self.ttl == 0 {
                self.body.dead = true;
            }
        }
        // The shot still moves on its dying tick
        self.body.step();
    }
}

/// A drifting rock in one of three scale tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    body: Body,
}

impl Asteroid {
    pub fn new(position: Vec2, velocity: Vec2, spin: f32, scale: f32) -> Self {
        let mut body = Body::new(SpriteKind::Asteroid, position);
        body.wrap = true;
        body.velocity = velocity;
        body.spin = spin;
        body.set_scale(scale);
        Self { body }
    }

    pub fn scale(&self) -> f32 {
        self.body.scale()
    }
}

impl Entity for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self) {
        self.body.step();
    }
}

/// A fixed-length explosion animation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    body: Body,
}

impl Explosion {
    pub fn new(position: Vec2) -> Self {
        Self { body: Body::new(SpriteKind::Explosion, position) }
    }
}

impl Entity for Explosion {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self) {
        self.body.set_frame(self.body.frame() + 1);
        // Dies when the index reaches 23, one tick before the last frame
        // would draw
        if self.body.frame() == 23 {
            self.body.dead = true;
        }
        self.body.step();
    }
}

/// Shot collection plus the fire-rate cooldown
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShotManager {
    shots: EntityManager<Shot>,
    cooldown: u32,
}

impl ShotManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick the cooldown (always), then update-and-reap the shots
    pub fn update(&mut self) {
        if self.cooldown > 0 {
            self.cooldown -= 1;
        }
        self.shots.update();
    }

    /// Fire a shot unless the cooldown is still running. A successful fire
    /// resets the cooldown and requests the shot sound.
    pub fn add_shot(&mut self, position: Vec2, velocity: Vec2, events: &mut Vec<GameEvent>) {
        if self.cooldown == 0 {
            self.shots.push(Shot::new(position, velocity));
            self.cooldown = SHOT_COOLDOWN_TICKS;
            events.push(GameEvent::ShotFired);
        }
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn draw(&self, out: &mut Vec<crate::draw::DrawCommand>) {
        self.shots.draw(SpriteKind::Shot, out);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shot> {
        self.shots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Shot> {
        self.shots.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }
}

/// Asteroid collection plus random spawning and split spawning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AsteroidManager {
    asteroids: EntityManager<Asteroid>,
}

impl AsteroidManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self) {
        self.asteroids.update();
    }

    /// Spawn one asteroid. Position defaults to a uniform random point on
    /// the canvas; heading is uniform in [0, 360), spin a uniform integer
    /// in [-10, 10] degrees per tick.
    pub fn add_asteroid(&mut self, scale: f32, position: Option<Vec2>, rng: &mut Pcg32) {
        let position = position.unwrap_or_else(|| {
            Vec2::new(
                rng.random_range(0.0..CANVAS_WIDTH),
                rng.random_range(0.0..CANVAS_HEIGHT),
            )
        });
        let heading = rng.random_range(0.0..360.0f32).to_radians();
        let velocity = Vec2::new(heading.cos(), heading.sin()) * ASTEROID_SPEED;
        let spin = rng.random_range(-ASTEROID_MAX_SPIN..=ASTEROID_MAX_SPIN) as f32;
        self.asteroids.push(Asteroid::new(position, velocity, spin, scale));
    }

    /// Spawn `count` full-scale asteroids at random positions (level start)
    pub fn add_asteroids(&mut self, count: u32, rng: &mut Pcg32) {
        for _ in 0..count {
            self.add_asteroid(ASTEROID_SCALE_LARGE, None, rng);
        }
    }

    pub fn draw(&self, out: &mut Vec<crate::draw::DrawCommand>) {
        self.asteroids.draw(SpriteKind::Asteroid, out);
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Asteroid> {
        self.asteroids.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Asteroid> {
        self.asteroids.iter()
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    pub fn clear(&mut self) {
        self.asteroids.clear();
    }
}

/// Explosion collection; spawning also requests the explosion sound
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplosionManager {
    explosions: EntityManager<Explosion>,
}

impl ExplosionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self) {
        self.explosions.update();
    }

    pub fn add_explosion(&mut self, position: Vec2, events: &mut Vec<GameEvent>) {
        self.explosions.push(Explosion::new(position));
        events.push(GameEvent::ExplosionSpawned);
    }

    pub fn draw(&self, out: &mut Vec<crate::draw::DrawCommand>) {
        self.explosions.draw(SpriteKind::Explosion, out);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Explosion> {
        self.explosions.iter()
    }

    pub fn len(&self) -> usize {
        self.explosions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explosions.is_empty()
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving all spawn randomness
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Current level (wave number)
    pub level: u32,
    /// Remaining lives
    pub lives: u32,
    /// Score
    pub score: u64,
    /// Ticks until the dead ship revives; 0 means not armed
    pub respawn_ticks: u32,
    /// Menu text blink countdown
    pub text_blink: u32,
    /// Menu text visibility (cosmetic)
    pub text_visible: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// The player's ship
    pub ship: Ship,
    pub shots: ShotManager,
    pub asteroids: AsteroidManager,
    pub explosions: ExplosionManager,
    /// Events emitted this tick, drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state on the menu screen. The ship exists but starts dead; the
    /// first tick spawns the drifting background wave.
    pub fn new(seed: u64) -> Self {
        let mut ship = Ship::new(Vec2::new(100.0, 100.0));
        ship.body_mut().dead = true;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            level: 0,
            lives: 0,
            score: 0,
            respawn_ticks: 0,
            text_blink: 0,
            text_visible: true,
            time_ticks: 0,
            ship,
            shots: ShotManager::new(),
            asteroids: AsteroidManager::new(),
            explosions: ExplosionManager::new(),
            events: Vec::new(),
        }
    }

    /// Begin a new run: revive the ship at canvas center, replace whatever
    /// is drifting behind the menu with the first wave, reset bookkeeping.
    pub fn start_game(&mut self) {
        let center = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
        self.ship.body_mut().set_position(center);
        self.ship.body_mut().dead = false;
        self.asteroids.clear();
        self.asteroids.add_asteroids(FIRST_WAVE_ASTEROIDS, &mut self.rng);
        self.level = 1;
        self.lives = STARTING_LIVES;
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::GameStarted);
        log::info!("run started, seed {}", self.seed);
    }

    /// Take this tick's events, leaving the buffer empty for the next tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_shot_ttl_counts_down_to_death() {
        let mut shot = Shot::new(Vec2::new(10.0, 10.0), Vec2::ZERO);
        for i in 0..SHOT_TTL_TICKS {
            assert!(!shot.is_dead(), "shot died early at tick {i}");
            shot.update();
            assert_eq!(shot.ttl(), SHOT_TTL_TICKS - 1 - i);
        }
        assert!(shot.is_dead());
    }

    #[test]
    fn test_shot_moves_and_wraps() {
        let mut shot = Shot::new(Vec2::new(CANVAS_WIDTH - 1.0, 300.0), Vec2::new(3.0, 0.0));
        shot.update();
        assert_eq!(shot.body().position(), Vec2::new(2.0, 300.0));
    }

    #[test]
    fn test_shot_cooldown_gates_fire() {
        let mut manager = ShotManager::new();
        let mut events = Vec::new();

        manager.add_shot(Vec2::ZERO, Vec2::X, &mut events);
        assert_eq!(manager.len(), 1);
        assert_eq!(events, vec![GameEvent::ShotFired]);

        // Second fire inside the cooldown window is a no-op
        events.clear();
        manager.add_shot(Vec2::ZERO, Vec2::X, &mut events);
        assert_eq!(manager.len(), 1);
        assert!(events.is_empty());

        // Cooldown ticks down once per update regardless of firing
        for _ in 0..SHOT_COOLDOWN_TICKS {
            assert_eq!(manager.len(), 1);
            manager.update();
        }
        manager.add_shot(Vec2::ZERO, Vec2::X, &mut events);
        assert_eq!(manager.len(), 2);
        assert_eq!(events, vec![GameEvent::ShotFired]);
    }

    #[test]
    fn test_ship_thrust_accelerates_along_heading() {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        ship.body_mut().set_rotation(90.0); // nose up
        ship.thrust = true;
        let mut events = Vec::new();
        ship.update(&mut events);

        let vel = ship.body().velocity;
        assert!(vel.x.abs() < 1e-5);
        // Upward in screen space, scaled by accel then drag
        assert!((vel.y - (-SHIP_THRUST_ACCEL * SHIP_DRAG)).abs() < 1e-5);
        assert_eq!(ship.body().frame(), 1);
        assert!(events.contains(&GameEvent::ThrustOn));
    }

    #[test]
    fn test_ship_drag_decays_velocity() {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        ship.body_mut().velocity = Vec2::new(10.0, 0.0);
        let mut events = Vec::new();
        ship.update(&mut events);
        assert!((ship.body().velocity.x - 10.0 * SHIP_DRAG).abs() < 1e-5);
        assert_eq!(ship.body().frame(), 0);
        assert!(events.contains(&GameEvent::ThrustOff));
    }

    #[test]
    fn test_explosion_dies_at_frame_23() {
        let mut explosion = Explosion::new(Vec2::ZERO);
        for _ in 0..22 {
            explosion.update();
            assert!(!explosion.is_dead());
        }
        assert_eq!(explosion.body().frame(), 22);
        explosion.update();
        assert_eq!(explosion.body().frame(), 23);
        assert!(explosion.is_dead());
    }

    #[test]
    fn test_asteroid_spawn_parameters() {
        let mut manager = AsteroidManager::new();
        let mut rng = test_rng();
        manager.add_asteroids(20, &mut rng);
        assert_eq!(manager.len(), 20);

        for asteroid in manager.iter() {
            let pos = asteroid.body().position();
            assert!(pos.x >= 0.0 && pos.x < CANVAS_WIDTH);
            assert!(pos.y >= 0.0 && pos.y < CANVAS_HEIGHT);
            // Unit drift speed
            assert!((asteroid.body().velocity.length() - ASTEROID_SPEED).abs() < 1e-4);
            let spin = asteroid.body().spin;
            assert!(spin >= -(ASTEROID_MAX_SPIN as f32) && spin <= ASTEROID_MAX_SPIN as f32);
            assert_eq!(spin.fract(), 0.0);
            assert_eq!(asteroid.scale(), ASTEROID_SCALE_LARGE);
        }
    }

    #[test]
    fn test_asteroid_spawn_at_fixed_position() {
        let mut manager = AsteroidManager::new();
        let mut rng = test_rng();
        let pos = Vec2::new(123.0, 456.0);
        manager.add_asteroid(ASTEROID_SCALE_MEDIUM, Some(pos), &mut rng);
        let asteroid = manager.iter().next().unwrap();
        assert_eq!(asteroid.body().position(), pos);
        assert_eq!(asteroid.scale(), ASTEROID_SCALE_MEDIUM);
        // Radius derives from the scaled sprite half-width
        assert_eq!(asteroid.body().radius(), 45.0 * ASTEROID_SCALE_MEDIUM);
    }

    #[test]
    fn test_start_game_resets_run() {
        let mut state = GameState::new(7);
        state.score = 555;
        state.start_game();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.score, 0);
        assert_eq!(state.asteroids.len(), FIRST_WAVE_ASTEROIDS as usize);
        assert!(!state.ship.body().dead);
        assert_eq!(
            state.ship.body().position(),
            Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0)
        );
        assert!(state.events.contains(&GameEvent::GameStarted));
    }

    #[test]
    fn test_same_seed_same_wave() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        a.start_game();
        b.start_game();
        for (x, y) in a.asteroids.iter().zip(b.asteroids.iter()) {
            assert_eq!(x.body().position(), y.body().position());
            assert_eq!(x.body().velocity, y.body().velocity);
            assert_eq!(x.body().spin, y.body().spin);
        }
    }
}
