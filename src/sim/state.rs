//! Game state and core simulation types
//!
//! Screen coordinates: x grows rightward, y grows downward. The ground band
//! occupies the bottom `GROUND_BAND` pixels of the world; obstacles enter
//! just past the right edge and scroll left.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for the start command
    NotStarted,
    /// Run in progress, the tick loop is live
    Active,
    /// Run ended on a lethal contact; requires an explicit restart
    Terminated,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationCause {
    /// Flew into the solid band of a ring
    RingBand,
    Mine,
    Drone,
    /// Left the playable vertical band (sky or ground)
    OutOfBounds,
}

/// Discrete notifications for the render/audio/UI collaborators.
///
/// Drained via [`GameState::take_events`]; losing them never affects the
/// simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A ring was passed cleanly (position given for effect spawning)
    RingScored { pos: Vec2 },
    /// Difficulty ratchet fired
    SpeedIncreased { scroll_speed: f32 },
    /// The run ended
    RunTerminated { score: u32, cause: TerminationCause },
}

/// The player's plane. Horizontal position is the fixed `PLANE_X`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plane {
    /// Current vertical position
    pub y: f32,
    /// Steering target set by pointer input
    pub target_y: f32,
    /// Vertical movement of the last tick (derived, not integrated)
    pub velocity: f32,
    /// Bounding dimensions (for collaborators; collision uses a point)
    pub width: f32,
    pub height: f32,
    /// Bank angle in radians, positive when diving
    pub angle: f32,
}

impl Plane {
    /// Plane centered in the world, level, with its target on itself
    pub fn centered(world_height: f32) -> Self {
        Self {
            y: world_height / 2.0,
            target_y: world_height / 2.0,
            velocity: 0.0,
            width: PLANE_WIDTH,
            height: PLANE_HEIGHT,
            angle: 0.0,
        }
    }

    /// The fixed collision point near the nose
    #[inline]
    pub fn collision_point(&self) -> Vec2 {
        Vec2::new(PLANE_X, self.y)
    }
}

/// A scoring ring. The safe hole is `radius - RING_INNER_MARGIN`; the band
/// between `radius - RING_INNER_MARGIN` and `radius + thickness` is lethal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ring {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub thickness: f32,
    /// Latches true on a clean pass and never reverts
    pub passed: bool,
}

/// A static mine. Always lethal on contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mine {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Cosmetic spin, advances at MINE_SPIN per tick
    pub rotation: f32,
}

/// A pursuing drone. Closes at `DRONE_SPEED_FACTOR` times the scroll speed
/// and only spawns once the score reaches `DRONE_UNLOCK_SCORE`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub rotation: f32,
    /// Cyclic lens-flicker counter (cosmetic)
    pub flicker: u8,
}

/// Background cloud layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudLayer {
    Far,
    Mid,
}

/// A background cloud. Purely cosmetic; drifts at its own fixed speed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub id: u32,
    pub pos: Vec2,
    pub scale: f32,
    /// Pixels per tick, fixed at spawn time from the scroll speed
    pub speed: f32,
    pub layer: CloudLayer,
}

/// A visual particle (score bursts, exhaust puffs). No collision semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, entity is pruned once this reaches zero
    pub life: f32,
    pub size: f32,
}

/// Floating score text ("DING!") rising from a passed ring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreVisual {
    pub pos: Vec2,
    pub text: String,
    pub life: f32,
}

fn fresh_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete simulation state. Owned by the tick-loop driver; collaborators
/// only ever see `&GameState` plus drained events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed of the current run (replay = same seed + same inputs)
    pub seed: u64,
    /// Increments on every start; guards against stale flight reports
    pub run_id: u64,
    /// World dimensions in pixels
    pub width: f32,
    pub height: f32,
    /// Simulation tick counter, reset on start
    pub time_ticks: u64,
    pub phase: RunPhase,
    pub score: u32,
    /// World scroll speed in pixels per tick; the sole difficulty knob
    pub scroll_speed: f32,
    /// Ticks remaining in the cosmetic "Speed Increase!" window
    pub speed_flash_ticks: u32,
    pub plane: Plane,
    pub rings: Vec<Ring>,
    pub mines: Vec<Mine>,
    pub drones: Vec<Drone>,
    pub clouds: Vec<Cloud>,
    pub particles: Vec<Particle>,
    pub trails: Vec<Particle>,
    pub visuals: Vec<ScoreVisual>,
    /// Last spawn time per kind, seconds of sim clock
    pub last_ring_spawn: f32,
    pub last_mine_spawn: f32,
    pub last_drone_spawn: f32,
    pub last_cloud_spawn: f32,
    /// Cosmetic screen shake intensity
    pub shake: f32,
    /// Cosmetic ground/cityscape scroll offset
    pub ground_offset: f32,
    /// RNG for spawn positions and cosmetic jitter; rebuilt from the seed
    /// on deserialize, so snapshots are for collaborators, not replay
    #[serde(skip, default = "fresh_rng")]
    pub(crate) rng: Pcg32,
    next_id: u32,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh state in `NotStarted`. Nothing moves until
    /// [`GameState::start`] is called.
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self {
            seed,
            run_id: 0,
            width,
            height,
            time_ticks: 0,
            phase: RunPhase::NotStarted,
            score: 0,
            scroll_speed: BASE_SCROLL_SPEED,
            speed_flash_ticks: 0,
            plane: Plane::centered(height),
            rings: Vec::new(),
            mines: Vec::new(),
            drones: Vec::new(),
            clouds: Vec::new(),
            particles: Vec::new(),
            trails: Vec::new(),
            visuals: Vec::new(),
            last_ring_spawn: 0.0,
            last_mine_spawn: 0.0,
            last_drone_spawn: 0.0,
            last_cloud_spawn: 0.0,
            shake: 0.0,
            ground_offset: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            events: Vec::new(),
        }
    }

    /// Start (or restart) a run: reset everything, enter `Active`.
    ///
    /// Start and restart are the same operation; a restart after
    /// termination behaves exactly like a fresh run with the given seed.
    pub fn start(&mut self, seed: u64) {
        let width = self.width;
        let height = self.height;
        let run_id = self.run_id + 1;
        *self = Self::new(seed, width, height);
        self.run_id = run_id;
        self.phase = RunPhase::Active;
        log::info!("run {} started (seed {})", run_id, seed);
    }

    /// Seconds of simulation time since the run started
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    /// Allocate an entity id, unique within the run
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain pending events for the render/audio/UI collaborators
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// End the run. Idempotent: re-entering `Terminated` is a no-op.
    pub(crate) fn terminate(&mut self, cause: TerminationCause) {
        if self.phase == RunPhase::Terminated {
            return;
        }
        self.phase = RunPhase::Terminated;
        self.shake = 20.0;
        self.push_event(GameEvent::RunTerminated {
            score: self.score,
            cause,
        });
        log::info!("run {} terminated: {:?}, final score {}", self.run_id, cause, self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_idle_and_empty() {
        let state = GameState::new(1, 1280.0, 720.0);
        assert_eq!(state.phase, RunPhase::NotStarted);
        assert_eq!(state.score, 0);
        assert!(state.rings.is_empty());
        assert_eq!(state.scroll_speed, BASE_SCROLL_SPEED);
        assert_eq!(state.plane.y, 360.0);
    }

    #[test]
    fn start_resets_and_bumps_run_id() {
        let mut state = GameState::new(1, 1280.0, 720.0);
        state.start(1);
        assert_eq!(state.run_id, 1);
        state.score = 12;
        state.scroll_speed = 11.0;
        let ring_id = state.next_entity_id();
        state.rings.push(Ring {
            id: ring_id,
            pos: Vec2::new(400.0, 300.0),
            radius: RING_RADIUS,
            thickness: RING_THICKNESS,
            passed: true,
        });
        state.terminate(TerminationCause::Mine);

        state.start(2);
        assert_eq!(state.run_id, 2);
        assert_eq!(state.phase, RunPhase::Active);
        assert_eq!(state.score, 0);
        assert_eq!(state.scroll_speed, BASE_SCROLL_SPEED);
        assert!(state.rings.is_empty());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn terminate_is_idempotent() {
        let mut state = GameState::new(1, 1280.0, 720.0);
        state.start(1);
        state.terminate(TerminationCause::Mine);
        let events = state.take_events();
        assert!(matches!(
            events.last(),
            Some(GameEvent::RunTerminated { cause: TerminationCause::Mine, .. })
        ));

        // Second terminate must not emit another event or change the cause
        state.terminate(TerminationCause::Drone);
        assert!(state.take_events().is_empty());
        assert_eq!(state.phase, RunPhase::Terminated);
    }

    #[test]
    fn entity_ids_are_unique() {
        let mut state = GameState::new(1, 1280.0, 720.0);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        let c = state.next_entity_id();
        assert!(a != b && b != c && a != c);
    }
}
