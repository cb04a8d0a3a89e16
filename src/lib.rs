//! Ring Pilot - a side-scrolling ring-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, game state)
//! - `report`: Flight-report collaborator boundary (async flavor text)
//!
//! Rendering, audio and UI are external collaborators: they read the
//! simulation state and drain its event queue, but never mutate either.

pub mod report;
pub mod sim;

pub use report::{FlightReporter, ReportChannel, ReportRequest};
pub use sim::{GameEvent, GameState, RunPhase, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// World scroll speed at run start (pixels per tick)
    pub const BASE_SCROLL_SPEED: f32 = 7.0;

    /// Plane defaults - horizontal position is fixed, only y moves
    pub const PLANE_X: f32 = 150.0;
    pub const PLANE_WIDTH: f32 = 80.0;
    pub const PLANE_HEIGHT: f32 = 40.0;
    /// Exhaust puffs appear just behind the plane
    pub const TRAIL_X: f32 = 100.0;
    /// Fraction of the remaining distance to the steering target covered per tick
    pub const PLANE_LERP: f32 = 0.15;
    /// Bank angle magnitude when climbing or diving (radians, ~20 degrees)
    pub const TILT_ANGLE: f32 = 0.35;
    /// Per-tick easing toward the tilt target
    pub const ANGLE_EASE: f32 = 0.1;
    /// Per-tick decay toward level flight when vertical motion is small
    pub const ANGLE_DECAY: f32 = 0.9;
    /// Vertical movement below this many pixels per tick counts as level flight
    pub const BANK_DEADZONE: f32 = 1.0;

    /// Height of the ground band at the bottom of the world
    pub const GROUND_BAND: f32 = 120.0;

    /// Ring geometry
    pub const RING_RADIUS: f32 = 60.0;
    pub const RING_THICKNESS: f32 = 12.0;
    /// Safe hole is the ring radius minus this margin
    pub const RING_INNER_MARGIN: f32 = 10.0;

    /// Hazard geometry
    pub const MINE_RADIUS: f32 = 30.0;
    pub const DRONE_RADIUS: f32 = 30.0;
    /// Extra padding added to hazard radii for the kill test
    pub const HIT_PADDING: f32 = 15.0;

    /// Cosmetic spin rates (radians per tick, independent of scroll speed)
    pub const MINE_SPIN: f32 = 0.05;
    pub const DRONE_SPIN: f32 = 0.1;
    /// Drone lens flicker cycle length in ticks
    pub const DRONE_FLICKER_PERIOD: u8 = 10;

    /// Drones close distance faster than the world scrolls
    pub const DRONE_SPEED_FACTOR: f32 = 1.5;
    /// Drones only appear once the score reaches this threshold
    pub const DRONE_UNLOCK_SCORE: u32 = 10;

    /// Base spawn intervals in seconds (shrink as difficulty rises)
    pub const BASE_RING_INTERVAL: f32 = 1.5;
    pub const BASE_MINE_INTERVAL: f32 = 2.5;
    pub const BASE_DRONE_INTERVAL: f32 = 3.0;
    /// Clouds are cosmetic and spawn at a fixed cadence
    pub const CLOUD_INTERVAL: f32 = 1.0;

    /// Obstacles spawn this far past the right edge
    pub const SPAWN_MARGIN_X: f32 = 100.0;
    pub const CLOUD_SPAWN_MARGIN_X: f32 = 300.0;
    /// Entities scrolled this far past the left edge are pruned
    pub const PRUNE_MARGIN: f32 = 150.0;
    pub const CLOUD_PRUNE_MARGIN: f32 = 400.0;

    /// Score multiple that triggers a speed-up
    pub const SPEEDUP_EVERY: u32 = 5;
    pub const SPEEDUP_FACTOR: f32 = 1.15;
    /// Duration of the cosmetic "Speed Increase!" flash window (ticks)
    pub const SPEED_FLASH_TICKS: u32 = 60;

    /// Particles in a ring-score burst
    pub const SCORE_BURST_PARTICLES: usize = 15;
}
