//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order, oldest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{RingZone, hazard_hit, out_of_bounds, ring_zone};
pub use spawn::speed_multiplier;
pub use state::{
    Cloud, CloudLayer, Drone, GameEvent, GameState, Mine, Particle, Plane, Ring, RunPhase,
    ScoreVisual, TerminationCause,
};
pub use tick::{TickInput, tick};
