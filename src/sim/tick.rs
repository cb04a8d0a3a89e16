//! Fixed timestep simulation tick
//!
//! One tick corresponds to one animation frame at 60 Hz. All smoothing
//! factors are per-tick multipliers, so the fixed timestep is load-bearing:
//! the driver must call [`tick`] at `SIM_DT` cadence (accumulator loop),
//! never with a variable dt.
//!
//! Tick order: input, plane motion, spawners, obstacle motion, collision
//! and scoring (rings, then mines, then drones, then bounds - first lethal
//! wins and ends the tick), then a single prune pass.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::collision::{self, RingZone};
use super::state::{GameEvent, GameState, Particle, RunPhase, ScoreVisual, TerminationCause};
use super::{difficulty, spawn};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest pointer/touch vertical position; last write wins, no queuing.
    /// Non-finite values are ignored, finite ones clamped to the world.
    pub target_y: Option<f32>,
}

/// Advance the simulation by one fixed timestep. No-op unless Active.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != RunPhase::Active {
        return;
    }

    state.time_ticks += 1;
    let now = state.elapsed();

    // Cosmetic decay
    state.shake *= 0.9;
    if state.shake < 0.01 {
        state.shake = 0.0;
    }
    state.speed_flash_ticks = state.speed_flash_ticks.saturating_sub(1);
    state.ground_offset += state.scroll_speed * 0.8;

    steer(state, input);
    move_plane(state);
    emit_trail_puff(state);

    spawn::run(state, now);
    advance_obstacles(state);

    if let Some(cause) = resolve_collisions(state) {
        // First lethal contact ends the run immediately; the rest of the
        // tick (cosmetics, prune) is skipped.
        state.terminate(cause);
        return;
    }

    advance_cosmetics(state);
    prune(state);
}

/// Consume the latest steering target. NaN or infinite input must never
/// reach plane state; a crash mid-run is unacceptable.
fn steer(state: &mut GameState, input: &TickInput) {
    if let Some(target) = input.target_y {
        if target.is_finite() {
            state.plane.target_y = target.clamp(0.0, state.height);
        }
    }
}

/// Exponential smoothing toward the target, bank angle from the motion
fn move_plane(state: &mut GameState) {
    let plane = &mut state.plane;
    let prev_y = plane.y;
    plane.y += (plane.target_y - plane.y) * PLANE_LERP;
    plane.velocity = plane.y - prev_y;

    if plane.velocity.abs() > BANK_DEADZONE {
        let target_angle = if plane.velocity > 0.0 {
            TILT_ANGLE
        } else {
            -TILT_ANGLE
        };
        plane.angle += (target_angle - plane.angle) * ANGLE_EASE;
    } else {
        // Idle leveling
        plane.angle *= ANGLE_DECAY;
    }
}

/// Exhaust puff behind the plane, every other tick
fn emit_trail_puff(state: &mut GameState) {
    if !state.time_ticks.is_multiple_of(2) {
        return;
    }
    let y_jitter = state.rng.random_range(-5.0..5.0);
    let vy = state.rng.random_range(-1.0..1.0);
    let size = state.rng.random_range(3.0..8.0);
    state.trails.push(Particle {
        pos: Vec2::new(TRAIL_X, state.plane.y + y_jitter),
        vel: Vec2::new(-state.scroll_speed * 0.5, vy),
        life: 1.0,
        size,
    });
}

fn advance_obstacles(state: &mut GameState) {
    let scroll = state.scroll_speed;
    for ring in &mut state.rings {
        ring.pos.x -= scroll;
    }
    for mine in &mut state.mines {
        mine.pos.x -= scroll;
        mine.rotation += MINE_SPIN;
    }
    for drone in &mut state.drones {
        drone.pos.x -= scroll * DRONE_SPEED_FACTOR;
        drone.rotation += DRONE_SPIN;
        drone.flicker = (drone.flicker + 1) % DRONE_FLICKER_PERIOD;
    }
}

/// Collision and scoring for the plane's nose point.
///
/// Evaluation order is observable and fixed: rings, then mines, then
/// drones, then world bounds. Rings scored before a lethal contact in the
/// same tick still count.
fn resolve_collisions(state: &mut GameState) -> Option<TerminationCause> {
    let point = state.plane.collision_point();

    let mut scored_at: Vec<Vec2> = Vec::new();
    let mut lethal = None;
    for ring in &mut state.rings {
        // A ring is only judged once it has reached the plane's x, and a
        // passed ring stays passed - no double scoring.
        if ring.passed || ring.pos.x > point.x {
            continue;
        }
        match collision::ring_zone(point, ring.pos, ring.radius, ring.thickness) {
            RingZone::Hole => {
                ring.passed = true;
                scored_at.push(ring.pos);
            }
            RingZone::Band => {
                lethal = Some(TerminationCause::RingBand);
                break;
            }
            RingZone::Clear => {}
        }
    }
    for pos in scored_at {
        award_ring(state, pos);
    }
    if lethal.is_some() {
        return lethal;
    }

    if state
        .mines
        .iter()
        .any(|m| collision::hazard_hit(point, m.pos, m.radius))
    {
        return Some(TerminationCause::Mine);
    }
    if state
        .drones
        .iter()
        .any(|d| collision::hazard_hit(point, d.pos, d.radius))
    {
        return Some(TerminationCause::Drone);
    }
    if collision::out_of_bounds(state.plane.y, state.height) {
        return Some(TerminationCause::OutOfBounds);
    }
    None
}

/// Score a clean ring pass: bump the score, notify collaborators, spawn
/// the celebration cosmetics, then let the difficulty controller look.
fn award_ring(state: &mut GameState, pos: Vec2) {
    state.score += 1;
    state.shake = 8.0;
    state.push_event(GameEvent::RingScored { pos });
    state.visuals.push(ScoreVisual {
        pos,
        text: "DING!".to_string(),
        life: 1.0,
    });
    for _ in 0..SCORE_BURST_PARTICLES {
        let vx = state.rng.random_range(-6.0..6.0);
        let vy = state.rng.random_range(-6.0..6.0);
        state.particles.push(Particle {
            pos,
            vel: Vec2::new(vx, vy),
            life: 1.0,
            size: 4.0,
        });
    }
    difficulty::on_score_changed(state);
}

fn advance_cosmetics(state: &mut GameState) {
    for cloud in &mut state.clouds {
        cloud.pos.x -= cloud.speed;
    }
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.life -= 0.02;
    }
    for puff in &mut state.trails {
        puff.pos += puff.vel;
        puff.life -= 0.03;
    }
    for visual in &mut state.visuals {
        visual.pos.y -= 1.5;
        visual.life -= 0.02;
    }
}

/// Single retain pass per collection, after all per-entity updates.
/// Nothing past the prune margin survives a completed tick.
fn prune(state: &mut GameState) {
    state.rings.retain(|r| r.pos.x >= -PRUNE_MARGIN);
    state.mines.retain(|m| m.pos.x >= -PRUNE_MARGIN);
    state.drones.retain(|d| d.pos.x >= -PRUNE_MARGIN);
    state.clouds.retain(|c| c.pos.x >= -CLOUD_PRUNE_MARGIN);
    state.particles.retain(|p| p.life > 0.0);
    state.trails.retain(|p| p.life > 0.0);
    state.visuals.retain(|v| v.life > 0.0);
}
