//! Time-gated obstacle and cloud spawners
//!
//! Each kind spawns when the sim clock has moved past its interval, then
//! resets its last-spawn timestamp to the current time (not incremented by
//! the interval), so a frame hitch never produces a catch-up burst.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::state::{Cloud, CloudLayer, Drone, GameState, Mine, Ring};

/// Spawn interval scale: higher scroll speed means denser spawns
#[inline]
pub fn speed_multiplier(state: &GameState) -> f32 {
    state.scroll_speed / BASE_SCROLL_SPEED
}

/// Run all spawners for this tick. `now` is the sim clock in seconds.
pub fn run(state: &mut GameState, now: f32) {
    let mult = speed_multiplier(state);

    if now - state.last_ring_spawn > BASE_RING_INTERVAL / mult {
        spawn_ring(state);
        state.last_ring_spawn = now;
    }
    if now - state.last_mine_spawn > BASE_MINE_INTERVAL / mult {
        spawn_mine(state);
        state.last_mine_spawn = now;
    }
    // Drones stay locked until the pilot has proven themselves
    if state.score >= DRONE_UNLOCK_SCORE
        && now - state.last_drone_spawn > BASE_DRONE_INTERVAL / (mult * DRONE_SPEED_FACTOR)
    {
        spawn_drone(state);
        state.last_drone_spawn = now;
    }
    // Cloud cadence is fixed; difficulty never touches the scenery
    if now - state.last_cloud_spawn > CLOUD_INTERVAL {
        spawn_cloud(state);
        state.last_cloud_spawn = now;
    }
}

fn spawn_ring(state: &mut GameState) {
    let id = state.next_entity_id();
    let x = state.width + SPAWN_MARGIN_X;
    // Keep the whole ring reachable: clear of the sky edge and the ground band
    let y = state.rng.random_range(100.0..state.height - 250.0);
    state.rings.push(Ring {
        id,
        pos: Vec2::new(x, y),
        radius: RING_RADIUS,
        thickness: RING_THICKNESS,
        passed: false,
    });
}

fn spawn_mine(state: &mut GameState) {
    let id = state.next_entity_id();
    let x = state.width + SPAWN_MARGIN_X;
    let y = state.rng.random_range(50.0..state.height - 250.0);
    state.mines.push(Mine {
        id,
        pos: Vec2::new(x, y),
        radius: MINE_RADIUS,
        rotation: 0.0,
    });
}

fn spawn_drone(state: &mut GameState) {
    let id = state.next_entity_id();
    let x = state.width + SPAWN_MARGIN_X;
    let y = state.rng.random_range(50.0..state.height - 250.0);
    state.drones.push(Drone {
        id,
        pos: Vec2::new(x, y),
        radius: DRONE_RADIUS,
        rotation: 0.0,
        flicker: 0,
    });
}

fn spawn_cloud(state: &mut GameState) {
    let id = state.next_entity_id();
    let x = state.width + CLOUD_SPAWN_MARGIN_X;
    let y = state.rng.random_range(0.0..state.height - 200.0);
    let far = state.rng.random_range(0.0..1.0) > 0.6;
    let (scale, speed_factor, layer) = if far {
        (state.rng.random_range(0.5..1.0), 0.1, CloudLayer::Far)
    } else {
        (state.rng.random_range(1.0..2.5), 0.3, CloudLayer::Mid)
    };
    state.clouds.push(Cloud {
        id,
        pos: Vec2::new(x, y),
        scale,
        // Parallax speed is frozen at spawn; later speed-ups don't yank the sky
        speed: state.scroll_speed * speed_factor,
        layer,
    });
}
