//! Collision geometry for the player's collision point
//!
//! The plane collides as a single point near the nose, not its full
//! bounding box. Rings partition space into three zones: the safe hole
//! (score), the solid band (lethal) and the outside (no effect).

use glam::Vec2;

use crate::consts::{GROUND_BAND, HIT_PADDING, RING_INNER_MARGIN};

/// Outcome of testing the player point against a ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingZone {
    /// Inside the hole: award score
    Hole,
    /// On the solid band: lethal
    Band,
    /// Clear of the ring entirely
    Clear,
}

/// Classify the player point against a ring's annulus.
///
/// The hole shrinks by `RING_INNER_MARGIN` so grazing the inner edge of
/// the band still counts as a hit.
pub fn ring_zone(point: Vec2, center: Vec2, radius: f32, thickness: f32) -> RingZone {
    let dist = point.distance(center);
    if dist < radius - RING_INNER_MARGIN {
        RingZone::Hole
    } else if dist < radius + thickness {
        RingZone::Band
    } else {
        RingZone::Clear
    }
}

/// Lethal-contact test against a circular hazard (mine or drone).
///
/// The hazard radius is padded by `HIT_PADDING` so the plane's body, not
/// just its nose point, reads as hit.
#[inline]
pub fn hazard_hit(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius + HIT_PADDING
}

/// True when the plane has left the playable vertical band.
///
/// The band runs from the top of the world to the top of the ground band.
#[inline]
pub fn out_of_bounds(plane_y: f32, world_height: f32) -> bool {
    plane_y < 0.0 || plane_y > world_height - GROUND_BAND
}
