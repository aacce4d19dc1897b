//! Collision classification and response for axis-aligned boxes
//!
//! This is a heuristic, not time-of-impact physics: after a fixed step the
//! ball may be embedded in its target, and the axis with the smaller
//! penetration ("intrusion") is taken as the face it came through.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Which face of the target the mover struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Left or right face: horizontal velocity inverts
    Sides,
    /// Top or bottom face: vertical velocity inverts
    TopOrBottom,
    /// Equal intrusion on both axes: both components invert
    Corner,
}

/// Penetration depth on each axis, measured against the mover's direction of travel
///
/// Moving right, the x intrusion is the gap between the target's left edge and
/// the mover's right edge; moving left (or not at all), between the target's
/// right edge and the mover's left edge. Same for y with up/down.
pub fn intrusion(mover: &Rect, velocity: Vec2, target: &Rect) -> Vec2 {
    let x = if velocity.x > 0.0 {
        (target.x - mover.right()).abs()
    } else {
        (target.right() - mover.x).abs()
    };
    let y = if velocity.y > 0.0 {
        (mover.top() - target.y).abs()
    } else {
        (target.top() - mover.y).abs()
    };
    Vec2::new(x, y)
}

/// Pick the dominant axis from the two intrusions (ties are corners)
#[inline]
pub fn classify(x_intrusion: f32, y_intrusion: f32) -> CollisionKind {
    if x_intrusion < y_intrusion {
        CollisionKind::Sides
    } else if y_intrusion < x_intrusion {
        CollisionKind::TopOrBottom
    } else {
        CollisionKind::Corner
    }
}

/// Reflect a velocity according to the collision kind
#[inline]
pub fn reflect_velocity(velocity: Vec2, kind: CollisionKind) -> Vec2 {
    match kind {
        CollisionKind::Sides => Vec2::new(-velocity.x, velocity.y),
        CollisionKind::TopOrBottom => Vec2::new(velocity.x, -velocity.y),
        CollisionKind::Corner => -velocity,
    }
}

/// Classify a collision between `mover` and `target` and return the reflected velocity
pub fn resolve_collision(mover: &Rect, velocity: Vec2, target: &Rect) -> (CollisionKind, Vec2) {
    let depth = intrusion(mover, velocity, target);
    let kind = classify(depth.x, depth.y);
    (kind, reflect_velocity(velocity, kind))
}

/// Which arena edges a box is touching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeContact {
    /// Left or right wall
    pub side_wall: bool,
    /// Top of the arena
    pub ceiling: bool,
}

/// Check a box against the arena walls and ceiling
///
/// The floor is deliberately absent: falling through it is how a ball is lost.
pub fn arena_edge_contact(rect: &Rect, arena_width: f32, arena_height: f32) -> Option<EdgeContact> {
    let contact = EdgeContact {
        side_wall: rect.x <= 0.0 || rect.right() >= arena_width,
        ceiling: rect.top() >= arena_height,
    };
    (contact.side_wall || contact.ceiling).then_some(contact)
}
