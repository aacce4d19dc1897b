//! Bricks and the pickups they carry

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// One extra ball at the standard spawn point
    MultiBall,
    /// Destructible left and right satellite paddles
    MultiPaddle,
}

/// Report produced when a ball breaks a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickHit {
    pub brick_id: u32,
    /// Pickup detached from the brick, if it carried one
    pub pickup: Option<PickupKind>,
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub rect: Rect,
    pub pickup: Option<PickupKind>,
    /// Set on the first ball contact; the brick is removed at the end of the frame
    pub hit: bool,
}

impl Brick {
    pub fn new(id: u32, rect: Rect, pickup: Option<PickupKind>) -> Self {
        Self {
            id,
            rect,
            pickup,
            hit: false,
        }
    }

    /// Report a hit if the ball overlaps this brick
    ///
    /// A brick reports at most once: the first overlap marks it hit and
    /// detaches its pickup, later overlaps in the same frame are ignored.
    pub fn on_ball_overlap(&mut self, ball: &Rect) -> Option<BrickHit> {
        if self.hit || !ball.overlaps(&self.rect) {
            return None;
        }
        self.hit = true;
        Some(BrickHit {
            brick_id: self.id,
            pickup: self.pickup.take(),
        })
    }
}
