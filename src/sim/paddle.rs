//! Player paddles: the primary paddle and pickup-spawned satellites

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;

/// Horizontal band of the paddle's top face a ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionZone {
    Left,
    Center,
    Right,
}

/// Which side of the primary paddle a satellite trails on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleSide {
    Left,
    Right,
}

/// A paddle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub id: u32,
    pub rect: Rect,
    /// Offset from the shared input position (zero for the primary paddle)
    pub horizontal_offset: f32,
    /// Slot a satellite occupies (`None` for the primary paddle)
    pub side: Option<PaddleSide>,
    /// Hits taken so far (destructible paddles only)
    pub hit_count: u32,
    pub destructible: bool,
    /// Reached its hit threshold; removed at the end of the frame
    pub destroyed: bool,
}

impl Paddle {
    /// The indestructible paddle centered at the bottom of the arena
    pub fn primary(id: u32, config: &GameConfig) -> Self {
        let x = config.arena_width / 2.0 - config.paddle_width / 2.0;
        Self {
            id,
            rect: Rect::new(x, config.paddle_y, config.paddle_width, config.paddle_height),
            horizontal_offset: 0.0,
            side: None,
            hit_count: 0,
            destructible: false,
            destroyed: false,
        }
    }

    /// A destructible satellite placed `satellite_offset` to one side of `anchor_x`
    pub fn satellite(id: u32, config: &GameConfig, side: PaddleSide, anchor_x: f32) -> Self {
        let offset = match side {
            PaddleSide::Left => -config.satellite_offset,
            PaddleSide::Right => config.satellite_offset,
        };
        Self {
            id,
            rect: Rect::new(
                anchor_x + offset,
                config.paddle_y,
                config.paddle_width,
                config.paddle_height,
            ),
            horizontal_offset: offset,
            side: Some(side),
            hit_count: 0,
            destructible: true,
            destroyed: false,
        }
    }

    /// Classify where on the paddle a ball landed
    ///
    /// The neutral band spans `width / 8` either side of the center. Both the
    /// center and the band half-width are truncated to whole units, and the
    /// band edges belong to the outer zones.
    pub fn compute_collision_zone(&self, ball: &Rect) -> CollisionZone {
        let center = (self.rect.x + self.rect.width / 2.0) as i32;
        let half_band = (self.rect.width / 8.0) as i32;
        let left_bound = (center - half_band) as f32;
        let right_bound = (center + half_band) as f32;

        if ball.right() <= left_bound {
            CollisionZone::Left
        } else if ball.x >= right_bound {
            CollisionZone::Right
        } else {
            CollisionZone::Center
        }
    }

    /// Count a ball strike. Returns true on exactly the strike that breaks the paddle.
    pub fn record_hit(&mut self, threshold: u32) -> bool {
        if !self.destructible || self.destroyed {
            return false;
        }
        self.hit_count += 1;
        if self.hit_count >= threshold {
            self.destroyed = true;
            return true;
        }
        false
    }

    /// Track the input position with the paddle's center, shifted by its offset
    pub fn on_input(&mut self, x: f32) {
        self.rect.x = x - self.rect.width / 2.0 + self.horizontal_offset;
    }

    /// Satellite side, if this is a satellite
    pub fn side(&self) -> Option<PaddleSide> {
        self.side
    }
}
