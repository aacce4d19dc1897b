//! Game configuration
//!
//! Every size, threshold, velocity and probability the simulation uses lives
//! here. A config is validated once and then handed to the game state, which
//! never mutates it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A size or distance that must be strictly positive is not
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// A probability or factor outside its allowed range
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A position or gap that must be a finite number is not
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    /// Satellites would overlap the paddle they trail
    #[error("satellite_offset {offset} must be at least the paddle width {paddle_width}")]
    SatelliteOverlap { offset: f32, paddle_width: f32 },

    /// Balls must spawn moving toward the paddle
    #[error("initial_ball_vel_y must be negative, got {value}")]
    BallNotFalling { value: f32 },

    /// Brick grid with no rows or no columns
    #[error("brick grid must have at least one row and one column, got {rows}x{per_row}")]
    EmptyBrickGrid { rows: u32, per_row: u32 },

    /// Initial horizontal velocity range is inverted or includes zero
    #[error("initial ball x velocity range [{min}, {max}] is invalid")]
    InvalidVelocityRange { min: i32, max: i32 },

    /// Brick area leaves no room for the ball and paddle
    #[error("brick area height {brick_area} does not fit in arena height {arena}")]
    BrickAreaTooTall { brick_area: f32, arena: f32 },

    /// Config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this struct
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Arena, entity and gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Ball ===
    pub ball_size: f32,
    /// Gap between the spawn point and the bottom of the brick area
    pub ball_spawn_gap: f32,
    pub initial_ball_vel_y: f32,
    /// Inclusive integer range for the randomized initial x velocity
    pub min_initial_ball_vel_x: i32,
    pub max_initial_ball_vel_x: i32,
    pub out_of_bounds_margin: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_y: f32,
    pub paddle_hit_threshold: u32,
    pub satellite_offset: f32,

    // === Collision zones ===
    /// Horizontal speed given by the outer paddle zones
    pub collision_zone_vel_x: f32,
    /// Floor below which the center zone stops slowing the ball
    pub min_vel_x: f32,
    pub vel_x_reduction_factor: f32,

    // === Bricks ===
    pub brick_rows: u32,
    pub bricks_per_row: u32,
    pub brick_area_height: f32,

    // === Pickups ===
    /// Chance that any one brick carries a pickup
    pub pickup_chance: f64,
    /// Share of pickups that are MultiBall (the rest are MultiPaddle)
    pub multiball_share: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            ball_size: BALL_SIZE,
            ball_spawn_gap: BALL_SPAWN_GAP,
            initial_ball_vel_y: INITIAL_BALL_VEL_Y,
            min_initial_ball_vel_x: MIN_INITIAL_BALL_VEL_X,
            max_initial_ball_vel_x: MAX_INITIAL_BALL_VEL_X,
            out_of_bounds_margin: OUT_OF_BOUNDS_MARGIN,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_y: PADDLE_Y,
            paddle_hit_threshold: PADDLE_HIT_THRESHOLD,
            satellite_offset: SATELLITE_OFFSET,

            collision_zone_vel_x: COLLISION_ZONE_VEL_X,
            min_vel_x: MIN_VEL_X,
            vel_x_reduction_factor: VEL_X_REDUCTION_FACTOR,

            brick_rows: BRICK_ROWS,
            bricks_per_row: BRICKS_PER_ROW,
            brick_area_height: BRICK_AREA_HEIGHT,

            pickup_chance: PICKUP_CHANCE,
            multiball_share: MULTIBALL_SHARE,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every precondition the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("ball_size", self.ball_size),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("brick_area_height", self.brick_area_height),
            ("collision_zone_vel_x", self.collision_zone_vel_x),
            ("min_vel_x", self.min_vel_x),
            ("out_of_bounds_margin", self.out_of_bounds_margin),
        ];
        for (field, value) in positive {
            // NaN fails this check too
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("paddle_y", self.paddle_y),
            ("ball_spawn_gap", self.ball_spawn_gap),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        // NaN fails both comparisons
        if !(self.satellite_offset >= self.paddle_width) || !self.satellite_offset.is_finite() {
            return Err(ConfigError::SatelliteOverlap {
                offset: self.satellite_offset,
                paddle_width: self.paddle_width,
            });
        }
        if !(self.initial_ball_vel_y < 0.0) || !self.initial_ball_vel_y.is_finite() {
            return Err(ConfigError::BallNotFalling {
                value: self.initial_ball_vel_y,
            });
        }
        if self.paddle_hit_threshold == 0 {
            return Err(ConfigError::NonPositive {
                field: "paddle_hit_threshold",
                value: 0.0,
            });
        }

        if self.brick_rows == 0 || self.bricks_per_row == 0 {
            return Err(ConfigError::EmptyBrickGrid {
                rows: self.brick_rows,
                per_row: self.bricks_per_row,
            });
        }
        // Bricks are sized by flooring, so each cell must be at least one unit
        if self.arena_width < self.bricks_per_row as f32
            || self.brick_area_height < self.brick_rows as f32
        {
            return Err(ConfigError::NonPositive {
                field: "brick cell size",
                value: (self.arena_width / self.bricks_per_row as f32)
                    .min(self.brick_area_height / self.brick_rows as f32)
                    .floor(),
            });
        }
        if self.brick_area_height + self.ball_size + self.ball_spawn_gap >= self.arena_height {
            return Err(ConfigError::BrickAreaTooTall {
                brick_area: self.brick_area_height,
                arena: self.arena_height,
            });
        }

        if self.min_initial_ball_vel_x < 1 || self.min_initial_ball_vel_x > self.max_initial_ball_vel_x
        {
            return Err(ConfigError::InvalidVelocityRange {
                min: self.min_initial_ball_vel_x,
                max: self.max_initial_ball_vel_x,
            });
        }

        let factor = f64::from(self.vel_x_reduction_factor);
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "vel_x_reduction_factor",
                value: factor,
                min: 0.0,
                max: 1.0,
            });
        }
        for (field, value) in [
            ("pickup_chance", self.pickup_chance),
            ("multiball_share", self.multiball_share),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }

        Ok(())
    }

    /// Brick cell size (width, height), floored to whole units
    pub fn brick_size(&self) -> (f32, f32) {
        (
            (self.arena_width / self.bricks_per_row as f32).floor(),
            (self.brick_area_height / self.brick_rows as f32).floor(),
        )
    }
}
