//! Breakout Sim - a deterministic breakout game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `config`: Data-driven arena sizes, velocities and pickup odds
//!
//! Rendering, asset loading and input polling live outside this crate. The
//! host feeds an already-projected arena coordinate and reads back snapshots.

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig};

/// Default game constants (arena units, y axis pointing up)
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 480.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 32.0;
    /// Gap between the spawned ball and the bottom of the brick area
    pub const BALL_SPAWN_GAP: f32 = 20.0;
    pub const INITIAL_BALL_VEL_Y: f32 = -5.0;
    pub const MIN_INITIAL_BALL_VEL_X: i32 = 1;
    pub const MAX_INITIAL_BALL_VEL_X: i32 = 5;
    /// How far below the floor the ball must sink before it is lost
    pub const OUT_OF_BOUNDS_MARGIN: f32 = BALL_SIZE;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 128.0;
    pub const PADDLE_HEIGHT: f32 = 32.0;
    pub const PADDLE_Y: f32 = 20.0;
    /// Hits a destructible paddle survives before it breaks
    pub const PADDLE_HIT_THRESHOLD: u32 = 3;
    /// Horizontal distance between the primary paddle and a satellite
    pub const SATELLITE_OFFSET: f32 = 160.0;

    /// Collision zone response
    pub const COLLISION_ZONE_VEL_X: f32 = 5.0;
    pub const MIN_VEL_X: f32 = 1.0;
    pub const VEL_X_REDUCTION_FACTOR: f32 = 0.8;

    /// Brick grid
    pub const BRICK_ROWS: u32 = 4;
    pub const BRICKS_PER_ROW: u32 = 5;
    pub const BRICK_AREA_HEIGHT: f32 = ARENA_HEIGHT / 2.0 - 100.0;

    /// Pickup odds
    pub const PICKUP_CHANCE: f64 = 0.1;
    pub const MULTIBALL_SHARE: f64 = 0.5;
}
