//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame, no delta time
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ball;
pub mod brick;
pub mod collision;
pub mod paddle;
pub mod rect;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallEvent};
pub use brick::{Brick, BrickHit, PickupKind};
pub use collision::{CollisionKind, EdgeContact, arena_edge_contact, classify, intrusion, resolve_collision};
pub use paddle::{CollisionZone, Paddle, PaddleSide};
pub use rect::Rect;
pub use state::{FrameSnapshot, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, generate_bricks, tick};
