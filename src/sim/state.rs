//! Game state and top-level phases
//!
//! Everything the renderer reads and every piece of state the simulation
//! advances lives here. Collections only change inside the `Playing` update
//! step or when the whole layout is rebuilt by [`GameState::reset`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::brick::{Brick, PickupKind};
use super::paddle::{Paddle, PaddleSide};
use super::rect::Rect;
use super::tick::{TickInput, generate_bricks, tick};
use crate::config::{ConfigError, GameConfig};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first touch
    Intro,
    /// Active gameplay
    Playing,
    /// Every ball fell out of the arena
    GameOver,
    /// Every brick was destroyed
    Won,
}

impl GamePhase {
    /// Text shown over the arena in this phase
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            GamePhase::Intro => Some("Welcome to Breakout! Touch to start!"),
            GamePhase::Playing => None,
            GamePhase::GameOver => Some("Game Over. Touch to play again"),
            GamePhase::Won => Some("Congratulations! You won! Touch to play again!"),
        }
    }
}

/// Notable things that happened during a tick, in the order they were applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    BrickDestroyed {
        brick_id: u32,
        pickup: Option<PickupKind>,
    },
    PaddleDestroyed { paddle_id: u32 },
    PaddleSpawned { paddle_id: u32, side: PaddleSide },
    BallLost { ball_id: u32 },
    BallSpawned { ball_id: u32 },
}

/// What a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub banner: Option<&'static str>,
    pub balls: Vec<Rect>,
    pub paddles: Vec<Rect>,
    pub bricks: Vec<Rect>,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Immutable tuning for this game
    pub config: GameConfig,
    /// Seed the RNG was created from
    pub seed: u64,
    /// Source for initial ball velocity and pickup placement
    rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Frames simulated while playing
    pub time_ticks: u64,
    /// Live balls (sorted by id for determinism)
    pub balls: Vec<Ball>,
    /// Live paddles (sorted by id for determinism)
    pub paddles: Vec<Paddle>,
    /// Live bricks in row-major order, top row first
    pub bricks: Vec<Brick>,
    /// Live left satellite paddle, if any
    pub left_satellite: Option<u32>,
    /// Live right satellite paddle, if any
    pub right_satellite: Option<u32>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a game with the default config
    pub fn new(seed: u64) -> Self {
        let config = GameConfig::default();
        Self::build(config, seed)
    }

    /// Create a game with a custom config, rejecting invalid tuning
    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        let mut state = Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Intro,
            time_ticks: 0,
            balls: Vec::new(),
            paddles: Vec::new(),
            bricks: Vec::new(),
            left_satellite: None,
            right_satellite: None,
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Rebuild the starting layout and return to the intro screen
    ///
    /// The RNG keeps running, so a reset game gets a fresh initial velocity
    /// and pickup placement while every position matches a new game.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Intro;
        self.time_ticks = 0;
        self.next_id = 1;
        self.balls.clear();
        self.paddles.clear();
        self.bricks.clear();
        self.left_satellite = None;
        self.right_satellite = None;

        self.spawn_ball();
        let paddle_id = self.next_entity_id();
        self.paddles.push(Paddle::primary(paddle_id, &self.config));
        generate_bricks(self);

        log::info!(
            "Layout ready: {} ball, {} paddle, {} bricks",
            self.balls.len(),
            self.paddles.len(),
            self.bricks.len()
        );
    }

    /// Handle the touch/click that starts or restarts the game
    pub fn on_activation_input(&mut self) -> Option<GameEvent> {
        let from = self.phase;
        match self.phase {
            GamePhase::Intro => self.phase = GamePhase::Playing,
            GamePhase::GameOver | GamePhase::Won => self.reset(),
            GamePhase::Playing => return None,
        }
        log::info!("Phase {:?} -> {:?}", from, self.phase);
        Some(GameEvent::PhaseChanged {
            from,
            to: self.phase,
        })
    }

    /// Advance one frame with an optional pointer position in arena space
    pub fn advance(&mut self, pointer: Option<Vec2>) -> Vec<GameEvent> {
        let input = TickInput {
            pointer,
            ..Default::default()
        };
        tick(self, &input)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Random initial horizontal velocity, a whole number in the configured range
    pub fn roll_initial_vel_x(&mut self) -> f32 {
        let (min, max) = (
            self.config.min_initial_ball_vel_x,
            self.config.max_initial_ball_vel_x,
        );
        self.rng.random_range(min..=max) as f32
    }

    /// Pickup for one freshly laid brick, if it gets one
    pub fn roll_pickup(&mut self) -> Option<PickupKind> {
        if !self.rng.random_bool(self.config.pickup_chance) {
            return None;
        }
        if self.rng.random_bool(self.config.multiball_share) {
            Some(PickupKind::MultiBall)
        } else {
            Some(PickupKind::MultiPaddle)
        }
    }

    /// Spawn a ball at the standard spawn point and return its ID
    pub fn spawn_ball(&mut self) -> u32 {
        let vel_x = self.roll_initial_vel_x();
        let id = self.next_entity_id();
        self.balls.push(Ball::spawn(id, &self.config, vel_x));
        id
    }

    /// Spawn a satellite on each side that doesn't already have one
    ///
    /// Satellites are placed relative to the primary paddle so they line up
    /// with where the next input would put them.
    pub fn spawn_satellites(&mut self) -> Vec<(u32, PaddleSide)> {
        let anchor_x = self
            .paddles
            .iter()
            .find(|p| !p.destructible)
            .map(|p| p.rect.x)
            .unwrap_or(self.config.arena_width / 2.0 - self.config.paddle_width / 2.0);

        let mut spawned = Vec::new();
        for side in [PaddleSide::Left, PaddleSide::Right] {
            let occupied = match side {
                PaddleSide::Left => self.left_satellite.is_some(),
                PaddleSide::Right => self.right_satellite.is_some(),
            };
            if occupied {
                continue;
            }
            let id = self.next_entity_id();
            self.paddles
                .push(Paddle::satellite(id, &self.config, side, anchor_x));
            match side {
                PaddleSide::Left => self.left_satellite = Some(id),
                PaddleSide::Right => self.right_satellite = Some(id),
            }
            spawned.push((id, side));
        }
        spawned
    }

    /// Drop paddles that took their final hit, freeing their satellite slot
    pub fn remove_destroyed_paddles(&mut self) -> Vec<u32> {
        let mut removed = Vec::new();
        for paddle in self.paddles.iter().filter(|p| p.destroyed) {
            removed.push(paddle.id);
            let slot = match paddle.side() {
                Some(PaddleSide::Left) => &mut self.left_satellite,
                Some(PaddleSide::Right) => &mut self.right_satellite,
                None => continue,
            };
            if *slot == Some(paddle.id) {
                *slot = None;
            }
        }

        if !removed.is_empty() {
            self.paddles.retain(|p| !p.destroyed);
        }
        removed
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
        self.paddles.sort_by_key(|p| p.id);
        self.bricks.sort_by_key(|b| b.id);
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn paddles(&self) -> &[Paddle] {
        &self.paddles
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    pub fn is_lost(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Positions of everything on screen plus the phase banner
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase,
            banner: self.phase.banner(),
            balls: self.balls.iter().map(|b| b.rect).collect(),
            paddles: self.paddles.iter().map(|p| p.rect).collect(),
            bricks: self.bricks.iter().map(|b| b.rect).collect(),
        }
    }
}
