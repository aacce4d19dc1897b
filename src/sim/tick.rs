//! Fixed-step simulation tick
//!
//! Core game loop that advances the simulation by exactly one frame. The
//! update is split into a pass that only flags entities and collects events,
//! followed by a pass that mutates the collections in a fixed order.

use glam::Vec2;

use super::ball::BallEvent;
use super::brick::{Brick, PickupKind};
use super::rect::Rect;
use super::state::{GameEvent, GamePhase, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Projected touch/click position in arena space, if the pointer is down
    pub pointer: Option<Vec2>,
    /// Touch/click that starts or restarts the game
    pub activate: bool,
    /// Idle/demo mode - the paddles follow the ball on their own
    pub idle_mode: bool,
}

/// Advance the game state by one fixed step
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // A touch that changes phase consumes the frame
    if input.activate {
        if let Some(event) = state.on_activation_input() {
            events.push(event);
            return events;
        }
    }

    match state.phase {
        GamePhase::Intro | GamePhase::GameOver | GamePhase::Won => return events,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    let pointer = if input.idle_mode {
        autopilot_target(state)
    } else {
        input.pointer
    };

    // Move every ball; entities are only flagged here
    let mut ball_events = Vec::new();
    {
        let GameState {
            config,
            balls,
            paddles,
            bricks,
            ..
        } = &mut *state;
        for ball in balls.iter_mut() {
            ball_events.extend(ball.advance(bricks, paddles, config));
        }
    }

    if let Some(target) = pointer {
        for paddle in &mut state.paddles {
            paddle.on_input(target.x);
        }
    }

    let mut balls_to_spawn = 0usize;
    let mut satellites_requested = false;
    for event in ball_events {
        match event {
            BallEvent::BrickHit(hit) => {
                log::debug!("Brick {} destroyed (pickup: {:?})", hit.brick_id, hit.pickup);
                match hit.pickup {
                    Some(PickupKind::MultiBall) => balls_to_spawn += 1,
                    Some(PickupKind::MultiPaddle) => satellites_requested = true,
                    None => {}
                }
                events.push(GameEvent::BrickDestroyed {
                    brick_id: hit.brick_id,
                    pickup: hit.pickup,
                });
            }
            BallEvent::PaddleStruck { .. } | BallEvent::PaddleDestroyed { .. } => {}
        }
    }

    state.bricks.retain(|b| !b.hit);

    for paddle_id in state.remove_destroyed_paddles() {
        log::debug!("Paddle {} destroyed", paddle_id);
        events.push(GameEvent::PaddleDestroyed { paddle_id });
    }

    let config = &state.config;
    let lost: Vec<u32> = state
        .balls
        .iter()
        .filter(|b| b.out_of_bounds(config))
        .map(|b| b.id)
        .collect();
    if !lost.is_empty() {
        state.balls.retain(|b| !lost.contains(&b.id));
        for ball_id in lost {
            log::debug!("Ball {} lost", ball_id);
            events.push(GameEvent::BallLost { ball_id });
        }
    }

    for _ in 0..balls_to_spawn {
        let ball_id = state.spawn_ball();
        log::debug!("MultiBall spawned ball {}", ball_id);
        events.push(GameEvent::BallSpawned { ball_id });
    }

    if satellites_requested {
        for (paddle_id, side) in state.spawn_satellites() {
            log::debug!("MultiPaddle spawned {:?} paddle {}", side, paddle_id);
            events.push(GameEvent::PaddleSpawned { paddle_id, side });
        }
    }

    // Game over takes precedence over a simultaneous win
    let next = if state.balls.is_empty() {
        Some(GamePhase::GameOver)
    } else if state.bricks.is_empty() {
        Some(GamePhase::Won)
    } else {
        None
    };
    if let Some(to) = next {
        log::info!("Phase {:?} -> {:?} after {} ticks", state.phase, to, state.time_ticks);
        events.push(GameEvent::PhaseChanged {
            from: state.phase,
            to,
        });
        state.phase = to;
    }

    // Ensure deterministic ordering
    state.normalize_order();

    events
}

/// Lay out the brick grid against the ceiling, top row first
pub fn generate_bricks(state: &mut GameState) {
    let (brick_width, brick_height) = state.config.brick_size();
    let rows = state.config.brick_rows;
    let per_row = state.config.bricks_per_row;
    let top = state.config.arena_height;

    for row in 0..rows {
        for col in 0..per_row {
            let rect = Rect::new(
                col as f32 * brick_width,
                top - brick_height - row as f32 * brick_height,
                brick_width,
                brick_height,
            );
            let pickup = state.roll_pickup();
            let id = state.next_entity_id();
            state.bricks.push(Brick::new(id, rect, pickup));
        }
    }

    let pickups = state.bricks.iter().filter(|b| b.pickup.is_some()).count();
    log::info!(
        "Bricks: {}x{} grid of {}x{}, {} with pickups",
        rows,
        per_row,
        brick_width,
        brick_height,
        pickups
    );
}

/// Pointer position that keeps the primary paddle under the lowest ball
fn autopilot_target(state: &GameState) -> Option<Vec2> {
    state
        .balls
        .iter()
        .min_by(|a, b| a.rect.y.total_cmp(&b.rect.y))
        .map(|ball| Vec2::new(ball.rect.center_x(), state.config.paddle_y))
}
