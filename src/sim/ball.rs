//! Ball motion and collision response
//!
//! A ball moves by its full velocity once per frame, then resolves contacts
//! in a fixed order: paddles, arena edges, bricks. It never adds or removes
//! entities itself; everything the coordinator must act on comes back as a
//! [`BallEvent`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::brick::{Brick, BrickHit};
use super::collision::{CollisionKind, arena_edge_contact, resolve_collision};
use super::paddle::{CollisionZone, Paddle};
use super::rect::Rect;
use crate::config::GameConfig;

/// Something that happened to a ball during [`Ball::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallEvent {
    /// Ball bounced off a paddle; `zone` is set for top/bottom hits
    PaddleStruck {
        paddle_id: u32,
        kind: CollisionKind,
        zone: Option<CollisionZone>,
    },
    /// A destructible paddle took its final hit
    PaddleDestroyed { paddle_id: u32 },
    /// Ball broke a brick
    BrickHit(BrickHit),
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub rect: Rect,
    pub vel: Vec2,
    /// Paddle re-entry guard: cleared by a paddle strike, set again by an
    /// arena edge or a brick. Keeps a ball embedded in a paddle from bouncing
    /// back and forth on consecutive frames.
    pub collides_with_paddle: bool,
}

impl Ball {
    /// A ball at the standard spawn point, just below the brick area
    pub fn spawn(id: u32, config: &GameConfig, vel_x: f32) -> Self {
        let x = config.arena_width / 2.0 - config.ball_size / 2.0;
        let y = config.arena_height
            - config.brick_area_height
            - config.ball_size
            - config.ball_spawn_gap;
        Self {
            id,
            rect: Rect::new(x, y, config.ball_size, config.ball_size),
            vel: Vec2::new(vel_x, config.initial_ball_vel_y),
            collides_with_paddle: true,
        }
    }

    /// Advance one fixed step and resolve collisions
    ///
    /// Bricks are checked in slice order and at most one is broken per call.
    /// Paddles and bricks are only flagged (`destroyed`, `hit`); removing them
    /// is left to the caller once every ball has moved.
    pub fn advance(
        &mut self,
        bricks: &mut [Brick],
        paddles: &mut [Paddle],
        config: &GameConfig,
    ) -> Vec<BallEvent> {
        let mut events = Vec::new();

        self.rect.translate(self.vel.x, self.vel.y);

        // Guard sampled once so a ball overlapping two satellites hits both
        if self.collides_with_paddle {
            self.paddle_pass(paddles, config, &mut events);
        }

        if let Some(edge) = arena_edge_contact(&self.rect, config.arena_width, config.arena_height)
        {
            if edge.side_wall {
                self.vel.x = -self.vel.x;
            }
            if edge.ceiling {
                self.vel.y = -self.vel.y;
            }
            self.collides_with_paddle = true;
        }

        for brick in bricks.iter_mut() {
            if let Some(hit) = brick.on_ball_overlap(&self.rect) {
                self.bounce_off(&brick.rect);
                self.collides_with_paddle = true;
                events.push(BallEvent::BrickHit(hit));
                break;
            }
        }

        events
    }

    /// Resolve every overlapped live paddle against the incoming velocity
    ///
    /// Each contact is classified as if it were the only one, so a ball
    /// landing on the seam between two paddles bounces off both tops instead
    /// of having the second contact see an already reflected velocity. Each
    /// axis flips at most once. The horizontal zone response comes from the
    /// top-struck paddle with the widest overlap (first one on a tie).
    fn paddle_pass(
        &mut self,
        paddles: &mut [Paddle],
        config: &GameConfig,
        events: &mut Vec<BallEvent>,
    ) {
        let incoming = self.vel;
        let mut flip_x = false;
        let mut flip_y = false;
        let mut struck = false;
        let mut steering: Option<(f32, CollisionZone)> = None;

        for paddle in paddles.iter_mut().filter(|p| !p.destroyed) {
            if !self.rect.overlaps(&paddle.rect) {
                continue;
            }
            struck = true;

            let (kind, _) = resolve_collision(&self.rect, incoming, &paddle.rect);
            match kind {
                CollisionKind::Sides => flip_x = true,
                CollisionKind::TopOrBottom => flip_y = true,
                CollisionKind::Corner => {
                    flip_x = true;
                    flip_y = true;
                }
            }

            let zone = (kind == CollisionKind::TopOrBottom).then(|| {
                let zone = paddle.compute_collision_zone(&self.rect);
                let overlap =
                    self.rect.right().min(paddle.rect.right()) - self.rect.x.max(paddle.rect.x);
                let wider = match steering {
                    Some((best, _)) => overlap > best,
                    None => true,
                };
                if wider {
                    steering = Some((overlap, zone));
                }
                zone
            });
            events.push(BallEvent::PaddleStruck {
                paddle_id: paddle.id,
                kind,
                zone,
            });

            if paddle.record_hit(config.paddle_hit_threshold) {
                events.push(BallEvent::PaddleDestroyed {
                    paddle_id: paddle.id,
                });
            }
        }

        if !struck {
            return;
        }
        self.collides_with_paddle = false;
        self.vel = Vec2::new(
            if flip_x { -incoming.x } else { incoming.x },
            if flip_y { -incoming.y } else { incoming.y },
        );
        if let Some((_, zone)) = steering {
            self.apply_zone(zone, config);
        }
    }

    /// Reflect off a target and report which face was struck
    fn bounce_off(&mut self, target: &Rect) -> CollisionKind {
        let (kind, vel) = resolve_collision(&self.rect, self.vel, target);
        self.vel = vel;
        kind
    }

    /// Horizontal response to a paddle zone
    ///
    /// Outer zones set a fixed speed toward their side. The center zone slows
    /// the ball by the reduction factor, unless that would take its horizontal
    /// speed below the floor.
    fn apply_zone(&mut self, zone: CollisionZone, config: &GameConfig) {
        match zone {
            CollisionZone::Left => self.vel.x = -config.collision_zone_vel_x,
            CollisionZone::Right => self.vel.x = config.collision_zone_vel_x,
            CollisionZone::Center => {
                let slowed = self.vel.x * config.vel_x_reduction_factor;
                if slowed.abs() >= config.min_vel_x {
                    self.vel.x = slowed;
                }
            }
        }
    }

    /// Ball has dropped far enough below the floor to be removed
    pub fn out_of_bounds(&self, config: &GameConfig) -> bool {
        self.rect.y < -config.out_of_bounds_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::brick::PickupKind;
    use crate::sim::paddle::PaddleSide;
    use proptest::prelude::*;

    fn ball(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            id: 1,
            rect: Rect::new(x, y, 32.0, 32.0),
            vel: Vec2::new(vx, vy),
            collides_with_paddle: true,
        }
    }

    #[test]
    fn test_spawn_position() {
        let config = GameConfig::default();
        let b = Ball::spawn(1, &config, 3.0);
        assert_eq!(b.rect, Rect::new(384.0, 288.0, 32.0, 32.0));
        assert_eq!(b.vel, Vec2::new(3.0, -5.0));
        assert!(b.collides_with_paddle);
    }

    #[test]
    fn test_free_flight_is_exact() {
        let config = GameConfig::default();
        let mut b = ball(300.0, 200.0, 3.0, -5.0);
        let events = b.advance(&mut [], &mut [], &config);
        assert!(events.is_empty());
        assert_eq!(b.rect.x, 303.0);
        assert_eq!(b.rect.y, 195.0);
        assert_eq!(b.vel, Vec2::new(3.0, -5.0));
    }

    #[test]
    fn test_paddle_left_zone_sends_ball_left() {
        let config = GameConfig::default();
        let mut paddles = [Paddle::primary(1, &config)];
        // Lands on the left part of the paddle top
        let mut b = ball(340.0, 55.0, 2.0, -5.0);
        let events = b.advance(&mut [], &mut paddles, &config);

        assert_eq!(
            events,
            vec![BallEvent::PaddleStruck {
                paddle_id: 1,
                kind: CollisionKind::TopOrBottom,
                zone: Some(CollisionZone::Left),
            }]
        );
        assert_eq!(b.vel, Vec2::new(-5.0, 5.0));
        assert!(!b.collides_with_paddle);
    }

    #[test]
    fn test_paddle_right_zone_sends_ball_right() {
        let config = GameConfig::default();
        let mut paddles = [Paddle::primary(1, &config)];
        let mut b = ball(430.0, 55.0, -2.0, -5.0);
        b.advance(&mut [], &mut paddles, &config);
        assert_eq!(b.vel, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_center_zone_decays_to_floor_and_holds() {
        let config = GameConfig::default();
        let mut paddles = [Paddle::primary(1, &config)];
        let mut expected = 5.0f32;
        let mut speeds = Vec::new();

        for _ in 0..12 {
            // Drop the ball onto the paddle center with the current x speed
            let mut b = ball(384.0 - expected, 55.0, expected, -5.0);
            b.advance(&mut [], &mut paddles, &config);
            let slowed = expected * 0.8;
            if slowed >= 1.0 {
                expected = slowed;
            }
            assert_eq!(b.vel.x, expected);
            speeds.push(b.vel.x);
        }

        // Monotonically non-increasing, never below the floor
        assert!(speeds.windows(2).all(|w| w[1] <= w[0]));
        assert!(speeds.iter().all(|&s| s >= 1.0));
        let last = *speeds.last().unwrap();
        assert!(last * 0.8 < 1.0);
        assert_eq!(speeds[speeds.len() - 1], speeds[speeds.len() - 2]);
    }

    #[test]
    fn test_center_zone_decays_leftward_speed() {
        let config = GameConfig::default();
        let mut paddles = [Paddle::primary(1, &config)];
        let mut b = ball(388.0, 55.0, -4.0, -5.0);
        b.advance(&mut [], &mut paddles, &config);
        assert_eq!(b.vel.x, -4.0 * 0.8);
    }

    #[test]
    fn test_side_hit_on_paddle_skips_zone() {
        let config = GameConfig::default();
        let mut paddles = [Paddle::primary(1, &config)];
        // Clips the paddle's left face 2 units deep, well below its top
        let mut b = ball(300.0, 20.0, 6.0, -1.0);
        let events = b.advance(&mut [], &mut paddles, &config);
        assert_eq!(
            events,
            vec![BallEvent::PaddleStruck {
                paddle_id: 1,
                kind: CollisionKind::Sides,
                zone: None,
            }]
        );
        assert_eq!(b.vel, Vec2::new(-6.0, -1.0));
    }

    #[test]
    fn test_paddle_guard_blocks_second_strike() {
        let config = GameConfig::default();
        let mut paddles = [Paddle::primary(1, &config)];
        let mut b = ball(390.0, 45.0, 1.0, -5.0);
        b.advance(&mut [], &mut paddles, &config);
        assert!(!b.collides_with_paddle);
        let vel_after_first = b.vel;

        // Still embedded next frame: no second bounce
        b.vel = Vec2::new(1.0, -1.0);
        let events = b.advance(&mut [], &mut paddles, &config);
        assert!(events.is_empty());
        assert_eq!(b.vel, Vec2::new(1.0, -1.0));
        assert_ne!(vel_after_first, b.vel);
    }

    #[test]
    fn test_edge_contact_resets_guard() {
        let config = GameConfig::default();
        let mut b = ball(2.0, 200.0, -3.0, 5.0);
        b.collides_with_paddle = false;
        b.advance(&mut [], &mut [], &config);
        assert_eq!(b.vel, Vec2::new(3.0, 5.0));
        assert!(b.collides_with_paddle);
    }

    #[test]
    fn test_ceiling_bounces_floor_does_not() {
        let config = GameConfig::default();
        let mut up = ball(300.0, 446.0, 1.0, 5.0);
        up.advance(&mut [], &mut [], &config);
        assert_eq!(up.vel.y, -5.0);

        let mut down = ball(300.0, 2.0, 1.0, -5.0);
        down.advance(&mut [], &mut [], &config);
        assert_eq!(down.vel.y, -5.0);
        assert_eq!(down.rect.y, -3.0);
    }

    #[test]
    fn test_first_brick_only() {
        let config = GameConfig::default();
        let mut bricks = [
            Brick::new(1, Rect::new(0.0, 300.0, 160.0, 35.0), None),
            Brick::new(2, Rect::new(160.0, 300.0, 160.0, 35.0), Some(PickupKind::MultiBall)),
        ];
        // Straddles both bricks
        let mut b = ball(140.0, 270.0, 1.0, 5.0);
        b.collides_with_paddle = false;
        let events = b.advance(&mut bricks, &mut [], &config);

        assert_eq!(
            events,
            vec![BallEvent::BrickHit(BrickHit {
                brick_id: 1,
                pickup: None
            })]
        );
        assert!(bricks[0].hit);
        assert!(!bricks[1].hit);
        assert_eq!(bricks[1].pickup, Some(PickupKind::MultiBall));
        assert!(b.collides_with_paddle);
        assert_eq!(b.vel.y, -5.0);
    }

    #[test]
    fn test_satellite_destroyed_on_third_strike() {
        let config = GameConfig::default();
        let mut paddles = [Paddle::satellite(4, &config, PaddleSide::Right, 336.0)];

        for strike in 1..=3 {
            let mut b = ball(520.0, 55.0, 1.0, -5.0);
            let events = b.advance(&mut [], &mut paddles, &config);
            let destroyed = events
                .iter()
                .any(|e| matches!(e, BallEvent::PaddleDestroyed { paddle_id: 4 }));
            assert_eq!(destroyed, strike == 3, "strike {strike}");
        }
        assert!(paddles[0].destroyed);

        // A destroyed paddle no longer deflects balls
        let mut b = ball(520.0, 55.0, 1.0, -5.0);
        assert!(b.advance(&mut [], &mut paddles, &config).is_empty());
    }

    #[test]
    fn test_seam_hit_bounces_off_both_paddle_tops() {
        // Close enough that a ball can straddle the primary and a satellite
        let config = GameConfig {
            satellite_offset: 130.0,
            ..Default::default()
        };
        let seam = || {
            [
                Paddle::primary(1, &config),
                Paddle::satellite(2, &config, PaddleSide::Right, 336.0),
            ]
        };

        // Mostly over the primary's right zone (23 units vs 7)
        let mut paddles = seam();
        let mut b = ball(440.0, 54.0, 1.0, -5.0);
        let events = b.advance(&mut [], &mut paddles, &config);
        assert_eq!(
            events,
            vec![
                BallEvent::PaddleStruck {
                    paddle_id: 1,
                    kind: CollisionKind::TopOrBottom,
                    zone: Some(CollisionZone::Right),
                },
                BallEvent::PaddleStruck {
                    paddle_id: 2,
                    kind: CollisionKind::TopOrBottom,
                    zone: Some(CollisionZone::Left),
                },
            ]
        );
        assert_eq!(b.vel, Vec2::new(5.0, 5.0));
        assert_eq!(paddles[0].hit_count, 0);
        assert_eq!(paddles[1].hit_count, 1);
        assert!(!b.collides_with_paddle);

        // Mostly over the satellite's left zone (17 units vs 13)
        let mut paddles = seam();
        let mut b = ball(450.0, 54.0, 1.0, -5.0);
        let events = b.advance(&mut [], &mut paddles, &config);
        assert!(events.iter().all(|e| matches!(
            e,
            BallEvent::PaddleStruck {
                kind: CollisionKind::TopOrBottom,
                ..
            }
        )));
        assert_eq!(events.len(), 2);
        assert_eq!(b.vel, Vec2::new(-5.0, 5.0));
        assert_eq!(paddles[1].hit_count, 1);
    }

    #[test]
    fn test_out_of_bounds() {
        let config = GameConfig::default();
        assert!(!ball(300.0, -32.0, 0.0, -5.0).out_of_bounds(&config));
        assert!(ball(300.0, -32.5, 0.0, -5.0).out_of_bounds(&config));
    }

    proptest! {
        #[test]
        fn prop_open_space_step_is_position_plus_velocity(
            x in 100.0f32..600.0,
            y in 120.0f32..280.0,
            vx in -5.0f32..5.0,
            vy in -5.0f32..5.0,
        ) {
            let config = GameConfig::default();
            let mut b = ball(x, y, vx, vy);
            let events = b.advance(&mut [], &mut [], &config);
            prop_assert!(events.is_empty());
            prop_assert_eq!(b.rect.x, x + vx);
            prop_assert_eq!(b.rect.y, y + vy);
            prop_assert_eq!(b.vel, Vec2::new(vx, vy));
        }
    }
}
