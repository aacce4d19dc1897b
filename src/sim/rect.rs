//! Axis-aligned rectangle geometry shared by every entity
//!
//! Arena coordinates have the y axis pointing up, so `(x, y)` is the
//! bottom-left corner and `top()` is `y + height`.

use serde::{Deserialize, Serialize};

/// An axis-aligned box in arena space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rectangle. Panics on a zero, negative or non-finite size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        assert!(
            width > 0.0 && width.is_finite(),
            "Rect width must be positive and finite, got {width}"
        );
        assert!(
            height > 0.0 && height.is_finite(),
            "Rect height must be positive and finite, got {height}"
        );
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge
    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Strict overlap test; rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x && self.y < other.top() && self.top() > other.y
    }

    /// Move by a displacement
    #[inline]
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}
