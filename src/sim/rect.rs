//! Axis-aligned boxes for entity placement and hit testing
//!
//! Everything in the field is a box: the player pair, obstacles, sign
//! callouts. Hit testing happens on boxes shrunk by a per-side inset, which
//! makes collisions more forgiving than the rendered art suggests.

use serde::{Deserialize, Serialize};

/// An axis-aligned box. `x`/`y` is the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Shrink by a uniform per-side inset. An inset larger than the half-size
    /// collapses the box to zero extent at its center rather than inverting it.
    pub fn shrink(&self, inset: f32) -> Rect {
        let w = (self.w - 2.0 * inset).max(0.0);
        let h = (self.h - 2.0 * inset).max(0.0);
        Rect {
            x: self.x + (self.w - w) / 2.0,
            y: self.y + (self.h - h) / 2.0,
            w,
            h,
        }
    }

    /// Strict-inequality overlap: two boxes overlap iff each box's start is
    /// strictly less than the other's end on both axes. Edge-touching boxes do
    /// not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
