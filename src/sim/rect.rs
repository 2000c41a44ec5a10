//! Pixel-space axis-aligned rectangles
//!
//! Bodies keep a real-valued position and derive an integer rect from it.
//! Contact tests rely on exact integer edge coincidence, so every rect in the
//! simulation lives on the pixel grid.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// An integer rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect of the given size centered on the rounded position
    pub fn from_center(center: Vec2, w: i32, h: i32) -> Self {
        let mut rect = Self::new(0, 0, w, h);
        rect.set_center(center.round().as_ivec2());
        rect
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    #[inline]
    pub fn top_left(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn set_center(&mut self, center: IVec2) {
        self.set_center_x(center.x);
        self.set_center_y(center.y);
    }

    pub fn set_center_x(&mut self, cx: i32) {
        self.x = cx - self.w / 2;
    }

    pub fn set_center_y(&mut self, cy: i32) {
        self.y = cy - self.h / 2;
    }

    /// Strict overlap. Shared edges do not count and empty rects never overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Half-open point containment: left/top inclusive, right/bottom exclusive
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x as f32
            && p.x < self.right() as f32
            && p.y >= self.y as f32
            && p.y < self.bottom() as f32
    }

    pub fn translate(&mut self, delta: IVec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    pub fn translated(mut self, delta: IVec2) -> Self {
        self.translate(delta);
        self
    }
}
