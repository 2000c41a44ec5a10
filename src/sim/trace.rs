//! Discrete ray tracing against rectangles
//!
//! Walks a line one pixel at a time along its major axis until it enters the
//! target or leaves the level. Used to decide whether a body's effort is aimed
//! at another body.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{LEVEL_HEIGHT, LEVEL_WIDTH};
use crate::sign;

/// Extent of the level. Camera-relative coordinates range over
/// `[-width, width]` x `[-height, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBounds {
    pub width: i32,
    pub height: i32,
}

impl LevelBounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Default for LevelBounds {
    fn default() -> Self {
        Self::new(LEVEL_WIDTH, LEVEL_HEIGHT)
    }
}

/// Pixel coordinates from `start` toward `±limit`, exclusive of the limit
fn march(start: f32, step: i32, limit: i32) -> Box<dyn Iterator<Item = i32>> {
    let start = start as i32;
    if step > 0 {
        Box::new(start..limit)
    } else {
        Box::new((-limit + 1..=start).rev())
    }
}

/// Does a ray from `source` along normalized `dir` hit `target` before
/// leaving the level?
pub fn trace(source: Vec2, dir: Vec2, target: &Rect, bounds: LevelBounds) -> bool {
    if dir == Vec2::ZERO {
        return false;
    }

    if dir.x.abs() >= dir.y.abs() {
        let gradient = dir.y / dir.x;
        for x in march(source.x, sign(dir.x) as i32, bounds.width) {
            let y = source.y + (x as f32 - source.x) * gradient;
            if y.abs() > bounds.height as f32 {
                return false;
            }
            if target.contains_point(Vec2::new(x as f32, y)) {
                return true;
            }
        }
    } else {
        let gradient = dir.x / dir.y;
        for y in march(source.y, sign(dir.y) as i32, bounds.height) {
            let x = source.x + (y as f32 - source.y) * gradient;
            if x.abs() > bounds.width as f32 {
                return false;
            }
            if target.contains_point(Vec2::new(x, y as f32)) {
                return true;
            }
        }
    }
    false
}
