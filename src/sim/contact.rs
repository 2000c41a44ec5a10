//! Edge-exact contact detection
//!
//! Two rects "touch" when an edge of one lies exactly on the opposite edge of
//! the other and their spans overlap on the perpendicular axis. The span test
//! is strict: rects meeting only at a corner do not touch, so a body sliding
//! across the seam between two floor tiles never feels the next tile's side.
//! Overlap alone is not contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::material::Material;
use super::rect::Rect;

/// The side of a body another entity touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Top,
    Right,
    Bottom,
}

/// Simulation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Side {
    /// Unit direction pointing out of the body through this side
    pub fn direction(self) -> Vec2 {
        match self {
            Side::Left => Vec2::new(-1.0, 0.0),
            Side::Top => Vec2::new(0.0, -1.0),
            Side::Right => Vec2::new(1.0, 0.0),
            Side::Bottom => Vec2::new(0.0, 1.0),
        }
    }

    /// Axis of the contact normal
    pub fn normal_axis(self) -> Axis {
        match self {
            Side::Left | Side::Right => Axis::X,
            Side::Top | Side::Bottom => Axis::Y,
        }
    }
}

impl Axis {
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Vector with `value` on this axis and zero on the other
    #[inline]
    pub fn vec(self, value: f32) -> Vec2 {
        match self {
            Axis::X => Vec2::new(value, 0.0),
            Axis::Y => Vec2::new(0.0, value),
        }
    }
}

/// Something a body can touch. Static colliders carry a material; bodies
/// don't.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: EntityId,
    pub rect: Rect,
    pub material: Option<Material>,
}

/// One touching neighbor and the side of the body it touches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub id: EntityId,
    pub side: Side,
    pub material: Option<Material>,
}

/// All sides of `a` touched by `b`, in left, top, right, bottom order
pub fn touching_sides(a: &Rect, b: &Rect) -> Vec<Side> {
    let span_y = b.top() < a.bottom() && b.bottom() > a.top();
    let span_x = b.left() < a.right() && b.right() > a.left();

    let mut sides = Vec::new();
    if a.left() == b.right() && span_y {
        sides.push(Side::Left);
    }
    if a.top() == b.bottom() && span_x {
        sides.push(Side::Top);
    }
    if a.right() == b.left() && span_y {
        sides.push(Side::Right);
    }
    if a.bottom() == b.top() && span_x {
        sides.push(Side::Bottom);
    }
    sides
}

/// The first side of `a` touched by `b`, if any
pub fn touching(a: &Rect, b: &Rect) -> Option<Side> {
    touching_sides(a, b).into_iter().next()
}

/// Contact set of a rect against its neighbors
pub fn contacts(rect: &Rect, neighbors: &[Neighbor]) -> Vec<Contact> {
    neighbors
        .iter()
        .flat_map(|n| {
            touching_sides(rect, &n.rect).into_iter().map(|side| Contact {
                id: n.id,
                side,
                material: n.material,
            })
        })
        .collect()
}
