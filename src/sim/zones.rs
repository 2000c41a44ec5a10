//! Static zones layered on the collision primitives
//!
//! - `AirStream`: blows a `Wind` force on every body inside its stream
//! - `Objective`: goal zone, completes when an accepted body reaches it
//! - `Obstacle`: failure zone, reports when the player hits it

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::contact::{Side, touching};
use super::entity::EntityId;
use super::force::ForceName;
use super::rect::Rect;
use crate::consts::{GREEN, GREY};

/// Overlap or shared edge
fn reaches(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b) || touching(a, b).is_some()
}

/// A directional wind zone blowing off one face of a collider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirStream {
    pub id: u32,
    /// Collider the stream is mounted on
    pub anchor: u32,
    pub direction: Side,
    /// Reach in pixels from the anchor face
    pub length: i32,
    pub force: Vec2,
    rect: Rect,
    /// Anchor top-left at the last update
    anchor_origin: IVec2,
}

impl AirStream {
    pub fn new(id: u32, anchor: u32, anchor_rect: &Rect, direction: Side, length: i32, force: Vec2) -> Self {
        let a = anchor_rect;
        let rect = match direction {
            Side::Top => Rect::new(a.left(), a.top() - length, a.w, length),
            Side::Bottom => Rect::new(a.left(), a.bottom(), a.w, length),
            Side::Left => Rect::new(a.left() - length, a.top(), length, a.h),
            Side::Right => Rect::new(a.right(), a.top(), length, a.h),
        };
        Self {
            id,
            anchor,
            direction,
            length,
            force,
            rect,
            anchor_origin: a.top_left(),
        }
    }

    #[inline]
    pub fn entity_id(&self) -> EntityId {
        EntityId::Stream(self.id)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Follow the anchor, then set or clear `Wind` on every body
    pub fn update(&mut self, anchor_rect: &Rect, bodies: &mut [Body]) {
        let delta = anchor_rect.top_left() - self.anchor_origin;
        if delta != IVec2::ZERO {
            self.rect.translate(delta);
            self.anchor_origin = anchor_rect.top_left();
        }

        let source = self.entity_id();
        for body in bodies.iter_mut() {
            if body.rect().overlaps(&self.rect) {
                body.add_force(source, ForceName::Wind, self.force);
            } else {
                body.remove_force(source, ForceName::Wind);
            }
        }
    }
}

/// Which bodies can complete an objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Trigger {
    #[default]
    Player,
    Key,
    Any,
}

impl Trigger {
    pub fn accepts(self, body: &Body) -> bool {
        match self {
            Trigger::Player => body.is_player(),
            Trigger::Key => body.is_key(),
            Trigger::Any => true,
        }
    }
}

/// Goal zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    pub id: u32,
    pub rect: Rect,
    pub accepts: Trigger,
    pub completed: bool,
    pub colour: [u8; 3],
}

impl Objective {
    pub fn new(id: u32, rect: Rect, accepts: Trigger) -> Self {
        Self {
            id,
            rect,
            accepts,
            completed: false,
            colour: GREY,
        }
    }

    /// True while an accepted body reaches the zone. Completion latches.
    pub fn update(&mut self, bodies: &[Body]) -> bool {
        let reached = bodies
            .iter()
            .any(|b| self.accepts.accepts(b) && reaches(&b.rect(), &self.rect));
        if reached && !self.completed {
            self.completed = true;
            self.colour = GREEN;
        }
        reached
    }

    pub fn shift(&mut self, delta: IVec2) {
        self.rect.translate(delta);
    }
}

/// Failure zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
}

impl Obstacle {
    pub fn new(id: u32, rect: Rect) -> Self {
        Self { id, rect }
    }

    pub fn update(&self, player: &Body) -> bool {
        reaches(&player.rect(), &self.rect)
    }

    pub fn shift(&mut self, delta: IVec2) {
        self.rect.translate(delta);
    }
}
