//! Collision detection and response between dynamic bodies
//!
//! Static geometry is handled by each body's swept movement. Here we track
//! pairs of bodies that overlap, exchange momentum once per contact, and
//! synthesize `Push`/`Reaction` forces while one body keeps driving into the
//! other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::contact::touching;
use super::force::ForceName;
use super::tick::SimEvent;
use super::trace::{LevelBounds, trace};
use super::vector::VecExt;

/// A tracked pair of bodies, stored as indices into the body table.
///
/// The pair is unordered: `(a, b)` equals `(b, a)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collision {
    pub object: usize,
    pub collider: usize,
    /// Momentum has been exchanged for this contact
    pub resolved: bool,
}

impl PartialEq for Collision {
    fn eq(&self, other: &Self) -> bool {
        (self.object == other.object && self.collider == other.collider)
            || (self.object == other.collider && self.collider == other.object)
    }
}

impl Collision {
    pub fn new(object: usize, collider: usize) -> Self {
        Self {
            object,
            collider,
            resolved: false,
        }
    }

    /// Elastic exchange of momentum along both axes. Total momentum is kept
    /// and the relative velocity inverts.
    pub fn resolve(&mut self, bodies: &mut [Body]) {
        self.resolved = true;
        let Some((a, b)) = pair_mut(bodies, self.object, self.collider) else {
            return;
        };
        let (m1, m2) = (a.mass(), b.mass());
        let (v1, v2) = (a.velocity(), b.velocity());
        let total = v1 * m1 + v2 * m2;
        let rel = v2 - v1;

        let v2_new = (total - rel * m1).safe_div(m1 + m2);
        let v1_new = rel + v2_new;
        a.set_velocity(v1_new);
        b.set_velocity(v2_new);
    }

    /// The pair still overlaps or shares an edge
    pub fn check_overlap(&self, bodies: &[Body]) -> bool {
        match (bodies.get(self.object), bodies.get(self.collider)) {
            (Some(a), Some(b)) => {
                let (ra, rb) = (a.rect(), b.rect());
                ra.overlaps(&rb) || touching(&ra, &rb).is_some()
            }
            _ => false,
        }
    }

    /// Sustained contact: each body that drives into the other pushes it
    pub fn resolve_overlap(&self, bodies: &mut [Body], level: LevelBounds) {
        let Some((a, b)) = pair_mut(bodies, self.object, self.collider) else {
            return;
        };
        apply_push(a, b, level);
        apply_push(b, a, level);
    }

    /// Clear every push and reaction the pair exchanged
    pub fn pre_removal(&self, bodies: &mut [Body]) {
        let Some((a, b)) = pair_mut(bodies, self.object, self.collider) else {
            return;
        };
        let (ida, idb) = (a.entity_id(), b.entity_id());
        a.remove_force(idb, ForceName::Push);
        a.remove_force(idb, ForceName::Reaction);
        b.remove_force(ida, ForceName::Push);
        b.remove_force(ida, ForceName::Reaction);
    }
}

/// Is `a` pushing `b`? Both its effort and its velocity must point at `b`.
pub fn pushing(a: &Body, b: &Body, level: LevelBounds) -> bool {
    let effort = a.effort_against(b.entity_id());
    let velocity = a.velocity();
    if effort == Vec2::ZERO || velocity == Vec2::ZERO {
        return false;
    }
    let target = b.rect();
    let origin = a.center();
    trace(origin, effort.normalize_or_zero(), &target, level)
        && trace(origin, velocity.normalize_or_zero(), &target, level)
}

fn apply_push(pusher: &mut Body, pushed: &mut Body, level: LevelBounds) {
    let (from, to) = (pusher.entity_id(), pushed.entity_id());
    if pushing(pusher, pushed, level) {
        let effort = pusher.effort_against(to);
        pushed.add_force(from, ForceName::Push, effort);
        pusher.add_force(to, ForceName::Reaction, -effort);
    } else {
        pushed.remove_force(from, ForceName::Push);
        pusher.remove_force(to, ForceName::Reaction);
    }
}

/// Borrow two distinct bodies mutably
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> Option<(&mut Body, &mut Body)> {
    if i == j || i.max(j) >= bodies.len() {
        return None;
    }
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}

/// Tracks every body pair in contact across frames
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionHandler {
    pub collisions: Vec<Collision>,
    pub level: LevelBounds,
}

impl CollisionHandler {
    pub fn new(level: LevelBounds) -> Self {
        Self {
            collisions: Vec::new(),
            level,
        }
    }

    /// Broad phase: start tracking every newly overlapping pair
    pub fn scan(&mut self, bodies: &[Body]) {
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                if !bodies[i].rect().overlaps(&bodies[j].rect()) {
                    continue;
                }
                let candidate = Collision::new(i, j);
                if !self.collisions.contains(&candidate) {
                    log::debug!("collision started: body#{i} <-> body#{j}");
                    self.collisions.push(candidate);
                }
            }
        }
    }

    /// Run one frame of body-body collision handling
    pub fn update(&mut self, bodies: &mut [Body]) -> Vec<SimEvent> {
        self.scan(bodies);

        let level = self.level;
        let mut events = Vec::new();
        self.collisions.retain_mut(|collision| {
            if !collision.resolved {
                collision.resolve(bodies);
                events.push(SimEvent::BodiesCollided {
                    a: collision.object as u32,
                    b: collision.collider as u32,
                });
                true
            } else if collision.check_overlap(bodies) {
                collision.resolve_overlap(bodies, level);
                true
            } else {
                collision.pre_removal(bodies);
                log::debug!(
                    "collision ended: body#{} <-> body#{}",
                    collision.object,
                    collision.collider
                );
                false
            }
        });
        events
    }

    pub fn is_tracking(&self, a: usize, b: usize) -> bool {
        self.collisions.contains(&Collision::new(a, b))
    }
}
