//! World state
//!
//! Owns every body, collider and zone of one level. Bodies live in a table
//! and are referred to by index everywhere else (force sources, collision
//! pairs), so nothing holds a reference across frames.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collider::WorldCollider;
use super::collision::CollisionHandler;
use super::contact::{Neighbor, Side};
use super::rect::Rect;
use super::zones::{AirStream, Objective, Obstacle, Trigger};
use crate::SimError;
use crate::settings::SimConfig;

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub config: SimConfig,
    /// Dynamic bodies; a body's id is its index
    pub bodies: Vec<Body>,
    /// Static geometry; a collider's id is its index
    pub colliders: Vec<WorldCollider>,
    pub streams: Vec<AirStream>,
    pub objectives: Vec<Objective>,
    pub obstacles: Vec<Obstacle>,
    pub collisions: CollisionHandler,
    /// Index of the player body, if any
    pub player: Option<usize>,
    /// Simulated seconds
    pub time: f32,
    /// Simulation tick counter
    pub frame: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl World {
    pub fn new(config: SimConfig) -> Self {
        let collisions = CollisionHandler::new(config.level);
        Self {
            config,
            bodies: Vec::new(),
            colliders: Vec::new(),
            streams: Vec::new(),
            objectives: Vec::new(),
            obstacles: Vec::new(),
            collisions,
            player: None,
            time: 0.0,
            frame: 0,
        }
    }

    /// Add a body to the table and return its id
    pub fn add_body(&mut self, mut body: Body) -> u32 {
        let id = self.bodies.len() as u32;
        body.id = id;
        self.bodies.push(body);
        id
    }

    /// Add the player body. A world has at most one; a second call replaces
    /// which body is controlled.
    pub fn add_player(&mut self, body: Body) -> u32 {
        if !body.is_player() {
            log::warn!("controlled body is not a player; thrust will be ignored");
        }
        let id = self.add_body(body);
        self.player = Some(id as usize);
        id
    }

    pub fn add_collider(&mut self, rect: Rect, material: &str) -> Result<u32, SimError> {
        let id = self.colliders.len() as u32;
        self.colliders.push(WorldCollider::new(id, rect, material)?);
        Ok(id)
    }

    /// Mount an air stream on one face of an existing collider
    pub fn add_stream(
        &mut self,
        anchor: u32,
        direction: Side,
        length: i32,
        force: Vec2,
    ) -> Result<u32, SimError> {
        let anchor_rect = self
            .colliders
            .get(anchor as usize)
            .map(|c| c.rect)
            .ok_or(SimError::UnknownCollider(anchor))?;
        let id = self.streams.len() as u32;
        self.streams
            .push(AirStream::new(id, anchor, &anchor_rect, direction, length, force));
        Ok(id)
    }

    pub fn add_objective(&mut self, rect: Rect, accepts: Trigger) -> u32 {
        let id = self.objectives.len() as u32;
        self.objectives.push(Objective::new(id, rect, accepts));
        id
    }

    pub fn add_obstacle(&mut self, rect: Rect) -> u32 {
        let id = self.obstacles.len() as u32;
        self.obstacles.push(Obstacle::new(id, rect));
        id
    }

    pub fn body(&self, id: u32) -> Result<&Body, SimError> {
        self.bodies.get(id as usize).ok_or(SimError::UnknownBody(id))
    }

    pub fn body_mut(&mut self, id: u32) -> Result<&mut Body, SimError> {
        self.bodies
            .get_mut(id as usize)
            .ok_or(SimError::UnknownBody(id))
    }

    pub fn player(&self) -> Option<&Body> {
        self.player.and_then(|i| self.bodies.get(i))
    }

    /// Static colliders as contact neighbors
    pub fn collider_neighbors(&self) -> Vec<Neighbor> {
        self.colliders.iter().map(WorldCollider::as_neighbor).collect()
    }

    /// Every body except `index` as a contact neighbor
    pub fn body_neighbors(&self, index: usize) -> Vec<Neighbor> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, b)| Neighbor {
                id: b.entity_id(),
                rect: b.rect(),
                material: None,
            })
            .collect()
    }

    /// Translate the whole level by a pixel delta. Air streams re-anchor on
    /// their next update.
    pub fn shift(&mut self, delta: IVec2) {
        let offset = delta.as_vec2();
        for body in &mut self.bodies {
            body.set_pos(body.pos() + offset);
        }
        for collider in &mut self.colliders {
            collider.shift(delta);
        }
        for objective in &mut self.objectives {
            objective.shift(delta);
        }
        for obstacle in &mut self.obstacles {
            obstacle.shift(delta);
        }
    }

    /// Every objective has been completed
    pub fn level_complete(&self) -> bool {
        !self.objectives.is_empty() && self.objectives.iter().all(|o| o.completed)
    }
}
