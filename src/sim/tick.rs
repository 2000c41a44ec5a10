//! Fixed timestep simulation tick
//!
//! Advances the world one frame in a fixed order: input, air streams, bodies
//! in table order, body-body collisions, then zones. Everything a collaborator
//! reacts to (particles, damage, level flow) comes back as `SimEvent`s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyKind, ThrustDirection};
use super::entity::EntityId;
use super::force::ForceName;
use super::state::World;
use crate::SimError;

/// A discrete force edit, usually triggered by an input edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForceCommand {
    Add {
        body: u32,
        source: EntityId,
        name: ForceName,
        vector: Vec2,
    },
    Remove {
        body: u32,
        source: EntityId,
        name: ForceName,
    },
}

impl ForceCommand {
    pub fn body(&self) -> u32 {
        match self {
            ForceCommand::Add { body, .. } | ForceCommand::Remove { body, .. } => *body,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    pub forces: Vec<ForceCommand>,
    /// Player rotation steps, positive is clockwise
    pub rotate: f32,
    /// Fire the player's engine this frame
    pub thrust: Option<ThrustDirection>,
    /// Thrust key released
    pub release_thrust: bool,
    pub toggle_gravity: bool,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A body was stopped by static geometry at damaging speed
    Impact { body: u32, with: EntityId, speed: f32 },
    /// Two bodies exchanged momentum
    BodiesCollided { a: u32, b: u32 },
    /// Engine exhaust for the particle system
    EmitParticles {
        body: u32,
        at: Vec2,
        direction: Vec2,
        count: u32,
    },
    FuelExhausted { body: u32 },
    /// A key object's periodic glow
    KeyPulse { body: u32, colour: [u8; 3] },
    /// An objective was completed for the first time
    ObjectiveReached { objective: u32 },
    /// The player is touching an obstacle
    ObstacleHit { obstacle: u32 },
}

/// Advance the world by one timestep.
///
/// Force commands are validated before any is applied, so an unknown body
/// leaves the world untouched.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> Result<Vec<SimEvent>, SimError> {
    for command in &input.forces {
        world.body(command.body())?;
    }

    let mut events = Vec::new();

    if input.toggle_gravity {
        world.config.gravity_on = !world.config.gravity_on;
        log::info!("gravity {}", if world.config.gravity_on { "on" } else { "off" });
    }

    for command in &input.forces {
        match command {
            ForceCommand::Add {
                body,
                source,
                name,
                vector,
            } => world.body_mut(*body)?.add_force(*source, name.clone(), *vector),
            ForceCommand::Remove { body, source, name } => {
                world.body_mut(*body)?.remove_force(*source, name.clone())
            }
        }
    }

    // Player controls
    if let Some(index) = world.player {
        let mut neighbors = world.collider_neighbors();
        neighbors.extend(world.body_neighbors(index));
        if let Some(player) = world.bodies.get_mut(index) {
            if input.rotate != 0.0 {
                player.rotate(input.rotate, &neighbors, &world.config);
            }
            if input.release_thrust {
                player.cut_thrust();
            }
            if let Some(direction) = input.thrust {
                events.extend(player.thrust(direction));
            }
        }
    }

    // Air streams
    for stream in &mut world.streams {
        match world.colliders.get(stream.anchor as usize) {
            Some(anchor) => stream.update(&anchor.rect, &mut world.bodies),
            None => log::warn!("stream {} lost its anchor {}", stream.id, stream.anchor),
        }
    }

    // Bodies, in table order
    let colliders = world.collider_neighbors();
    for i in 0..world.bodies.len() {
        let others = world.body_neighbors(i);
        events.extend(world.bodies[i].update(&colliders, &others, &world.config, dt));
    }

    // Body-body contact
    events.extend(world.collisions.update(&mut world.bodies));

    let now = world.time + dt;
    for body in &mut world.bodies {
        if let BodyKind::Key(key) = &mut body.kind {
            if key.pulse_due(now) {
                events.push(SimEvent::KeyPulse {
                    body: body.id,
                    colour: key.colour,
                });
            }
        }
    }

    // Zones
    for objective in &mut world.objectives {
        let was_completed = objective.completed;
        if objective.update(&world.bodies) && !was_completed {
            log::info!("objective {} reached", objective.id);
            events.push(SimEvent::ObjectiveReached {
                objective: objective.id,
            });
        }
    }
    if let Some(player) = world.player.and_then(|i| world.bodies.get(i)) {
        for obstacle in &world.obstacles {
            if obstacle.update(player) {
                log::info!("obstacle {} hit", obstacle.id);
                events.push(SimEvent::ObstacleHit {
                    obstacle: obstacle.id,
                });
            }
        }
    }

    world.time = now;
    world.frame += 1;
    Ok(events)
}
