//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Delta time supplied by the caller
//! - Stable iteration order (body table order, ordered force ledgers)
//! - No rendering or platform dependencies

pub mod body;
pub mod collider;
pub mod collision;
pub mod contact;
pub mod entity;
pub mod force;
pub mod material;
pub mod rect;
pub mod state;
pub mod tick;
pub mod trace;
pub mod vector;
pub mod zones;

pub use body::{Body, BodyKind, KeyState, PlayerState, ThrustDirection};
pub use collider::WorldCollider;
pub use collision::{Collision, CollisionHandler, pushing};
pub use contact::{Axis, Contact, Neighbor, Side, contacts, touching, touching_sides};
pub use entity::EntityId;
pub use force::{BodyProbe, Force, ForceManager, ForceName, LedgerOutcome};
pub use material::Material;
pub use rect::Rect;
pub use state::World;
pub use tick::{ForceCommand, SimEvent, TickInput, tick};
pub use trace::{LevelBounds, trace};
pub use vector::VecExt;
pub use zones::{AirStream, Objective, Obstacle, Trigger};
