//! Non-owning entity identities
//!
//! A force entry records where it came from without holding the entity. Bodies
//! are owned by the world's body table; colliders and streams by their lists.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityId {
    /// Index into the world body table
    Body(u32),
    /// Static world geometry
    Collider(u32),
    /// Air stream zone
    Stream(u32),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Body(id) => write!(f, "body#{id}"),
            EntityId::Collider(id) => write!(f, "collider#{id}"),
            EntityId::Stream(id) => write!(f, "stream#{id}"),
        }
    }
}
