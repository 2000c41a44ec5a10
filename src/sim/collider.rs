//! Static world geometry

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::contact::Neighbor;
use super::entity::EntityId;
use super::material::Material;
use super::rect::Rect;
use crate::SimError;

/// An immovable rectangle with a friction material.
///
/// Colliders can be translated (camera-relative levels) but are never
/// simulated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldCollider {
    pub id: u32,
    pub rect: Rect,
    pub material: Material,
}

impl WorldCollider {
    /// Create a collider with a registered material
    pub fn new(id: u32, rect: Rect, material: &str) -> Result<Self, SimError> {
        Ok(Self {
            id,
            rect,
            material: Material::lookup(material)?,
        })
    }

    #[inline]
    pub fn entity_id(&self) -> EntityId {
        EntityId::Collider(self.id)
    }

    /// Translate by a pixel delta
    pub fn shift(&mut self, delta: IVec2) {
        self.rect.translate(delta);
    }

    pub fn as_neighbor(&self) -> Neighbor {
        Neighbor {
            id: self.entity_id(),
            rect: self.rect,
            material: Some(self.material),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_material_fails_construction() {
        assert!(WorldCollider::new(0, Rect::new(0, 0, 10, 10), "Cheese").is_err());
    }

    #[test]
    fn test_shift_moves_rect() {
        let mut c = WorldCollider::new(3, Rect::new(0, 474, 1279, 246), "Asphalt").unwrap();
        c.shift(IVec2::new(-5, 2));
        assert_eq!(c.rect.top_left(), IVec2::new(-5, 476));
        let n = c.as_neighbor();
        assert_eq!(n.id, EntityId::Collider(3));
        assert!(n.material.is_some());
    }
}
