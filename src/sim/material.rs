//! Friction materials for static geometry

use serde::{Deserialize, Serialize};

use crate::SimError;

/// Friction coefficients of a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Coefficient resisting the start of sliding (μs)
    pub static_friction: f32,
    /// Coefficient resisting sustained sliding (μk)
    pub kinetic_friction: f32,
}

/// Fixed material registry
const MATERIALS: &[(&str, Material)] = &[
    ("Asphalt", Material::new(0.9, 0.65)),
    ("Ice", Material::new(0.1, 0.03)),
    ("Rubber", Material::new(1.0, 0.8)),
    ("Steel", Material::new(0.74, 0.57)),
];

impl Material {
    pub const fn new(static_friction: f32, kinetic_friction: f32) -> Self {
        Self {
            static_friction,
            kinetic_friction,
        }
    }

    /// Look up a registered material by name
    pub fn lookup(name: &str) -> Result<Self, SimError> {
        MATERIALS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, m)| *m)
            .ok_or_else(|| SimError::UnknownMaterial {
                name: name.to_string(),
                known: Self::names().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        MATERIALS.iter().map(|(n, _)| *n)
    }

    /// Force needed to start a body sliding under normal force `normal`
    #[inline]
    pub fn static_threshold(&self, normal: f32) -> f32 {
        self.static_friction * normal
    }
}

impl Default for Material {
    fn default() -> Self {
        MATERIALS[0].1
    }
}
