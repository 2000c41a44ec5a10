//! Per-body force ledger
//!
//! Every body owns one `ForceManager`. Forces are keyed by `(source, name)`:
//! adding a force under an existing key replaces it, and a force that rounds
//! to zero removes the key instead of being stored. Contact forces (reaction,
//! friction) and drag are recomputed every frame by [`ForceManager::update`].

use std::collections::BTreeMap;
use std::fmt;

use glam::{BVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::contact::{Axis, Contact};
use super::entity::EntityId;
use super::material::Material;
use super::rect::Rect;
use super::vector::VecExt;
use crate::settings::SimConfig;
use crate::{SimError, sign};

/// Force category tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "String")]
pub enum ForceName {
    Weight,
    ReactionX,
    ReactionY,
    FrictionX,
    FrictionY,
    AirResistance,
    /// Self-applied propulsion (player thrust, scripted pushes)
    Drive,
    /// Sustained shove from a body in contact
    Push,
    /// Counter-force on the pushing body
    Reaction,
    Wind,
    Custom(String),
}

impl ForceName {
    pub fn as_str(&self) -> &str {
        match self {
            ForceName::Weight => "Weight",
            ForceName::ReactionX => "ReactionX",
            ForceName::ReactionY => "ReactionY",
            ForceName::FrictionX => "FrictionX",
            ForceName::FrictionY => "FrictionY",
            ForceName::AirResistance => "Air Resistance",
            ForceName::Drive => "Drive",
            ForceName::Push => "Push",
            ForceName::Reaction => "Reaction",
            ForceName::Wind => "Wind",
            ForceName::Custom(name) => name,
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Weight" => ForceName::Weight,
            "ReactionX" => ForceName::ReactionX,
            "ReactionY" => ForceName::ReactionY,
            "FrictionX" => ForceName::FrictionX,
            "FrictionY" => ForceName::FrictionY,
            "Air Resistance" => ForceName::AirResistance,
            "Drive" => ForceName::Drive,
            "Push" => ForceName::Push,
            "Reaction" => ForceName::Reaction,
            "Wind" => ForceName::Wind,
            other => ForceName::Custom(other.to_string()),
        }
    }

    pub fn is_friction(&self) -> bool {
        matches!(self, ForceName::FrictionX | ForceName::FrictionY)
    }

    pub fn is_drag(&self) -> bool {
        *self == ForceName::AirResistance
    }

    pub fn is_surface_reaction(&self) -> bool {
        matches!(self, ForceName::ReactionX | ForceName::ReactionY)
    }

    /// Forces removed by their own zone or collision pair rather than by
    /// loss of contact
    pub fn is_externally_managed(&self) -> bool {
        matches!(self, ForceName::Wind | ForceName::Push | ForceName::Reaction)
    }

    fn friction_on(axis: Axis) -> Self {
        match axis {
            Axis::X => ForceName::FrictionX,
            Axis::Y => ForceName::FrictionY,
        }
    }

    fn reaction_on(axis: Axis) -> Self {
        match axis {
            Axis::X => ForceName::ReactionX,
            Axis::Y => ForceName::ReactionY,
        }
    }
}

impl From<&str> for ForceName {
    fn from(tag: &str) -> Self {
        ForceName::from_tag(tag)
    }
}

impl From<String> for ForceName {
    fn from(tag: String) -> Self {
        ForceName::from_tag(&tag)
    }
}

impl From<ForceName> for String {
    fn from(name: ForceName) -> Self {
        name.as_str().to_string()
    }
}

/// Dynamic tags (scripted input, JSON commands) must be strings
impl TryFrom<&serde_json::Value> for ForceName {
    type Error = SimError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::String(tag) => Ok(ForceName::from_tag(tag)),
            other => Err(SimError::ForceNameType {
                found: other.to_string(),
            }),
        }
    }
}

impl TryFrom<serde_json::Value> for ForceName {
    type Error = SimError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        ForceName::try_from(&value)
    }
}

impl fmt::Display for ForceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sourced, named force vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Force {
    pub source: EntityId,
    pub name: ForceName,
    pub vector: Vec2,
}

/// Snapshot of the owning body handed to the ledger each frame
#[derive(Debug, Clone, Copy)]
pub struct BodyProbe {
    pub id: EntityId,
    pub mass: f32,
    pub velocity: Vec2,
    pub rect: Rect,
    pub drag_coefficient: f32,
    pub weightless: bool,
}

/// What the ledger publishes back to the body for integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerOutcome {
    pub resultant: Vec2,
    pub acceleration: Vec2,
    /// Axes where friction would have reversed the motion
    pub braked: BVec2,
}

type ForceKey = (EntityId, ForceName);

/// Ordered map of forces acting on one body
#[derive(Debug, Clone, Default)]
pub struct ForceManager {
    forces: BTreeMap<ForceKey, Vec2>,
    resultant: Vec2,
}

impl ForceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a force. A vector that rounds to zero removes the key.
    pub fn add(&mut self, source: EntityId, name: ForceName, vector: Vec2) {
        if vector.is_negligible() {
            self.forces.remove(&(source, name));
        } else {
            self.forces.insert((source, name), vector);
        }
    }

    pub fn remove(&mut self, source: EntityId, name: &ForceName) -> Option<Vec2> {
        self.forces.remove(&(source, name.clone()))
    }

    pub fn get(&self, source: EntityId, name: &ForceName) -> Option<Vec2> {
        self.forces.get(&(source, name.clone())).copied()
    }

    /// Sum of every entry with this name, whatever its source
    pub fn sum_named(&self, name: &ForceName) -> Option<Vec2> {
        let mut matched = self
            .forces
            .iter()
            .filter(|((_, n), _)| n == name)
            .map(|(_, v)| *v)
            .peekable();
        matched.peek()?;
        Some(matched.sum())
    }

    fn remove_named(&mut self, name: &ForceName) {
        self.forces.retain(|(_, n), _| n != name);
    }

    pub fn contains(&self, source: EntityId, name: &ForceName) -> bool {
        self.get(source, name).is_some()
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &ForceName, Vec2)> {
        self.forces.iter().map(|((s, n), v)| (*s, n, *v))
    }

    /// Resultant computed by the last `update`
    pub fn resultant(&self) -> Vec2 {
        self.resultant
    }

    /// Sum of all forces except friction and drag
    pub fn resultant_nof(&self) -> Vec2 {
        self.forces
            .iter()
            .filter(|((_, n), _)| !n.is_friction() && !n.is_drag())
            .map(|(_, v)| *v)
            .sum()
    }

    /// Non-friction resultant ignoring the contact forces `partner` applies.
    /// This is the effort a body directs at `partner`.
    pub fn effort_against(&self, partner: EntityId) -> Vec2 {
        self.forces
            .iter()
            .filter(|((s, n), _)| {
                !n.is_friction()
                    && !n.is_drag()
                    && !(*s == partner && matches!(n, ForceName::Push | ForceName::Reaction))
            })
            .map(|(_, v)| *v)
            .sum()
    }

    /// Recompute contact forces and the resultant for one frame
    pub fn update(
        &mut self,
        body: &BodyProbe,
        contacts: &[Contact],
        config: &SimConfig,
        dt: f32,
    ) -> LedgerOutcome {
        let v = body.velocity;
        let driving = self.resultant_nof();

        // Prune: mark every stale entry first, then compact
        let stale: Vec<ForceKey> = self
            .forces
            .keys()
            .filter(|(source, name)| {
                let in_contact = *source == body.id || contacts.iter().any(|c| c.id == *source);
                (!in_contact && !name.is_externally_managed())
                    || name.is_surface_reaction()
                    || (*name == ForceName::FrictionX && v.x == 0.0 && driving.x == 0.0)
                    || (*name == ForceName::FrictionY && v.y == 0.0 && driving.y == 0.0)
            })
            .cloned()
            .collect();
        for key in stale {
            self.forces.remove(&key);
        }

        // Weight
        if !body.weightless {
            // Zero effective gravity removes the entry
            self.add(
                body.id,
                ForceName::Weight,
                Vec2::new(0.0, body.mass * config.effective_gravity()),
            );
        } else {
            self.remove(body.id, &ForceName::Weight);
        }

        // Normal forces from static geometry the body presses into
        let mut push = self.resultant_nof();
        for contact in contacts.iter().filter(|c| c.material.is_some()) {
            let axis = contact.side.normal_axis();
            let into = axis.of(push);
            if sign(into) == axis.of(contact.side.direction()) {
                let reaction = axis.vec(-into);
                self.add(contact.id, ForceName::reaction_on(axis), reaction);
                push += reaction;
            }
        }

        // Quadratic drag
        if v.length_squared() > 0.0 {
            let extent = if v.x.abs() > v.y.abs() {
                body.rect.h
            } else {
                body.rect.w
            };
            let area = extent as f32 / config.metre;
            let magnitude =
                v.length_squared() * 0.5 * config.air_density * body.drag_coefficient * area;
            self.add(
                body.id,
                ForceName::AirResistance,
                -v.normalize_or_zero() * magnitude,
            );
        } else {
            self.remove(body.id, &ForceName::AirResistance);
        }

        // Friction along each surface the body is pressed against
        for contact in contacts {
            let Some(material) = contact.material else {
                continue;
            };
            let normal_axis = contact.side.normal_axis();
            let slide_axis = normal_axis.other();
            let friction_name = ForceName::friction_on(slide_axis);
            let Some(reaction) = self.get(contact.id, &ForceName::reaction_on(normal_axis)) else {
                self.remove(contact.id, &friction_name);
                continue;
            };
            let normal = normal_axis.of(reaction).abs();
            if let Some(f) = friction(slide_axis.of(v), slide_axis.of(push), normal, material) {
                self.add(contact.id, friction_name, slide_axis.vec(f));
            }
        }

        // Sum, then stop friction from reversing the motion
        let mut resultant: Vec2 = self.forces.values().copied().sum();
        let provisional = v + resultant.safe_div(body.mass) * dt;
        let mut braked = BVec2::FALSE;
        for axis in [Axis::X, Axis::Y] {
            let name = ForceName::friction_on(axis);
            let Some(friction) = self.sum_named(&name) else {
                continue;
            };
            let next = axis.of(provisional);
            if next != 0.0 && sign(next) == sign(axis.of(friction)) {
                self.remove_named(&name);
                resultant -= friction;
                match axis {
                    Axis::X => braked.x = true,
                    Axis::Y => braked.y = true,
                }
            }
        }

        self.resultant = resultant;
        LedgerOutcome {
            resultant,
            acceleration: resultant.safe_div(body.mass),
            braked,
        }
    }
}

/// Friction along one axis given the velocity and driving force on it.
/// Static friction exactly cancels a drive below the threshold; otherwise
/// kinetic friction opposes the motion, or the drive when at rest.
fn friction(velocity: f32, drive: f32, normal: f32, material: Material) -> Option<f32> {
    if velocity == 0.0 && drive == 0.0 {
        return None;
    }
    let heading = if velocity == 0.0 { sign(drive) } else { sign(velocity) };
    let kinetic = -heading * normal * material.kinetic_friction;
    if velocity == 0.0 && drive.abs() < material.static_threshold(normal) {
        Some(-drive)
    } else {
        Some(kinetic)
    }
}

impl Serialize for ForceManager {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let forces: Vec<Force> = self
            .iter()
            .map(|(source, name, vector)| Force {
                source,
                name: name.clone(),
                vector,
            })
            .collect();
        forces.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ForceManager {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let forces = Vec::<Force>::deserialize(deserializer)?;
        let mut manager = ForceManager::new();
        for force in forces {
            manager.add(force.source, force.name, force.vector);
        }
        Ok(manager)
    }
}
