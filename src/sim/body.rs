//! Dynamic bodies
//!
//! A body owns its force ledger, integrates velocity from the ledger's
//! resultant and moves one axis at a time, clamping against static geometry.
//! Contact with other bodies is left to the collision handler.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::contact::{Axis, Neighbor, contacts};
use super::entity::EntityId;
use super::force::{BodyProbe, ForceManager, ForceName};
use super::rect::Rect;
use super::tick::SimEvent;
use crate::consts::*;
use crate::settings::SimConfig;
use crate::{SimError, round_to, sign};

/// Player-only state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Remaining fuel units (each weighs one mass unit)
    pub fuel: f32,
    pub tank: f32,
    /// Thrust force magnitude
    pub thrust: f32,
    /// Set once the tank runs dry
    #[serde(default)]
    pub exhausted: bool,
}

impl PlayerState {
    pub fn new(tank: f32, thrust: f32) -> Self {
        Self {
            fuel: tank,
            tank,
            thrust,
            exhausted: false,
        }
    }
}

/// Key object state. Only the renderer cares about these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyState {
    pub colour: [u8; 3],
    /// Simulation time of the last pulse
    pub last_emission: f32,
    pub emission_interval: f32,
}

impl KeyState {
    pub fn new(colour: [u8; 3]) -> Self {
        Self {
            colour,
            last_emission: 0.0,
            emission_interval: KEY_PULSE_INTERVAL,
        }
    }

    /// True (and resets the timer) when a pulse is due at time `now`
    pub fn pulse_due(&mut self, now: f32) -> bool {
        if now - self.last_emission >= self.emission_interval {
            self.last_emission = now;
            true
        } else {
            false
        }
    }
}

/// What kind of body this is
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum BodyKind {
    #[default]
    Generic,
    Player(PlayerState),
    Key(KeyState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrustDirection {
    Forward,
    Reverse,
}

/// A dynamic rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Index in the world body table (assigned by `World::add_body`)
    pub id: u32,
    pub kind: BodyKind,
    pos: Vec2,
    rect: Rect,
    /// Mass without fuel
    pub base_mass: f32,
    mass: f32,
    pub drag_coefficient: f32,
    /// Coefficient of restitution
    pub restitution: f32,
    pub weightless: bool,
    /// Orientation in degrees, positive is anticlockwise on screen
    angle: f32,
    facing: Vec2,
    engine: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    resultant: Vec2,
    momentum: Vec2,
    forces: ForceManager,
    damaging_collisions: u32,
}

impl Body {
    /// Generic body centered on `pos`
    pub fn new(pos: Vec2, size: IVec2, mass: f32) -> Self {
        let mut body = Self {
            id: 0,
            kind: BodyKind::Generic,
            pos,
            rect: Rect::from_center(pos, size.x, size.y),
            base_mass: mass,
            mass,
            drag_coefficient: SPHERE_DRAG_COEFFICIENT,
            restitution: 0.0,
            weightless: false,
            angle: 0.0,
            facing: Vec2::NEG_Y,
            engine: pos,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            resultant: Vec2::ZERO,
            momentum: Vec2::ZERO,
            forces: ForceManager::new(),
            damaging_collisions: 0,
        };
        body.set_angle(0.0);
        body
    }

    /// A player body with a full tank
    pub fn player(pos: Vec2, size: IVec2, mass: f32, tank: f32, thrust: f32) -> Self {
        let mut body = Self::new(pos, size, mass).with_drag(PLAYER_DRAG_COEFFICIENT);
        body.kind = BodyKind::Player(PlayerState::new(tank, thrust));
        body.mass = mass + tank;
        body
    }

    /// A key object that pulses in `colour`
    pub fn key(pos: Vec2, size: IVec2, mass: f32, colour: [u8; 3]) -> Self {
        let mut body = Self::new(pos, size, mass);
        body.kind = BodyKind::Key(KeyState::new(colour));
        body
    }

    pub fn with_drag(mut self, drag_coefficient: f32) -> Self {
        self.drag_coefficient = drag_coefficient;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.set_velocity(velocity);
        self
    }

    pub fn weightless(mut self, weightless: bool) -> Self {
        self.weightless = weightless;
        self
    }

    #[inline]
    pub fn entity_id(&self) -> EntityId {
        EntityId::Body(self.id)
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, BodyKind::Player(_))
    }

    pub fn is_key(&self) -> bool {
        matches!(self.kind, BodyKind::Key(_))
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.kind {
            BodyKind::Player(state) => Some(state),
            _ => None,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Move the body; the rect re-centers on the rounded position
    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
        self.rect.set_center(pos.round().as_ivec2());
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center().as_vec2()
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.momentum = velocity * self.mass;
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    /// Resultant force from the last update
    pub fn resultant(&self) -> Vec2 {
        self.resultant
    }

    pub fn momentum(&self) -> Vec2 {
        self.momentum
    }

    /// Effective mass (includes fuel for players)
    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Unit vector the body's nose points along
    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    /// Thrust application point
    pub fn engine(&self) -> Vec2 {
        self.engine
    }

    pub fn damaging_collisions(&self) -> u32 {
        self.damaging_collisions
    }

    pub fn forces(&self) -> &ForceManager {
        &self.forces
    }

    pub fn add_force(&mut self, source: EntityId, name: impl Into<ForceName>, vector: Vec2) {
        self.forces.add(source, name.into(), vector);
    }

    /// Add a force whose tag arrives as loosely typed data. Anything but a
    /// string is rejected before the ledger is touched.
    pub fn add_force_tagged(
        &mut self,
        source: EntityId,
        name: &serde_json::Value,
        vector: Vec2,
    ) -> Result<(), SimError> {
        let name = ForceName::try_from(name)?;
        self.forces.add(source, name, vector);
        Ok(())
    }

    pub fn remove_force(&mut self, source: EntityId, name: impl Into<ForceName>) {
        self.forces.remove(source, &name.into());
    }

    /// Resultant of everything but friction and drag
    pub fn resultant_nof(&self) -> Vec2 {
        self.forces.resultant_nof()
    }

    /// Effort this body directs at `partner`
    pub fn effort_against(&self, partner: EntityId) -> Vec2 {
        self.forces.effort_against(partner)
    }

    fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
        let rad = angle.to_radians();
        self.facing = Vec2::new(-rad.sin(), -rad.cos()).normalize_or_zero();
        self.refresh_engine();
    }

    fn refresh_engine(&mut self) {
        self.engine = self.pos - self.facing * (self.rect.h as f32 / 2.0);
    }

    /// Turn by `scale` rotation steps (positive is clockwise). Refused while
    /// anything touches the body.
    pub fn rotate(&mut self, scale: f32, neighbors: &[Neighbor], config: &SimConfig) -> bool {
        if !contacts(&self.rect, neighbors).is_empty() {
            return false;
        }
        self.set_angle(self.angle - config.rotation_speed * scale);
        true
    }

    /// Fire the engine. Consumes one fuel unit; without fuel the drive is cut.
    pub fn thrust(&mut self, direction: ThrustDirection) -> Option<SimEvent> {
        let id = self.entity_id();
        let BodyKind::Player(player) = &mut self.kind else {
            log::warn!("thrust requested for non-player body {}", self.id);
            return None;
        };
        if player.fuel <= 0.0 {
            self.forces.remove(id, &ForceName::Drive);
            return None;
        }
        player.fuel = (player.fuel - 1.0).max(0.0);
        let drive = match direction {
            ThrustDirection::Forward => self.facing * player.thrust,
            ThrustDirection::Reverse => -self.facing * player.thrust,
        };
        self.forces.add(id, ForceName::Drive, drive);

        (direction == ThrustDirection::Forward).then(|| SimEvent::EmitParticles {
            body: self.id,
            at: self.engine,
            direction: -self.facing,
            count: ENGINE_PARTICLES,
        })
    }

    /// Release the engine
    pub fn cut_thrust(&mut self) {
        let id = self.entity_id();
        self.forces.remove(id, &ForceName::Drive);
    }

    /// Advance one frame.
    ///
    /// `colliders` are the static colliders (movement blockers) and `bodies`
    /// the other dynamic bodies; both count for contact.
    pub fn update(
        &mut self,
        colliders: &[Neighbor],
        bodies: &[Neighbor],
        config: &SimConfig,
        dt: f32,
    ) -> Vec<SimEvent> {
        let mut events = Vec::new();
        let id = self.entity_id();

        if let BodyKind::Player(player) = &mut self.kind {
            self.mass = if config.weightless_fuel {
                self.base_mass
            } else {
                self.base_mass + player.fuel
            };
            if player.fuel <= 0.0 {
                self.forces.remove(id, &ForceName::Drive);
                if !player.exhausted {
                    player.exhausted = true;
                    events.push(SimEvent::FuelExhausted { body: self.id });
                }
            }
        }
        self.refresh_engine();

        let neighbors: Vec<Neighbor> = colliders.iter().chain(bodies).copied().collect();
        let touching = contacts(&self.rect, &neighbors);
        let probe = BodyProbe {
            id,
            mass: self.mass,
            velocity: self.velocity,
            rect: self.rect,
            drag_coefficient: self.drag_coefficient,
            weightless: self.weightless,
        };
        let outcome = self.forces.update(&probe, &touching, config, dt);
        self.resultant = outcome.resultant;
        self.acceleration = outcome.acceleration;

        self.velocity += self.acceleration * dt;
        // Kill residual creep left over from friction
        if round_to(self.velocity.x, 1) == 0.0 && sign(self.velocity.x) != sign(self.resultant.x)
        {
            self.velocity.x = 0.0;
        }
        if round_to(self.velocity.y, 1) == 0.0 && sign(self.velocity.y) != sign(self.resultant.y)
        {
            self.velocity.y = 0.0;
        }
        // Friction alone brakes a sliding axis to rest; a drive still
        // integrates normally
        let driving = self.forces.resultant_nof();
        if outcome.braked.x && driving.x == 0.0 {
            self.velocity.x = 0.0;
        }
        if outcome.braked.y && driving.y == 0.0 {
            self.velocity.y = 0.0;
        }
        self.momentum = self.velocity * self.mass;

        if config.debug && self.is_player() {
            for (source, name, vector) in self.forces.iter() {
                log::debug!("    {name}: {vector} -- SOURCE: {source}");
            }
            log::debug!(
                "pos {} resultant {} accel {} vel {} momentum {} angle {}",
                self.pos,
                self.resultant,
                self.acceleration,
                self.velocity,
                self.momentum,
                self.angle
            );
        }

        for axis in [Axis::X, Axis::Y] {
            if let Some(event) = self.sweep(axis, colliders, config, dt) {
                events.push(event);
            }
        }
        events
    }

    /// Move along one axis and clamp against the nearest static collider the
    /// body runs into
    fn sweep(
        &mut self,
        axis: Axis,
        colliders: &[Neighbor],
        config: &SimConfig,
        dt: f32,
    ) -> Option<SimEvent> {
        let before = self.rect;
        let speed = axis.of(self.velocity);
        let step = speed * dt * config.metre;
        match axis {
            Axis::X => {
                self.pos.x += step;
                self.rect.set_center_x(self.pos.x.round() as i32);
            }
            Axis::Y => {
                self.pos.y += step;
                self.rect.set_center_y(self.pos.y.round() as i32);
            }
        }
        if speed == 0.0 {
            return None;
        }

        let forward = speed > 0.0;
        // Leading edge of the body and facing edge of a collider on this axis
        let (lead, face): (fn(&Rect) -> i32, fn(&Rect) -> i32) = match (axis, forward) {
            (Axis::X, true) => (Rect::right, Rect::left),
            (Axis::X, false) => (Rect::left, Rect::right),
            (Axis::Y, true) => (Rect::bottom, Rect::top),
            (Axis::Y, false) => (Rect::top, Rect::bottom),
        };
        let blockers = colliders.iter().filter(|c| {
            self.rect.overlaps(&c.rect)
                && if forward {
                    lead(&before) <= face(&c.rect)
                } else {
                    lead(&before) >= face(&c.rect)
                }
        });
        let blocker = if forward {
            blockers.min_by_key(|c| face(&c.rect))
        } else {
            blockers.max_by_key(|c| face(&c.rect))
        }?;

        let edge = face(&blocker.rect);
        match (axis, forward) {
            (Axis::X, true) => self.rect.set_right(edge),
            (Axis::X, false) => self.rect.set_left(edge),
            (Axis::Y, true) => self.rect.set_bottom(edge),
            (Axis::Y, false) => self.rect.set_top(edge),
        }
        let center = self.rect.center().as_vec2();
        let bounced = if self.restitution > 0.0 && speed.abs() * self.restitution > 1.0 {
            -speed * self.restitution
        } else {
            0.0
        };
        match axis {
            Axis::X => {
                self.pos.x = center.x;
                self.velocity.x = bounced;
            }
            Axis::Y => {
                self.pos.y = center.y;
                self.velocity.y = bounced;
            }
        }
        self.momentum = self.velocity * self.mass;

        if speed.abs() >= config.damage_speed {
            self.damaging_collisions += 1;
            Some(SimEvent::Impact {
                body: self.id,
                with: blocker.id,
                speed: speed.abs(),
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collider::WorldCollider;

    fn floor() -> Neighbor {
        WorldCollider::new(0, Rect::new(0, 200, 400, 50), "Asphalt")
            .unwrap()
            .as_neighbor()
    }

    fn run(body: &mut Body, colliders: &[Neighbor], frames: usize) -> Vec<SimEvent> {
        let config = SimConfig::default();
        (0..frames)
            .flat_map(|_| body.update(colliders, &[], &config, SIM_DT))
            .collect()
    }

    #[test]
    fn test_rect_follows_position() {
        let mut body = Body::new(Vec2::new(50.0, 50.0), IVec2::new(20, 30), 1.0);
        body.set_pos(Vec2::new(100.6, 40.2));
        assert_eq!(body.rect().center(), IVec2::new(101, 40));
        assert_eq!(body.rect().w, 20);
    }

    #[test]
    fn test_drop_settles_on_floor() {
        let mut body = Body::new(Vec2::new(100.0, 100.0), IVec2::new(20, 20), 1.0).with_drag(0.0);
        let events = run(&mut body, &[floor()], 300);

        assert_eq!(body.velocity().y, 0.0);
        assert_eq!(body.rect().bottom(), 200);
        assert_eq!(body.resultant(), Vec2::ZERO);
        assert_eq!(body.pos().x, 100.0);
        // Landed at roughly 8 m/s
        assert_eq!(body.damaging_collisions(), 1);
        assert!(matches!(events[0], SimEvent::Impact { body: 0, .. }));
    }

    #[test]
    fn test_resting_body_stays_put() {
        let mut body = Body::new(Vec2::new(100.0, 190.0), IVec2::new(20, 20), 1.0);
        for _ in 0..50 {
            body.update(&[floor()], &[], &SimConfig::default(), SIM_DT);
            assert_eq!(body.resultant(), Vec2::ZERO);
            assert_eq!(body.pos(), Vec2::new(100.0, 190.0));
        }
    }

    #[test]
    fn test_drive_below_static_threshold_does_not_move() {
        let mut body = Body::new(Vec2::new(100.0, 190.0), IVec2::new(20, 20), 1.0).with_drag(0.0);
        let id = body.entity_id();
        // μs·N = 0.9 * 15 = 13.5
        body.add_force(id, ForceName::Drive, Vec2::new(13.0, 0.0));
        run(&mut body, &[floor()], 100);
        assert_eq!(body.pos(), Vec2::new(100.0, 190.0));
        assert_eq!(body.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_drive_above_static_threshold_slides() {
        let mut body = Body::new(Vec2::new(100.0, 190.0), IVec2::new(20, 20), 1.0).with_drag(0.0);
        let id = body.entity_id();
        body.add_force(id, ForceName::Drive, Vec2::new(20.0, 0.0));
        run(&mut body, &[floor()], 1);
        assert!((body.resultant().x - (20.0 - 0.65 * 15.0)).abs() < 1e-4);
        run(&mut body, &[floor()], 20);
        assert!(body.pos().x > 100.0);
        assert_eq!(body.rect().bottom(), 200);
        let friction = body.forces().get(EntityId::Collider(0), &ForceName::FrictionX);
        assert!((friction.unwrap().x + 0.65 * 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_slide_comes_to_rest_after_drive_released() {
        let mut body = Body::new(Vec2::new(100.0, 190.0), IVec2::new(20, 20), 1.0).with_drag(0.0);
        let id = body.entity_id();
        body.add_force(id, ForceName::Drive, Vec2::new(20.0, 0.0));
        run(&mut body, &[floor()], 50);
        body.remove_force(id, ForceName::Drive);
        run(&mut body, &[floor()], 200);
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert_eq!(body.resultant(), Vec2::ZERO);
    }

    #[test]
    fn test_drive_reverses_slide_through_friction_clamp() {
        let mut body = Body::new(Vec2::new(100.0, 190.0), IVec2::new(20, 20), 1.0)
            .with_drag(0.0)
            .with_velocity(Vec2::new(0.5, 0.0));
        let id = body.entity_id();
        body.add_force(id, ForceName::Drive, Vec2::new(-100.0, 0.0));
        run(&mut body, &[floor()], 1);
        // Kinetic friction overshoots and is dropped; the drive still acts
        assert!((body.velocity().x + 0.5).abs() < 1e-5);
        assert_eq!(body.velocity().y, 0.0);
        assert!((body.resultant().x + 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_drive_into_wall_is_held_by_side_friction() {
        let wall = WorldCollider::new(0, Rect::new(200, 0, 20, 400), "Asphalt")
            .unwrap()
            .as_neighbor();
        let mut body = Body::new(Vec2::new(190.0, 100.0), IVec2::new(20, 20), 1.0).with_drag(0.0);
        let id = body.entity_id();
        body.add_force(id, ForceName::Drive, Vec2::new(100.0, 0.0));
        run(&mut body, &[wall], 10);

        assert_eq!(body.pos(), Vec2::new(190.0, 100.0));
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert_eq!(body.resultant(), Vec2::ZERO);
        let wall_id = EntityId::Collider(0);
        // μs·N = 0.9 * 100 holds the 15N weight
        assert_eq!(
            body.forces().get(wall_id, &ForceName::ReactionX),
            Some(Vec2::new(-100.0, 0.0))
        );
        assert_eq!(
            body.forces().get(wall_id, &ForceName::FrictionY),
            Some(Vec2::new(0.0, -15.0))
        );
    }

    #[test]
    fn test_push_from_distant_body_survives_update() {
        let mut body = Body::new(Vec2::new(100.0, 100.0), IVec2::new(20, 20), 1.0)
            .weightless(true)
            .with_drag(0.0);
        body.add_force(EntityId::Body(5), ForceName::Push, Vec2::new(10.0, 0.0));
        body.add_force(EntityId::Body(6), ForceName::Reaction, Vec2::new(-4.0, 0.0));
        body.add_force(EntityId::Body(7), "Magnet", Vec2::new(3.0, 0.0));
        run(&mut body, &[], 1);

        assert!(body.forces().contains(EntityId::Body(5), &ForceName::Push));
        assert!(body.forces().contains(EntityId::Body(6), &ForceName::Reaction));
        assert!(!body.forces().contains(EntityId::Body(7), &ForceName::from("Magnet")));
        assert_eq!(body.resultant(), Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_small_bounce_is_discarded() {
        let wall = WorldCollider::new(1, Rect::new(200, 0, 20, 400), "Steel")
            .unwrap()
            .as_neighbor();
        // |v|·COR = 0.9 < 1
        let mut slow = Body::new(Vec2::new(185.0, 100.0), IVec2::new(20, 20), 1.0)
            .weightless(true)
            .with_drag(0.0)
            .with_restitution(0.3)
            .with_velocity(Vec2::new(3.0, 0.0));
        run(&mut slow, &[wall], 5);
        assert_eq!(slow.velocity().x, 0.0);
        assert_eq!(slow.rect().right(), 200);

        // |v|·COR = 2.4 > 1 reflects
        let mut fast = Body::new(Vec2::new(190.0, 100.0), IVec2::new(20, 20), 1.0)
            .weightless(true)
            .with_drag(0.0)
            .with_restitution(0.3)
            .with_velocity(Vec2::new(8.0, 0.0));
        let events = run(&mut fast, &[wall], 1);
        assert!((fast.velocity().x + 2.4).abs() < 1e-4);
        assert_eq!(fast.rect().right(), 200);
        assert_eq!(fast.damaging_collisions(), 1);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_already_overlapping_geometry_is_not_snapped() {
        let block = WorldCollider::new(2, Rect::new(90, 90, 40, 40), "Asphalt")
            .unwrap()
            .as_neighbor();
        let mut body = Body::new(Vec2::new(100.0, 100.0), IVec2::new(20, 20), 1.0)
            .weightless(true)
            .with_drag(0.0)
            .with_velocity(Vec2::new(1.0, 0.0));
        run(&mut body, &[block], 1);
        assert!(body.pos().x > 100.0);
        assert_eq!(body.velocity().x, 1.0);
    }

    #[test]
    fn test_player_thrust_consumes_fuel() {
        let mut player = Body::player(Vec2::new(100.0, 100.0), IVec2::new(20, 68), 100.0, 2.0, 2500.0);
        assert_eq!(player.mass(), 102.0);

        let event = player.thrust(ThrustDirection::Forward);
        assert!(matches!(event, Some(SimEvent::EmitParticles { count: ENGINE_PARTICLES, .. })));
        let drive = player.forces().get(player.entity_id(), &ForceName::Drive).unwrap();
        assert!((drive - Vec2::new(0.0, -2500.0)).length() < 1e-3);

        assert!(player.thrust(ThrustDirection::Reverse).is_none());
        assert_eq!(player.player_state().unwrap().fuel, 0.0);

        // Dry tank: the drive goes away and the mass drops to the hull
        let events = player.update(&[], &[], &SimConfig::default(), SIM_DT);
        assert_eq!(player.mass(), 100.0);
        assert!(!player.forces().contains(player.entity_id(), &ForceName::Drive));
        assert!(matches!(events[0], SimEvent::FuelExhausted { body: 0 }));
        assert!(player.thrust(ThrustDirection::Forward).is_none());
    }

    #[test]
    fn test_thrust_follows_rotation() {
        let mut player = Body::player(Vec2::new(100.0, 100.0), IVec2::new(20, 68), 100.0, 10.0, 1000.0);
        let config = SimConfig {
            rotation_speed: 90.0,
            ..Default::default()
        };
        // One clockwise step of 90 degrees points the nose right
        assert!(player.rotate(1.0, &[], &config));
        player.thrust(ThrustDirection::Forward);
        let drive = player.forces().get(player.entity_id(), &ForceName::Drive).unwrap();
        assert!((drive - Vec2::new(1000.0, 0.0)).length() < 1e-2);
        assert!((player.engine() - Vec2::new(66.0, 100.0)).length() < 1e-3);
    }

    #[test]
    fn test_rotation_refused_while_touching() {
        let mut body = Body::new(Vec2::new(100.0, 190.0), IVec2::new(20, 20), 1.0);
        assert!(!body.rotate(1.0, &[floor()], &SimConfig::default()));
        assert_eq!(body.angle(), 0.0);
    }

    #[test]
    fn test_tagged_force_rejects_non_string() {
        let mut body = Body::new(Vec2::ZERO, IVec2::new(10, 10), 1.0);
        let id = body.entity_id();
        body.add_force(id, "Drive", Vec2::new(5.0, 0.0));
        let err = body
            .add_force_tagged(id, &serde_json::json!(["Drive"]), Vec2::new(9.0, 9.0))
            .unwrap_err();
        assert!(matches!(err, SimError::ForceNameType { .. }));
        assert_eq!(body.forces().len(), 1);
        assert_eq!(body.forces().get(id, &ForceName::Drive), Some(Vec2::new(5.0, 0.0)));

        body.add_force_tagged(id, &serde_json::json!("Drive"), Vec2::new(9.0, 0.0))
            .unwrap();
        assert_eq!(body.forces().get(id, &ForceName::Drive), Some(Vec2::new(9.0, 0.0)));
    }

    #[test]
    fn test_key_pulse_interval() {
        let mut key = KeyState::new(MAGENTA);
        assert!(!key.pulse_due(1.0));
        assert!(key.pulse_due(1.5));
        assert!(!key.pulse_due(2.0));
        assert!(key.pulse_due(3.0));
    }
}
