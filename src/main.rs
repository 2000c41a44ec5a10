//! Forcebox headless runner
//!
//! Builds a demo level, runs it for a number of frames and prints the final
//! world snapshot as JSON.
//!
//! Usage: `forcebox [frames] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::{IVec2, Vec2};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use forcebox::consts::*;
    use forcebox::sim::{Body, Rect, Side, SimEvent, ThrustDirection, TickInput, Trigger, World, tick};
    use forcebox::{SimConfig, SimError};

    const DEMO_SEED: u64 = 0x5eed_f0bc;
    const DEFAULT_FRAMES: u64 = 600;
    const SPHERES: usize = 6;

    /// Floor, walls, an ice strip, a vent, the player, a key and some spheres
    pub fn build_scene(config: SimConfig, seed: u64) -> Result<World, SimError> {
        let mut world = World::new(config);
        let (w, h) = (world.config.level.width, world.config.level.height);

        world.add_collider(Rect::new(0, h - 40, w, 40), "Asphalt")?;
        world.add_collider(Rect::new(0, 0, 20, h - 40), "Steel")?;
        world.add_collider(Rect::new(w - 20, 0, 20, h - 40), "Steel")?;
        world.add_collider(Rect::new(20, 0, w - 40, 20), "Steel")?;
        world.add_collider(Rect::new(560, h - 60, 200, 20), "Ice")?;
        let vent = world.add_collider(Rect::new(880, h - 60, 60, 20), "Rubber")?;
        world.add_stream(vent, Side::Top, 240, Vec2::new(0.0, -50.0))?;

        world.add_player(Body::player(
            Vec2::new(200.0, h as f32 - 200.0),
            IVec2::new(20, 68),
            PLAYER_MASS,
            PLAYER_TANK,
            PLAYER_THRUST,
        ));

        let mut rng = Pcg32::seed_from_u64(seed);
        for _ in 0..SPHERES {
            let pos = Vec2::new(rng.random_range(320.0..1100.0), rng.random_range(80.0..400.0));
            let size = rng.random_range(12..32);
            let sphere = Body::new(pos, IVec2::splat(size), rng.random_range(0.5..5.0))
                .with_restitution(rng.random_range(0.0..0.6));
            world.add_body(sphere);
        }

        world.add_body(Body::key(Vec2::new(700.0, 300.0), IVec2::new(16, 16), 1.0, MAGENTA));
        world.add_objective(Rect::new(w - 140, h - 100, 60, 60), Trigger::Key);
        world.add_obstacle(Rect::new(420, h - 50, 60, 10));
        Ok(world)
    }

    /// Scripted pilot: climb, lean right, then coast
    fn pilot(frame: u64) -> TickInput {
        let mut input = TickInput::default();
        match frame {
            0..=59 => input.thrust = Some(ThrustDirection::Forward),
            60 => input.release_thrust = true,
            61..=90 => input.rotate = 1.0,
            91..=120 => input.thrust = Some(ThrustDirection::Forward),
            121 => input.release_thrust = true,
            _ => {}
        }
        input
    }

    pub fn run(args: &[String]) -> Result<(), SimError> {
        let frames = args
            .first()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_FRAMES);
        let config = match args.get(1) {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };

        let mut world = build_scene(config, DEMO_SEED)?;
        log::info!(
            "demo scene: {} bodies, {} colliders, seed {:#x}",
            world.bodies.len(),
            world.colliders.len(),
            DEMO_SEED
        );

        for frame in 0..frames {
            for event in tick(&mut world, &pilot(frame), SIM_DT)? {
                match event {
                    SimEvent::EmitParticles { .. } | SimEvent::KeyPulse { .. } => {
                        log::trace!("frame {frame}: {event:?}")
                    }
                    SimEvent::BodiesCollided { .. } => log::debug!("frame {frame}: {event:?}"),
                    _ => log::info!("frame {frame}: {event:?}"),
                }
            }
            if world.level_complete() {
                log::info!("level complete at frame {frame}");
                break;
            }
        }

        if let Some(player) = world.player() {
            log::info!(
                "player at {} with {} damaging collisions",
                player.pos(),
                player.damaging_collisions()
            );
        }
        println!("{}", serde_json::to_string_pretty(&world)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = demo::run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on the web; embed `forcebox::sim` in the host page's loop
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::demo::build_scene;
    use forcebox::SimConfig;

    #[test]
    fn test_demo_scene_is_deterministic() {
        let a = build_scene(SimConfig::default(), 7).unwrap();
        let b = build_scene(SimConfig::default(), 7).unwrap();
        let pos = |w: &forcebox::sim::World| w.bodies.iter().map(|b| b.pos()).collect::<Vec<_>>();
        assert_eq!(pos(&a), pos(&b));
        assert!(a.player().is_some());
        assert_eq!(a.streams.len(), 1);
    }
}
