//! Forcebox - force-ledger rigid body physics for a 2D thrust platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (force ledger, bodies, collisions, zones)
//! - `settings`: Per-simulation physical constants and flags
//! - `error`: Configuration and input errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::SimConfig;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (100 Hz)
    pub const SIM_DT: f32 = 1.0 / 100.0;

    /// Default level dimensions (pixels)
    pub const LEVEL_WIDTH: i32 = 1280;
    pub const LEVEL_HEIGHT: i32 = 720;

    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f32 = 15.0;
    /// Air density at sea level (kg/m³)
    pub const AIR_DENSITY: f32 = 1.2041;
    /// Pixels per metre. The player sprite is 68px tall and 1.7m in the world.
    pub const METRE: f32 = 68.0 / 1.7;

    pub const PLAYER_DRAG_COEFFICIENT: f32 = 1.15;
    pub const SPHERE_DRAG_COEFFICIENT: f32 = 0.5;
    /// Degrees turned per rotate step
    pub const PLAYER_ROTATION_SPEED: f32 = 1.0;
    pub const PLAYER_MASS: f32 = 100.0;
    pub const PLAYER_TANK: f32 = 100.0;
    pub const PLAYER_THRUST: f32 = 2500.0;

    /// Impact speed (m/s) at which a blocked move counts as damaging
    pub const DAMAGE_SPEED: f32 = 5.0;
    /// Engine particles requested per thrust step
    pub const ENGINE_PARTICLES: u32 = 10;
    /// Seconds between key object pulses
    pub const KEY_PULSE_INTERVAL: f32 = 1.5;

    pub const GREY: [u8; 3] = [119, 119, 119];
    pub const GREEN: [u8; 3] = [28, 214, 59];
    pub const YELLOW: [u8; 3] = [255, 255, 0];
    pub const MAGENTA: [u8; 3] = [181, 49, 201];
}

/// Sign of a scalar: -1, 0 or 1
#[inline]
pub fn sign(n: f32) -> f32 {
    if n == 0.0 { 0.0 } else { n.signum() }
}

/// Round to a number of decimal places
#[inline]
pub fn round_to(n: f32, decimals: i32) -> f32 {
    let scale = 10f32.powi(decimals);
    (n * scale).round() / scale
}
