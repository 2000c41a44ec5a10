//! Simulation settings
//!
//! Physical constants and global toggles for one simulation. The world owns a
//! `SimConfig` and passes it by reference into every update, so there is no
//! ambient mutable state.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SimError;
use crate::consts::*;
use crate::sim::LevelBounds;

/// Per-simulation physical constants and flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Physics ===
    /// Gravitational acceleration (m/s²)
    pub gravity: f32,
    /// Air density used for quadratic drag (kg/m³)
    pub air_density: f32,
    /// Global gravity toggle
    pub gravity_on: bool,
    /// Pixels per metre (world-to-pixel scale)
    pub metre: f32,

    // === Gameplay ===
    /// Level extent used to bound ray traces
    pub level: LevelBounds,
    /// Impact speed (m/s) that counts as a damaging collision
    pub damage_speed: f32,
    /// Degrees turned per rotate step
    pub rotation_speed: f32,
    /// Fuel adds nothing to the player's mass
    pub weightless_fuel: bool,

    // === Diagnostics ===
    /// Dump the player's force ledger every frame at debug level
    pub debug: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            air_density: AIR_DENSITY,
            gravity_on: true,
            metre: METRE,

            level: LevelBounds::new(LEVEL_WIDTH, LEVEL_HEIGHT),
            damage_speed: DAMAGE_SPEED,
            rotation_speed: PLAYER_ROTATION_SPEED,
            weightless_fuel: false,

            debug: false,
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded simulation config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Save the config to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Simulation config saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Gravity acceleration actually in effect
    pub fn effective_gravity(&self) -> f32 {
        if self.gravity_on { self.gravity } else { 0.0 }
    }
}
