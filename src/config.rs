//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the constants you care about.
//!
//! ## Usage
//!
//! The simulation copies what it needs out of the config when it is built
//! ([`crate::simulation::Simulation::new`]), so edits take effect on restart.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{
    validate_duration, validate_pool_capacity, validate_viewport, SimError, SimResult,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Path of the optional override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    // ── Viewport ──────────────────────────────────────────────────────────────
    pub viewport_width: f32,
    pub viewport_height: f32,

    /// Seed for the simulation RNG.  `None` seeds from the wall clock.
    pub seed: Option<u64>,

    // ── Ship ──────────────────────────────────────────────────────────────────
    pub starting_lives: u32,
    pub ship_thrust: f32,
    pub ship_rotation_speed: f32,
    pub ship_max_speed: f32,
    pub ship_drag: f32,
    pub ship_radius: f32,
    pub ship_gun_offset: f32,

    // ── Bullets & weapons ─────────────────────────────────────────────────────
    pub bullet_pool_size: usize,
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    pub weapon_duration: f32,

    // ── Asteroids & scoring ───────────────────────────────────────────────────
    pub initial_asteroids: u32,
    pub asteroid_spawn_clearance: f32,
    pub free_life_score_step: u32,

    // ── Power-ups ─────────────────────────────────────────────────────────────
    pub power_up_pool_size: usize,
    pub power_up_lifetime: f32,
    pub power_up_spawn_rate: f32,

    // ── Death effects ─────────────────────────────────────────────────────────
    pub particle_pool_size: usize,
    pub fragment_pool_size: usize,
    pub death_effect_duration: f32,
    pub life_loss_duration: f32,

    // ── Host ──────────────────────────────────────────────────────────────────
    pub max_frame_dt: f32,
    pub hud_font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Viewport
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            seed: None,
            // Ship
            starting_lives: STARTING_LIVES,
            ship_thrust: SHIP_THRUST,
            ship_rotation_speed: SHIP_ROTATION_SPEED,
            ship_max_speed: SHIP_MAX_SPEED,
            ship_drag: SHIP_DRAG,
            ship_radius: SHIP_RADIUS,
            ship_gun_offset: SHIP_GUN_OFFSET,
            // Bullets & weapons
            bullet_pool_size: BULLET_POOL_SIZE,
            bullet_speed: BULLET_SPEED,
            bullet_lifetime: BULLET_LIFETIME,
            weapon_duration: WEAPON_DURATION,
            // Asteroids & scoring
            initial_asteroids: INITIAL_ASTEROIDS,
            asteroid_spawn_clearance: ASTEROID_SPAWN_CLEARANCE,
            free_life_score_step: FREE_LIFE_SCORE_STEP,
            // Power-ups
            power_up_pool_size: POWER_UP_POOL_SIZE,
            power_up_lifetime: POWER_UP_LIFETIME,
            power_up_spawn_rate: POWER_UP_SPAWN_RATE,
            // Death effects
            particle_pool_size: PARTICLE_POOL_SIZE,
            fragment_pool_size: FRAGMENT_POOL_SIZE,
            death_effect_duration: DEATH_EFFECT_DURATION,
            life_loss_duration: LIFE_LOSS_DURATION,
            // Host
            max_frame_dt: MAX_FRAME_DT,
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document on top of the compiled defaults.
    pub fn from_toml_str(contents: &str) -> SimResult<Self> {
        toml::from_str::<GameConfig>(contents).map_err(|e| SimError::ConfigParse {
            path: CONFIG_PATH.to_string(),
            message: e.to_string(),
        })
    }

    /// Check every value the simulation divides by or allocates from.
    pub fn validate(&self) -> SimResult<()> {
        validate_viewport(self.viewport_width, self.viewport_height)?;
        validate_pool_capacity("bullet_pool_size", self.bullet_pool_size)?;
        validate_pool_capacity("power_up_pool_size", self.power_up_pool_size)?;
        validate_pool_capacity("particle_pool_size", self.particle_pool_size)?;
        validate_pool_capacity("fragment_pool_size", self.fragment_pool_size)?;
        validate_duration("bullet_lifetime", self.bullet_lifetime)?;
        validate_duration("weapon_duration", self.weapon_duration)?;
        validate_duration("power_up_lifetime", self.power_up_lifetime)?;
        validate_duration("death_effect_duration", self.death_effect_duration)?;
        validate_duration("life_loss_duration", self.life_loss_duration)?;
        validate_duration("max_frame_dt", self.max_frame_dt)?;
        if self.free_life_score_step == 0 {
            return Err(SimError::UnsafeConstant {
                name: "free_life_score_step",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }
        Ok(())
    }

    /// Return `self` if it validates, otherwise log and fall back to defaults.
    pub fn validated(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                warn!("Rejected game config: {e}; using defaults");
                Self::default()
            }
        }
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are logged
/// but do not abort the game.  A missing file is silently ignored (defaults are
/// already in place from `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match GameConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded.validated();
                info!("Loaded game config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("{e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = GameConfig::from_toml_str("").expect("empty TOML is valid");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_document_overrides_only_named_keys() {
        let config = GameConfig::from_toml_str("starting_lives = 5\nseed = 42\n")
            .expect("partial TOML must parse");
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.bullet_pool_size, BULLET_POOL_SIZE);
    }

    #[test]
    fn malformed_document_reports_parse_error() {
        let err = GameConfig::from_toml_str("starting_lives = \"many\"").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse { .. }));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = GameConfig {
            bullet_pool_size: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validated(), GameConfig::default());
    }
}
