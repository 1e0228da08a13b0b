//! Game rules and presets
//!
//! Every tunable the simulation reads lives in [`Rules`]. Rules can be built
//! from a [`Variant`] preset or loaded from a JSON file; missing fields fall
//! back to the Treason defaults.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating rules
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse rules: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid rule `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Rule presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
pub enum Variant {
    /// Single wave, no lives: the run ends once every enemy is shot
    Classic,
    /// Nine lives, levels, instructions screen
    #[default]
    Treason,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Treason => "Treason",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Variant::Classic),
            "treason" => Some(Variant::Treason),
            _ => None,
        }
    }
}

/// Per-direction proximity bands for the enemy targeting check (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproachThresholds {
    pub left: i32,
    pub right: i32,
    pub up: i32,
    pub down: i32,
}

impl Default for ApproachThresholds {
    fn default() -> Self {
        Self {
            left: 20,
            right: 20,
            up: 60,
            down: 20,
        }
    }
}

/// Bullet list trimming: once `len > high_water`, the oldest `drop` bullets go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    pub high_water: usize,
    pub drop: usize,
}

impl RetentionPolicy {
    pub const fn new(high_water: usize, drop: usize) -> Self {
        Self { high_water, drop }
    }
}

/// Complete rule set for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    // === Arena ===
    pub arena_width: i32,
    pub arena_height: i32,

    // === Player ===
    pub player_radius: i32,
    pub player_speed: i32,
    /// Starting lives, also the ceiling for kill rewards
    pub lives_cap: u8,
    /// When false, lives are never lost and the run cannot end by damage
    pub track_lives: bool,
    /// Firing needs a nonzero player velocity
    pub require_motion_to_fire: bool,
    /// Start in the instructions screen and wait for the start key
    pub show_instructions: bool,

    // === Enemies ===
    pub enemy_radius: i32,
    pub enemy_speed: i32,
    pub initial_enemies: u32,
    pub enemies_per_level: u32,
    /// When false, clearing the wave ends the run instead of advancing
    pub advance_levels: bool,
    pub direction_change_interval: u64,
    pub direction_change_chance: f64,
    pub enemy_fire_interval: u64,
    pub random_fire_odds: u32,
    pub approach: ApproachThresholds,

    // === Bullets ===
    pub bullet_radius: i32,
    pub bullet_speed_factor: i32,
    pub player_bullet_retention: RetentionPolicy,
    pub enemy_bullet_retention: RetentionPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            lives_cap: LIVES_CAP,
            track_lives: true,
            require_motion_to_fire: true,
            show_instructions: true,

            enemy_radius: ENEMY_RADIUS,
            enemy_speed: ENEMY_SPEED,
            initial_enemies: INITIAL_ENEMIES,
            enemies_per_level: ENEMIES_PER_LEVEL,
            advance_levels: true,
            direction_change_interval: DIRECTION_CHANGE_INTERVAL,
            direction_change_chance: DIRECTION_CHANGE_CHANCE,
            enemy_fire_interval: ENEMY_FIRE_INTERVAL,
            random_fire_odds: RANDOM_FIRE_ODDS,
            approach: ApproachThresholds::default(),

            bullet_radius: BULLET_RADIUS,
            bullet_speed_factor: BULLET_SPEED_FACTOR,
            player_bullet_retention: RetentionPolicy::new(150, 50),
            enemy_bullet_retention: RetentionPolicy::new(1000, 100),
        }
    }
}

impl Rules {
    /// Create rules from a preset
    pub fn from_variant(variant: Variant) -> Self {
        let mut rules = Self::default();
        rules.apply_variant(variant);
        rules
    }

    /// Apply a preset on top of the current rules
    pub fn apply_variant(&mut self, variant: Variant) {
        match variant {
            Variant::Treason => {
                self.track_lives = true;
                self.advance_levels = true;
                self.show_instructions = true;
                self.require_motion_to_fire = true;
                self.enemy_bullet_retention = RetentionPolicy::new(1000, 100);
            }
            Variant::Classic => {
                self.track_lives = false;
                self.advance_levels = false;
                self.show_instructions = false;
                self.require_motion_to_fire = false;
                self.enemy_bullet_retention = RetentionPolicy::new(150, 50);
            }
        }
    }

    /// Parse and validate rules from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let rules: Rules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load and validate rules from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let rules = Self::from_json(&json)?;
        log::info!("Loaded rules from {}", path.display());
        Ok(rules)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        for (field, radius) in [
            ("player_radius", self.player_radius),
            ("enemy_radius", self.enemy_radius),
            ("bullet_radius", self.bullet_radius),
        ] {
            if radius <= 0 {
                return Err(invalid(field, format!("must be positive, got {radius}")));
            }
        }

        // Enemies spawn in `radius..=extent - radius`
        let fits = |extent: i32, radius: i32| radius.checked_mul(2).is_some_and(|d| extent > d);
        if !fits(self.arena_width, self.enemy_radius) {
            return Err(invalid("arena_width", "too narrow to place enemies"));
        }
        if !fits(self.arena_height, self.enemy_radius) {
            return Err(invalid("arena_height", "too short to place enemies"));
        }
        if !fits(self.arena_width, self.player_radius) || !fits(self.arena_height, self.player_radius) {
            return Err(invalid("arena_width", "too small for the player"));
        }

        if self.initial_enemies == 0 {
            return Err(invalid("initial_enemies", "must be at least 1"));
        }

        if self.lives_cap == 0 {
            return Err(invalid("lives_cap", "must be at least 1"));
        }
        if self.direction_change_interval == 0 {
            return Err(invalid("direction_change_interval", "must be at least 1"));
        }
        if self.enemy_fire_interval == 0 {
            return Err(invalid("enemy_fire_interval", "must be at least 1"));
        }
        if self.random_fire_odds == 0 {
            return Err(invalid("random_fire_odds", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.direction_change_chance) {
            return Err(invalid(
                "direction_change_chance",
                format!("must be within 0..=1, got {}", self.direction_change_chance),
            ));
        }

        for (field, policy) in [
            ("player_bullet_retention", self.player_bullet_retention),
            ("enemy_bullet_retention", self.enemy_bullet_retention),
        ] {
            if policy.drop == 0 || policy.drop > policy.high_water {
                return Err(invalid(field, "drop must be within 1..=high_water"));
            }
        }

        Ok(())
    }

    /// Arena extent as a vector
    pub fn arena(&self) -> glam::IVec2 {
        glam::IVec2::new(self.arena_width, self.arena_height)
    }
}
