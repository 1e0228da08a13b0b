//! Treason - a single-player arcade shooter where you can only kill your own team
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, game state)
//! - `ui`: Per-frame draw list and text overlays for a rendering front end
//! - `platform`: Native tick pacing and the headless autopilot
//! - `settings`: Data-driven game rules

pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{Rules, SettingsError, Variant};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE_HZ: u32 = 60;

    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: i32 = 1000;
    pub const ARENA_HEIGHT: i32 = 800;

    /// Player defaults
    pub const PLAYER_RADIUS: i32 = 10;
    pub const PLAYER_SPEED: i32 = 4;
    /// Starting (and maximum) number of lives
    pub const LIVES_CAP: u8 = 9;

    /// Enemy defaults
    pub const ENEMY_RADIUS: i32 = 9;
    pub const ENEMY_SPEED: i32 = 3;
    /// Size of the first enemy wave
    pub const INITIAL_ENEMIES: u32 = 11;
    /// Extra enemies added per level
    pub const ENEMIES_PER_LEVEL: u32 = 5;
    /// Enemies may change direction only on ticks divisible by this
    pub const DIRECTION_CHANGE_INTERVAL: u64 = 60;
    /// Chance an enemy picks a new direction on an eligible tick (6 in 11)
    pub const DIRECTION_CHANGE_CHANCE: f64 = 6.0 / 11.0;
    /// Aligned enemies fire only on ticks divisible by this
    pub const ENEMY_FIRE_INTERVAL: u64 = 10;
    /// Each live enemy fires at random with probability 1 / RANDOM_FIRE_ODDS per tick
    pub const RANDOM_FIRE_ODDS: u32 = 501;

    /// Bullet defaults
    pub const BULLET_RADIUS: i32 = 5;
    /// Bullet velocity = firer velocity * this
    pub const BULLET_SPEED_FACTOR: i32 = 3;

    /// Outline ring width used by front ends
    pub const OUTLINE_WIDTH: i32 = 3;
}
