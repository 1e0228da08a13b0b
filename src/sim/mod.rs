//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only, carried in the state
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod boundary;
pub mod collision;
pub mod dot;
pub mod input;
pub mod state;
pub mod targeting;
pub mod tick;

pub use boundary::apply_boundary;
pub use collision::{Axis, HitOutcome, overlaps, resolve_hit, spans_overlap};
pub use dot::{DIRECTIONS, Dot, DotColor, RandomWalk, Role};
pub use input::{InputEvent, Key, TickInput};
pub use state::{GameEvent, GameOverReason, GamePhase, GameState};
pub use targeting::should_fire;
pub use tick::{apply_input, prune_bullets, resolve_collisions, tick, trim_oldest};
