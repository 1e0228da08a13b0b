//! Platform layer for native runs
//!
//! Handles what the simulation deliberately knows nothing about:
//! - Tick pacing against the wall clock
//! - Scripted input for headless/demo sessions

pub mod autopilot;
pub mod time;

pub use autopilot::Autopilot;
pub use time::TickPacer;
