//! Logical input events fed to the simulation once per tick

use serde::{Deserialize, Serialize};

/// Logical keys; front ends map their physical keys onto these
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    /// Switch to the red team
    SelectColorA,
    /// Switch to the orange team
    SelectColorB,
    /// Switch to the green team
    SelectColorC,
    Start,
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    CloseRequested,
    KeyPressed(Key),
}

/// Input collected for a single tick, applied in order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn keys(keys: &[Key]) -> Self {
        Self {
            events: keys.iter().copied().map(InputEvent::KeyPressed).collect(),
        }
    }

    pub fn push_key(&mut self, key: Key) {
        self.events.push(InputEvent::KeyPressed(key));
    }
}
