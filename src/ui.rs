//! Frame description for rendering front ends
//!
//! The simulation never draws. Once per tick a front end asks for a [`Frame`]:
//! the dots still in play, in draw order, plus the text overlays to show.

use glam::IVec2;
use serde::Serialize;

use crate::sim::{Dot, DotColor, GameOverReason, GamePhase, GameState};

/// A circle to draw: filled with `fill`, ringed with `outline`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawDot {
    pub center: IVec2,
    pub radius: i32,
    pub fill: DotColor,
    pub outline: DotColor,
}

impl From<&Dot> for DrawDot {
    fn from(dot: &Dot) -> Self {
        Self {
            center: dot.center(),
            radius: dot.radius(),
            fill: dot.color(),
            outline: dot.outline(),
        }
    }
}

/// Text the front end should render with its own fonts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Overlay {
    /// Title plus rules, centered in the upper half
    Instructions { title: String, lines: Vec<String> },
    /// Level and lives readout, top-left. `lives` is `None` when not tracked.
    Hud { level: u32, lives: Option<u8> },
    /// Centered banner
    GameOver { headline: String, reason: String },
}

/// Everything a front end needs to present one tick
#[derive(Debug, Clone, Default, Serialize)]
pub struct Frame {
    pub dots: Vec<DrawDot>,
    pub overlays: Vec<Overlay>,
}

/// Build the frame for the current state
pub fn build_frame(state: &GameState) -> Frame {
    let mut frame = Frame::default();

    if state.phase == GamePhase::Instructions {
        frame.overlays.push(instructions(state));
        return frame;
    }

    // Player, player bullets, enemies, enemy bullets
    let live = std::iter::once(&state.player)
        .chain(&state.player_bullets)
        .chain(&state.enemies)
        .chain(&state.enemy_bullets)
        .filter(|d| !d.is_hit());
    frame.dots.extend(live.map(DrawDot::from));

    frame.overlays.push(Overlay::Hud {
        level: state.level,
        lives: state.rules.track_lives.then_some(state.lives),
    });

    if let Some(reason) = state.game_over_reason {
        frame.overlays.push(Overlay::GameOver {
            headline: "GAME OVER".to_string(),
            reason: reason_text(reason, state.rules.lives_cap),
        });
    }

    frame
}

/// Banner subtitle for a finished run
pub fn reason_text(reason: GameOverReason, lives_cap: u8) -> String {
    match reason {
        GameOverReason::AllEnemiesEliminated => "successfully back-stabbed".to_string(),
        GameOverReason::LivesExhausted => format!("all {lives_cap} lives gone"),
    }
}

/// One-line HUD text
pub fn hud_text(level: u32, lives: Option<u8>) -> String {
    match lives {
        Some(lives) => format!("LEVEL {level}      lives: {lives}"),
        None => format!("LEVEL {level}"),
    }
}

fn instructions(state: &GameState) -> Overlay {
    let mut lines = vec![
        "you can only kill your own team".to_string(),
        "only other teams can kill you".to_string(),
        "change teams with the three color keys".to_string(),
        "use the arrow keys to move".to_string(),
        "use the fire key to shoot".to_string(),
    ];
    if state.rules.track_lives {
        lines.push(format!("you have {} lives", state.rules.lives_cap));
    }
    lines.push("press start to begin".to_string());

    Overlay::Instructions {
        title: "Welcome to Treason:".to_string(),
        lines,
    }
}
