//! Autopilot - a bot that plays the game for headless and demo runs
//!
//! Each tick it looks at the state and emits the keys a player might press:
//! start the game, switch teams to shrug off incoming fire, line up with the
//! nearest enemy, and shoot once it is the right color.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{DIRECTIONS, Dot, DotColor, GamePhase, GameState, InputEvent, Key, TickInput};

/// Distance at which incoming enemy bullets trigger a team switch
const THREAT_RANGE: i32 = 80;
/// Ticks between shots while lined up
const FIRE_EVERY: u64 = 6;
/// 1-in-N chance per tick of a random swerve
const SWERVE_ODDS: u32 = 90;

/// Key that switches the player to `color`
pub fn color_key(color: DotColor) -> Option<Key> {
    match color {
        DotColor::Red => Some(Key::SelectColorA),
        DotColor::Orange => Some(Key::SelectColorB),
        DotColor::Green => Some(Key::SelectColorC),
        DotColor::White => None,
    }
}

/// Key that moves the player along `dir`'s dominant axis
fn direction_key(dir: IVec2) -> Option<Key> {
    if dir == IVec2::ZERO {
        return None;
    }
    Some(if dir.x.abs() >= dir.y.abs() {
        if dir.x < 0 { Key::Left } else { Key::Right }
    } else if dir.y < 0 {
        Key::Up
    } else {
        Key::Down
    })
}

/// Seeded scripted player
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Decide this tick's input
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();
        match state.phase {
            GamePhase::Instructions => {
                input.push_key(Key::Start);
                return input;
            }
            GamePhase::GameOver => return input,
            GamePhase::Playing => {}
        }

        let player = &state.player;

        // Take the color of the closest incoming bullet so it passes harmlessly
        let threat = nearest_threat(state);
        if let Some(bullet) = threat {
            if bullet.color() != player.color() {
                input.events.extend(color_key(bullet.color()).map(InputEvent::KeyPressed));
            }
        }

        let Some(target) = nearest_enemy(state) else {
            return input;
        };

        let delta = target.center() - player.center();
        let reach = player.radius() + target.radius();
        let lined_up_x = delta.y.abs() <= reach;
        let lined_up_y = delta.x.abs() <= reach;

        let heading = if self.rng.random_ratio(1, SWERVE_ODDS) {
            DIRECTIONS[self.rng.random_range(0..DIRECTIONS.len())]
        } else if lined_up_x {
            IVec2::new(delta.x.signum(), 0)
        } else if lined_up_y {
            IVec2::new(0, delta.y.signum())
        } else if delta.x.abs() < delta.y.abs() {
            // Close the shorter gap first to line up sooner
            IVec2::new(delta.x.signum(), 0)
        } else {
            IVec2::new(0, delta.y.signum())
        };

        if let Some(key) = direction_key(heading) {
            input.push_key(key);
        }

        let facing = direction_key(heading) == direction_key(player.velocity());
        if (lined_up_x || lined_up_y) && facing && state.frame_counter % FIRE_EVERY == 0 {
            if target.color() != player.color() && threat.is_none() {
                input.events.extend(color_key(target.color()).map(InputEvent::KeyPressed));
            }
            input.push_key(Key::Fire);
        }

        input
    }
}

fn nearest_enemy(state: &GameState) -> Option<&Dot> {
    let from = state.player.center();
    state
        .enemies
        .iter()
        .filter(|e| !e.is_hit())
        .min_by_key(|e| (e.center() - from).length_squared())
}

fn nearest_threat(state: &GameState) -> Option<&Dot> {
    let from = state.player.center();
    state
        .enemy_bullets
        .iter()
        .filter(|b| !b.is_hit())
        .filter(|b| {
            let to_player = from - b.center();
            to_player.abs().max_element() <= THREAT_RANGE && to_player.dot(b.velocity()) > 0
        })
        .min_by_key(|b| (b.center() - from).length_squared())
}
