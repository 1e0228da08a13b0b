//! Game state and core simulation types
//!
//! Everything needed to replay a session deterministically lives here,
//! including the RNG.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::dot::{DIRECTIONS, Dot, DotColor, Role};
use crate::settings::Rules;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Rules screen, waiting for the start key
    Instructions,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    AllEnemiesEliminated,
    LivesExhausted,
}

/// Notable things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    PlayerFired,
    EnemyFired { id: u32 },
    EnemyKilled { id: u32, rewarded: bool },
    PlayerHurt { lives: u8 },
    LevelAdvanced { level: u32 },
    GameOver { reason: GameOverReason },
    BulletsTrimmed { role: Role, removed: usize },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rules: Rules,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub game_over_reason: Option<GameOverReason>,
    /// Set when the front end asked to close
    pub close_requested: bool,
    pub level: u32,
    pub lives: u8,
    /// Size of the current enemy batch
    pub enemy_count: u32,
    /// Simulation tick counter
    pub frame_counter: u64,
    pub player: Dot,
    /// Current wave; shot enemies stay until the wave is replaced
    pub enemies: Vec<Dot>,
    /// Spawn order, oldest first
    pub player_bullets: Vec<Dot>,
    /// Spawn order, oldest first
    pub enemy_bullets: Vec<Dot>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given rules and seed
    pub fn new(rules: Rules, seed: u64) -> Self {
        let center = rules.arena() / 2;
        let player = Dot::new(
            0,
            Role::Player,
            center,
            IVec2::ZERO,
            rules.player_radius,
            DotColor::Red,
            DotColor::White,
        );
        let phase = if rules.show_instructions {
            GamePhase::Instructions
        } else {
            GamePhase::Playing
        };

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase,
            game_over_reason: None,
            close_requested: false,
            level: 1,
            lives: rules.lives_cap,
            enemy_count: rules.initial_enemies,
            frame_counter: 0,
            player,
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            rules,
        };
        state.spawn_wave();

        log::info!(
            "New session: seed={}, arena={}x{}, enemies={}",
            seed,
            state.rules.arena_width,
            state.rules.arena_height,
            state.enemy_count
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the enemy batch with `enemy_count` fresh enemies
    pub fn spawn_wave(&mut self) {
        let radius = self.rules.enemy_radius;
        let speed = self.rules.enemy_speed;
        let (w, h) = (self.rules.arena_width, self.rules.arena_height);

        self.enemies.clear();
        for _ in 0..self.enemy_count {
            let color = DotColor::TEAMS[self.rng.random_range(0..DotColor::TEAMS.len())];
            let x = self.rng.random_range(radius..=w - radius);
            let y = self.rng.random_range(radius..=h - radius);
            let dir = DIRECTIONS[self.rng.random_range(0..DIRECTIONS.len())];
            let id = self.next_entity_id();
            self.enemies.push(Dot::new(
                id,
                Role::Enemy,
                IVec2::new(x, y),
                dir * speed,
                radius,
                color,
                color,
            ));
        }
    }

    /// True once every enemy in the current wave has been shot
    pub fn wave_cleared(&self) -> bool {
        self.enemies.iter().all(Dot::is_hit)
    }

    /// Enemies still in play
    pub fn enemies_remaining(&self) -> usize {
        self.enemies.iter().filter(|e| !e.is_hit()).count()
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Enter the terminal phase
    pub fn end(&mut self, reason: GameOverReason) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason);
        self.events.push(GameEvent::GameOver { reason });
        log::info!(
            "Game over ({:?}) at level {} after {} ticks",
            reason,
            self.level,
            self.frame_counter
        );
    }
}
