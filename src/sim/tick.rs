//! Fixed-rate simulation tick
//!
//! Core game loop that advances the session by one frame. The order of steps
//! is fixed: input, collisions, bullet pruning, motion and enemy fire, then
//! the level and lives checks.

use glam::IVec2;
use rand::Rng;

use super::boundary::apply_boundary;
use super::collision::{HitOutcome, resolve_hit};
use super::dot::{DotColor, RandomWalk, Role};
use super::input::{InputEvent, Key, TickInput};
use super::state::{GameEvent, GameOverReason, GamePhase, GameState};
use super::targeting::should_fire;
use crate::settings::RetentionPolicy;

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    for event in &input.events {
        apply_input(state, *event);
    }

    if state.phase == GamePhase::Playing {
        resolve_collisions(state);
    }

    prune_bullets(state);

    if state.phase == GamePhase::GameOver {
        return;
    }

    if state.phase == GamePhase::Playing {
        advance_entities(state);
        check_wave(state);
    }

    state.frame_counter += 1;

    if state.rules.track_lives && state.lives == 0 {
        state.end(GameOverReason::LivesExhausted);
    }
}

/// Apply one input event
pub fn apply_input(state: &mut GameState, event: InputEvent) {
    let key = match event {
        InputEvent::CloseRequested => {
            state.close_requested = true;
            return;
        }
        InputEvent::KeyPressed(key) => key,
    };

    if key == Key::Start && state.phase == GamePhase::Instructions {
        state.phase = GamePhase::Playing;
        state.events.push(GameEvent::Started);
        log::info!("Session started");
        return;
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    let speed = state.rules.player_speed;
    match key {
        Key::Up => state.player.set_velocity(IVec2::new(0, -speed)),
        Key::Down => state.player.set_velocity(IVec2::new(0, speed)),
        Key::Left => state.player.set_velocity(IVec2::new(-speed, 0)),
        Key::Right => state.player.set_velocity(IVec2::new(speed, 0)),
        Key::Fire => fire_player_bullet(state),
        Key::SelectColorA => state.player.set_color(DotColor::Red),
        Key::SelectColorB => state.player.set_color(DotColor::Orange),
        Key::SelectColorC => state.player.set_color(DotColor::Green),
        Key::Start => {}
    }
}

fn fire_player_bullet(state: &mut GameState) {
    if state.rules.require_motion_to_fire && state.player.velocity() == IVec2::ZERO {
        return;
    }
    let id = state.next_entity_id();
    let bullet = state.player.fire(
        id,
        Role::PlayerBullet,
        state.rules.bullet_radius,
        state.rules.bullet_speed_factor,
    );
    state.player_bullets.push(bullet);
    state.events.push(GameEvent::PlayerFired);
}

/// Player bullets against enemies, then enemy bullets against the player.
/// Lives only change when the rules track them.
pub fn resolve_collisions(state: &mut GameState) {
    let cap = state.rules.lives_cap;
    let track = state.rules.track_lives;

    for bullet in state.player_bullets.iter_mut() {
        for enemy in state.enemies.iter_mut() {
            if let HitOutcome::EnemyKilled { rewarded } =
                resolve_hit(bullet, enemy, track.then_some(&mut state.lives), cap)
            {
                log::debug!("Enemy {} shot by bullet {}", enemy.id, bullet.id);
                state.events.push(GameEvent::EnemyKilled {
                    id: enemy.id,
                    rewarded,
                });
            }
        }
    }

    for bullet in state.enemy_bullets.iter_mut() {
        let outcome = resolve_hit(
            bullet,
            &mut state.player,
            track.then_some(&mut state.lives),
            cap,
        );
        if outcome == HitOutcome::PlayerHurt && track {
            log::debug!("Player hit by bullet {}, lives={}", bullet.id, state.lives);
            state.events.push(GameEvent::PlayerHurt { lives: state.lives });
        }
    }
}

/// Drop spent bullets, then trim the oldest ones past the high-water mark
pub fn prune_bullets(state: &mut GameState) {
    state.player_bullets.retain(|b| !b.is_hit());
    state.enemy_bullets.retain(|b| !b.is_hit());

    let trims = [
        (
            Role::PlayerBullet,
            trim_oldest(&mut state.player_bullets, state.rules.player_bullet_retention),
        ),
        (
            Role::EnemyBullet,
            trim_oldest(&mut state.enemy_bullets, state.rules.enemy_bullet_retention),
        ),
    ];
    for (role, removed) in trims {
        if removed > 0 {
            log::debug!("Trimmed {} oldest {:?} entries", removed, role);
            state.events.push(GameEvent::BulletsTrimmed { role, removed });
        }
    }
}

/// Remove the oldest `policy.drop` items once `items.len() > policy.high_water`.
/// Returns how many were removed.
pub fn trim_oldest<T>(items: &mut Vec<T>, policy: RetentionPolicy) -> usize {
    if items.len() <= policy.high_water {
        return 0;
    }
    let removed = policy.drop.min(items.len());
    items.drain(..removed);
    removed
}

/// Move everything, let enemies shoot
fn advance_entities(state: &mut GameState) {
    let frame = state.frame_counter;
    let arena = state.rules.arena();
    let walk = RandomWalk {
        interval: state.rules.direction_change_interval,
        chance: state.rules.direction_change_chance,
        speed: state.rules.enemy_speed,
    };

    state.player.advance(frame, &mut state.rng, &walk);
    apply_boundary(&mut state.player, arena);

    for bullet in state.player_bullets.iter_mut() {
        bullet.advance(frame, &mut state.rng, &walk);
    }

    let fire_tick = frame % state.rules.enemy_fire_interval == 0;
    let mut shooters = Vec::new();
    for (index, enemy) in state.enemies.iter_mut().enumerate() {
        if enemy.is_hit() {
            continue;
        }
        enemy.advance(frame, &mut state.rng, &walk);
        apply_boundary(enemy, arena);

        let aimed = fire_tick && should_fire(enemy, &state.player, &state.rules.approach);
        if aimed {
            shooters.push(index);
        }
        if state.rng.random_ratio(1, state.rules.random_fire_odds) {
            shooters.push(index);
        }
    }

    for index in shooters {
        let id = state.next_entity_id();
        let enemy = &state.enemies[index];
        let bullet = enemy.fire(
            id,
            Role::EnemyBullet,
            state.rules.bullet_radius,
            state.rules.bullet_speed_factor,
        );
        state.events.push(GameEvent::EnemyFired { id: enemy.id });
        state.enemy_bullets.push(bullet);
    }

    for bullet in state.enemy_bullets.iter_mut() {
        bullet.advance(frame, &mut state.rng, &walk);
    }
}

/// Advance the level or end the run once the wave is gone
fn check_wave(state: &mut GameState) {
    if !state.wave_cleared() {
        return;
    }

    if !state.rules.advance_levels {
        state.end(GameOverReason::AllEnemiesEliminated);
        return;
    }

    state.level += 1;
    state.lives = state.rules.lives_cap;
    state.enemy_count += state.rules.enemies_per_level;
    state.spawn_wave();
    state.enemy_bullets.clear();
    state.events.push(GameEvent::LevelAdvanced { level: state.level });
    log::info!("Level {}: {} enemies", state.level, state.enemy_count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Rules, Variant};
    use crate::sim::dot::Dot;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(Rules::default(), seed);
        tick(&mut state, &TickInput::keys(&[Key::Start]));
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    /// Quiet session: no random fire, no direction changes
    fn quiet(seed: u64) -> GameState {
        let mut rules = Rules::default();
        rules.random_fire_odds = u32::MAX;
        rules.direction_change_chance = 0.0;
        rules.show_instructions = false;
        GameState::new(rules, seed)
    }

    fn enemy_at(state: &mut GameState, x: i32, y: i32, velocity: IVec2, color: DotColor) -> Dot {
        let id = state.next_entity_id();
        Dot::new(id, Role::Enemy, IVec2::new(x, y), velocity, 9, color, color)
    }

    #[test]
    fn test_instructions_to_playing() {
        let mut state = GameState::new(Rules::default(), 12345);
        assert_eq!(state.phase, GamePhase::Instructions);

        // Movement is ignored before start
        tick(&mut state, &TickInput::keys(&[Key::Left]));
        assert_eq!(state.phase, GamePhase::Instructions);
        assert_eq!(state.player.velocity(), IVec2::ZERO);
        assert_eq!(state.frame_counter, 1);

        tick(&mut state, &TickInput::keys(&[Key::Start]));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.contains(&GameEvent::Started));
    }

    #[test]
    fn test_direction_and_color_keys() {
        let mut state = playing(1);
        tick(&mut state, &TickInput::keys(&[Key::Up, Key::SelectColorC]));
        assert_eq!(state.player.velocity(), IVec2::new(0, -4));
        assert_eq!(state.player.color(), DotColor::Green);
        assert_eq!(state.player.center(), IVec2::new(500, 396));

        tick(&mut state, &TickInput::keys(&[Key::Right, Key::SelectColorB]));
        assert_eq!(state.player.velocity(), IVec2::new(4, 0));
        assert_eq!(state.player.color(), DotColor::Orange);

        tick(&mut state, &TickInput::keys(&[Key::SelectColorA]));
        assert_eq!(state.player.color(), DotColor::Red);
    }

    #[test]
    fn test_fire_requires_motion() {
        let mut state = playing(1);
        tick(&mut state, &TickInput::keys(&[Key::Fire]));
        assert!(state.player_bullets.is_empty());
        assert!(!state.events.contains(&GameEvent::PlayerFired));
    }

    #[test]
    fn test_classic_fires_at_rest() {
        let mut state = GameState::new(Rules::from_variant(Variant::Classic), 1);
        apply_input(&mut state, InputEvent::KeyPressed(Key::Fire));
        assert_eq!(state.player_bullets.len(), 1);
        assert_eq!(state.player_bullets[0].velocity(), IVec2::ZERO);
    }

    #[test]
    fn test_fire_while_moving() {
        let mut state = playing(1);
        apply_input(&mut state, InputEvent::KeyPressed(Key::Left));
        apply_input(&mut state, InputEvent::KeyPressed(Key::Fire));
        let bullet = &state.player_bullets[0];
        assert_eq!(bullet.role(), Role::PlayerBullet);
        assert_eq!(bullet.velocity(), IVec2::new(-12, 0));
        assert_eq!(bullet.center(), state.player.center());
        assert_eq!(bullet.radius(), 5);
    }

    #[test]
    fn test_close_request() {
        let mut state = playing(1);
        tick(&mut state, &TickInput { events: vec![InputEvent::CloseRequested] });
        assert!(state.close_requested);
    }

    #[test]
    fn test_trim_oldest() {
        let mut items: Vec<u32> = (0..151).collect();
        let removed = trim_oldest(&mut items, RetentionPolicy::new(150, 50));
        assert_eq!(removed, 50);
        assert_eq!(items.len(), 101);
        assert_eq!(items[0], 50);

        let mut items: Vec<u32> = (0..150).collect();
        assert_eq!(trim_oldest(&mut items, RetentionPolicy::new(150, 50)), 0);
        assert_eq!(items.len(), 150);
    }

    #[test]
    fn test_player_bullet_retention() {
        let mut state = quiet(3);
        for _ in 0..151 {
            let id = state.next_entity_id();
            let mut bullet = state.player.fire(id, Role::PlayerBullet, 5, 3);
            bullet.set_velocity(IVec2::ZERO);
            state.player_bullets.push(bullet);
        }
        let oldest_kept = state.player_bullets[50].id;

        prune_bullets(&mut state);
        assert_eq!(state.player_bullets.len(), 101);
        assert_eq!(state.player_bullets[0].id, oldest_kept);
        assert!(state.events.contains(&GameEvent::BulletsTrimmed {
            role: Role::PlayerBullet,
            removed: 50
        }));
    }

    #[test]
    fn test_kill_same_color_enemy() {
        let mut state = quiet(5);
        state.lives = 4;
        state.enemies.clear();
        let target = enemy_at(&mut state, 600, 400, IVec2::ZERO, DotColor::Red);
        let bystander = enemy_at(&mut state, 100, 100, IVec2::ZERO, DotColor::Green);
        let target_id = target.id;
        state.enemies.push(target);
        state.enemies.push(bystander);

        let id = state.next_entity_id();
        let mut bullet = state.player.fire(id, Role::PlayerBullet, 5, 3);
        bullet.set_center(IVec2::new(595, 400));
        state.player_bullets.push(bullet);

        tick(&mut state, &TickInput::default());
        assert!(state.enemies[0].is_hit());
        assert!(!state.enemies[1].is_hit());
        assert_eq!(state.lives, 5);
        assert!(state.player_bullets.is_empty());
        assert!(state.events.contains(&GameEvent::EnemyKilled {
            id: target_id,
            rewarded: true
        }));
    }

    #[test]
    fn test_enemy_bullet_hurts_player() {
        let mut state = quiet(5);
        state.lives = 2;
        let mut shooter = enemy_at(&mut state, 10, 10, IVec2::ZERO, DotColor::Green);
        shooter.set_center(state.player.center());
        let id = state.next_entity_id();
        state.enemy_bullets.push(shooter.fire(id, Role::EnemyBullet, 5, 3));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 1);
        assert!(state.enemy_bullets.is_empty());
        assert!(state.events.contains(&GameEvent::PlayerHurt { lives: 1 }));
    }

    #[test]
    fn test_lives_exhausted_ends_run() {
        let mut state = quiet(5);
        state.lives = 1;
        let mut shooter = enemy_at(&mut state, 10, 10, IVec2::ZERO, DotColor::Orange);
        shooter.set_center(state.player.center());
        let id = state.next_entity_id();
        state.enemy_bullets.push(shooter.fire(id, Role::EnemyBullet, 5, 3));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_reason, Some(GameOverReason::LivesExhausted));

        // Frozen afterwards
        let frame = state.frame_counter;
        let center = state.player.center();
        tick(&mut state, &TickInput::keys(&[Key::Left, Key::Start]));
        assert_eq!(state.frame_counter, frame);
        assert_eq!(state.player.center(), center);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_level_advance() {
        let mut state = quiet(8);
        state.lives = 3;
        for enemy in &mut state.enemies {
            enemy.mark_hit();
        }
        let id = state.next_entity_id();
        let shooter = enemy_at(&mut state, 50, 50, IVec2::new(3, 0), DotColor::Green);
        state.enemy_bullets.push(shooter.fire(id, Role::EnemyBullet, 5, 3));
        let id = state.next_entity_id();
        state.player_bullets.push(Dot::new(
            id,
            Role::PlayerBullet,
            IVec2::new(-500, -500),
            IVec2::ZERO,
            5,
            DotColor::Red,
            DotColor::Red,
        ));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.level, 2);
        assert_eq!(state.lives, 9);
        assert_eq!(state.enemies.len(), 16);
        assert!(state.enemies.iter().all(|e| !e.is_hit()));
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.player_bullets.len(), 1);
        assert!(state.events.contains(&GameEvent::LevelAdvanced { level: 2 }));
    }

    #[test]
    fn test_no_advance_while_enemy_alive() {
        let mut state = quiet(8);
        for enemy in state.enemies.iter_mut().skip(1) {
            enemy.mark_hit();
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.level, 1);
        assert_eq!(state.enemies.len(), 11);
    }

    #[test]
    fn test_classic_clear_ends_run() {
        let mut state = GameState::new(Rules::from_variant(Variant::Classic), 8);
        for enemy in &mut state.enemies {
            enemy.mark_hit();
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            state.game_over_reason,
            Some(GameOverReason::AllEnemiesEliminated)
        );
    }

    #[test]
    fn test_aligned_enemy_fires_on_interval() {
        let mut state = quiet(11);
        state.enemies.clear();
        state.player.set_color(DotColor::Green);
        // Enemy 40px right of the player, heading left; still in its band at frame 10
        let enemy = enemy_at(&mut state, 540, 400, IVec2::new(-3, 0), DotColor::Red);
        let enemy_id = enemy.id;
        state.enemies.push(enemy);

        // frame 0 is a fire tick
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemy_bullets.len(), 1);
        let bullet = &state.enemy_bullets[0];
        assert_eq!(bullet.color(), DotColor::Red);
        assert_eq!(bullet.velocity(), IVec2::new(-9, 0));
        assert!(state.events.contains(&GameEvent::EnemyFired { id: enemy_id }));

        // frames 1..=9 are not; the enemy keeps closing in but holds fire
        for frame in 1..=9 {
            tick(&mut state, &TickInput::default());
            assert!(
                !state.events.iter().any(|e| matches!(e, GameEvent::EnemyFired { .. })),
                "fired on frame {frame}"
            );
        }

        tick(&mut state, &TickInput::default());
        assert_eq!(state.frame_counter, 11);
        assert!(state.events.contains(&GameEvent::EnemyFired { id: enemy_id }));
    }

    #[test]
    fn test_random_fire_skips_shot_enemies() {
        let mut rules = Rules::default();
        rules.random_fire_odds = 1;
        rules.direction_change_chance = 0.0;
        rules.show_instructions = false;
        let mut state = GameState::new(rules, 21);
        state.enemies[0].mark_hit();
        let shot_id = state.enemies[0].id;
        // Off the fire interval, so only random shots go out
        state.frame_counter = 1;

        tick(&mut state, &TickInput::default());
        let fired: Vec<u32> = state
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::EnemyFired { id } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(fired.len(), state.enemies.len() - 1);
        assert!(!fired.contains(&shot_id));
        assert_eq!(state.enemy_bullets.len(), fired.len());
    }

    #[test]
    fn test_untracked_lives_ignore_hits_and_kills() {
        let mut rules = Rules::from_variant(Variant::Classic);
        rules.random_fire_odds = u32::MAX;
        rules.direction_change_chance = 0.0;
        let mut state = GameState::new(rules, 5);
        state.lives = 4;

        let mut shooter = enemy_at(&mut state, 10, 10, IVec2::ZERO, DotColor::Green);
        shooter.set_center(state.player.center());
        let id = state.next_entity_id();
        state.enemy_bullets.push(shooter.fire(id, Role::EnemyBullet, 5, 3));

        state.enemies.clear();
        let target = enemy_at(&mut state, 600, 400, IVec2::ZERO, DotColor::Red);
        let bystander = enemy_at(&mut state, 100, 100, IVec2::ZERO, DotColor::Green);
        let target_id = target.id;
        state.enemies.push(target);
        state.enemies.push(bystander);
        let id = state.next_entity_id();
        let mut bullet = state.player.fire(id, Role::PlayerBullet, 5, 3);
        bullet.set_center(IVec2::new(595, 400));
        state.player_bullets.push(bullet);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 4);
        assert!(state.enemy_bullets.is_empty());
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::PlayerHurt { .. })));
        assert!(state.events.contains(&GameEvent::EnemyKilled {
            id: target_id,
            rewarded: false
        }));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_hit_enemies_stay_put() {
        let mut state = quiet(2);
        state.enemies[0].mark_hit();
        let before = state.enemies[0].center();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies[0].center(), before);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(99999);
        let mut b = playing(99999);
        let inputs = [
            TickInput::keys(&[Key::Left]),
            TickInput::keys(&[Key::Fire, Key::SelectColorC]),
            TickInput::default(),
            TickInput::keys(&[Key::Down, Key::Fire]),
        ];
        for _ in 0..120 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.frame_counter, b.frame_counter);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.player_bullets, b.player_bullets);
        assert_eq!(a.enemy_bullets, b.enemy_bullets);
        assert_eq!(a.lives, b.lives);
    }
}
