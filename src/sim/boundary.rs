//! Arena edge handling
//!
//! The player stops dead against a wall, enemies bounce off it. Bullets fly
//! straight through and are never clamped.

use glam::IVec2;

use super::dot::{Dot, Role};

/// Apply the edge rule for `dot` inside an arena of size `arena`.
///
/// Each axis is checked on its own, so a corner touch affects both components.
pub fn apply_boundary(dot: &mut Dot, arena: IVec2) {
    let center = dot.center();
    let radius = dot.radius();
    let mut velocity = dot.velocity();

    for axis in 0..2 {
        if center[axis] <= radius || center[axis] + radius >= arena[axis] {
            match dot.role() {
                Role::Player => velocity[axis] = 0,
                Role::Enemy => velocity[axis] = -velocity[axis],
                Role::PlayerBullet | Role::EnemyBullet => {}
            }
        }
    }

    dot.set_velocity(velocity);
}
