//! Enemy line-of-fire check
//!
//! An enemy only shoots at what is in front of it: the target must sit inside
//! a short band ahead of the enemy's leading edge, not be behind it, line up on
//! the perpendicular axis, and wear a different color.

use super::collision::{Axis, spans_overlap};
use super::dot::{Dot, Role};
use crate::settings::ApproachThresholds;

/// Returns true if `enemy` is moving toward `other` and should open fire.
///
/// Idle, already-shot and non-enemy dots never fire.
pub fn should_fire(enemy: &Dot, other: &Dot, bands: &ApproachThresholds) -> bool {
    if enemy.role() != Role::Enemy || enemy.is_hit() || other.color() == enemy.color() {
        return false;
    }

    let v = enemy.velocity();

    // Moving left: target's right edge inside the band past our left edge
    if v.x < 0
        && other.right() > enemy.left() - bands.left
        && enemy.right() > other.right()
        && spans_overlap(enemy, other, Axis::Y)
    {
        return true;
    }

    if v.x > 0
        && other.left() < enemy.right() + bands.right
        && enemy.left() < other.left()
        && spans_overlap(enemy, other, Axis::Y)
    {
        return true;
    }

    if v.y < 0
        && other.bottom() > enemy.top() - bands.up
        && enemy.bottom() > other.bottom()
        && spans_overlap(enemy, other, Axis::X)
    {
        return true;
    }

    v.y > 0
        && other.top() < enemy.bottom() + bands.down
        && enemy.top() < other.top()
        && spans_overlap(enemy, other, Axis::X)
}
