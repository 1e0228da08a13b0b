//! Overlap tests and hit resolution
//!
//! Dots are circles, but overlap is judged on their bounding boxes: two dots
//! touch when their spans overlap on both axes. Corners of the boxes count as
//! contact even where the circles would miss.

use super::dot::{Dot, Role};

/// Axis selector for span checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// True when `other`'s span on `axis` overlaps `this`'s span (edges inclusive)
#[inline]
pub fn spans_overlap(this: &Dot, other: &Dot, axis: Axis) -> bool {
    let i = axis.index();
    let (a, ar) = (this.center()[i], this.radius());
    let (b, br) = (other.center()[i], other.radius());
    b + br >= a - ar && b - br <= a + ar
}

/// Bounding-box overlap between two dots
#[inline]
pub fn overlaps(this: &Dot, other: &Dot) -> bool {
    spans_overlap(this, other, Axis::X) && spans_overlap(this, other, Axis::Y)
}

/// What a bullet did to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// No contact, or one side was already out of play
    Miss,
    /// Same-colored enemy shot down; `rewarded` if a life was granted
    EnemyKilled { rewarded: bool },
    /// Player struck by an off-color bullet
    PlayerHurt,
    /// Contact without effect on the target (the bullet is still spent)
    Absorbed,
}

/// Resolve a single bullet against a target.
///
/// `lives` stays within `0..=cap`: kill rewards only apply below the cap and
/// damage floors at zero. Pass `None` when lives are not tracked; kills and
/// hits still resolve but nothing is counted. The bullet is spent whenever it
/// touches a target that was still in play.
pub fn resolve_hit(
    bullet: &mut Dot,
    target: &mut Dot,
    lives: Option<&mut u8>,
    cap: u8,
) -> HitOutcome {
    debug_assert!(bullet.role().is_bullet());

    if bullet.is_hit() || target.is_hit() || !overlaps(bullet, target) {
        return HitOutcome::Miss;
    }

    let outcome = match (bullet.role(), target.role()) {
        (Role::PlayerBullet, Role::Enemy) if bullet.color() == target.color() => {
            target.mark_hit();
            let rewarded = match lives {
                Some(lives) if *lives < cap => {
                    *lives += 1;
                    true
                }
                _ => false,
            };
            HitOutcome::EnemyKilled { rewarded }
        }
        (Role::PlayerBullet | Role::EnemyBullet, Role::Player)
            if bullet.color() != target.color() =>
        {
            if let Some(lives) = lives {
                *lives = lives.saturating_sub(1);
            }
            HitOutcome::PlayerHurt
        }
        _ => HitOutcome::Absorbed,
    };

    bullet.mark_hit();
    outcome
}
