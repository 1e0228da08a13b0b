//! Dots: the player, enemies and bullets
//!
//! Every actor in the arena is a circle with an integer center and velocity.
//! Role-specific behavior is dispatched on [`Role`].

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Palette shared by all dots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DotColor {
    Red,
    Green,
    Orange,
    White,
}

impl DotColor {
    /// Colors an enemy team can have
    pub const TEAMS: [DotColor; 3] = [DotColor::Red, DotColor::Green, DotColor::Orange];

    pub fn as_str(&self) -> &'static str {
        match self {
            DotColor::Red => "red",
            DotColor::Green => "green",
            DotColor::Orange => "orange",
            DotColor::White => "white",
        }
    }
}

/// Behavioral category of a dot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Player,
    Enemy,
    PlayerBullet,
    EnemyBullet,
}

impl Role {
    pub fn is_bullet(&self) -> bool {
        matches!(self, Role::PlayerBullet | Role::EnemyBullet)
    }
}

/// The four axis-aligned unit directions
pub const DIRECTIONS: [IVec2; 4] = [IVec2::NEG_X, IVec2::X, IVec2::NEG_Y, IVec2::Y];

/// Enemy patrol parameters used by [`Dot::advance`]
#[derive(Debug, Clone, Copy)]
pub struct RandomWalk {
    /// Direction changes are only considered on ticks divisible by this
    pub interval: u64,
    /// Probability of picking a new direction on an eligible tick
    pub chance: f64,
    /// Speed along the chosen axis
    pub speed: i32,
}

/// A circular actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DotRecord")]
pub struct Dot {
    pub id: u32,
    center: IVec2,
    velocity: IVec2,
    radius: i32,
    color: DotColor,
    outline: DotColor,
    role: Role,
    hit: bool,
}

/// Serialized form of a [`Dot`], checked on the way back in
#[derive(Deserialize)]
struct DotRecord {
    id: u32,
    center: IVec2,
    velocity: IVec2,
    radius: i32,
    color: DotColor,
    outline: DotColor,
    role: Role,
    hit: bool,
}

impl TryFrom<DotRecord> for Dot {
    type Error = String;

    fn try_from(r: DotRecord) -> Result<Self, Self::Error> {
        if r.radius <= 0 {
            return Err(format!("dot radius must be positive, got {}", r.radius));
        }
        Ok(Self {
            id: r.id,
            center: r.center,
            velocity: r.velocity,
            radius: r.radius,
            color: r.color,
            outline: r.outline,
            role: r.role,
            hit: r.hit,
        })
    }
}

impl Dot {
    /// Create a dot. Panics if `radius` is not positive.
    pub fn new(
        id: u32,
        role: Role,
        center: IVec2,
        velocity: IVec2,
        radius: i32,
        color: DotColor,
        outline: DotColor,
    ) -> Self {
        assert!(radius > 0, "dot radius must be positive, got {radius}");
        Self {
            id,
            center,
            velocity,
            radius,
            color,
            outline,
            role,
            hit: false,
        }
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        self.center
    }

    pub fn set_center(&mut self, center: IVec2) {
        self.center = center;
    }

    #[inline]
    pub fn velocity(&self) -> IVec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: IVec2) {
        self.velocity = velocity;
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn color(&self) -> DotColor {
        self.color
    }

    /// Only the player changes team; other roles keep their color
    pub fn set_color(&mut self, color: DotColor) {
        debug_assert_eq!(self.role, Role::Player, "only the player changes color");
        self.color = color;
    }

    #[inline]
    pub fn outline(&self) -> DotColor {
        self.outline
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Mark this dot as shot. There is no way back.
    pub fn mark_hit(&mut self) {
        self.hit = true;
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.center.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.center.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.center.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.center.y + self.radius
    }

    /// Move one tick.
    ///
    /// Enemies may first swap to a random axis direction on ticks where
    /// `frame % walk.interval == 0`; every other role just adds its velocity.
    pub fn advance<R: Rng + ?Sized>(&mut self, frame: u64, rng: &mut R, walk: &RandomWalk) {
        if self.role == Role::Enemy
            && frame % walk.interval == 0
            && rng.random_bool(walk.chance)
        {
            let dir = DIRECTIONS[rng.random_range(0..DIRECTIONS.len())];
            self.velocity = dir * walk.speed;
        }
        self.center += self.velocity;
    }

    /// Snapshot a bullet from this dot's current center, color and velocity
    pub fn fire(&self, id: u32, role: Role, radius: i32, speed_factor: i32) -> Dot {
        debug_assert!(role.is_bullet());
        Dot::new(
            id,
            role,
            self.center,
            self.velocity * speed_factor,
            radius,
            self.color,
            self.color,
        )
    }
}
