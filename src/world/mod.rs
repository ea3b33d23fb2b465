//! Static match geometry: field bounds, hoop, start position, invisible walls

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::helpers::{Aabb, point_within_radius};

/// Lateral half of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn flipped(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "Left"),
            Side::Right => write!(f, "Right"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Side::Left),
            "right" | "r" => Ok(Side::Right),
            other => Err(format!("Unknown side '{}' (expected left or right)", other)),
        }
    }
}

/// Scoring target: a fixed point plus acceptance radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hoop {
    pub center: Vec2,
    pub radius: f32,
}

impl Default for Hoop {
    fn default() -> Self {
        Self {
            center: HOOP_CENTER,
            radius: HOOP_ACCEPTANCE_RADIUS,
        }
    }
}

impl Hoop {
    pub fn accepts(&self, point: Vec2) -> bool {
        point_within_radius(point, self.center, self.radius)
    }
}

/// Everything the core reads about the playfield. Never mutated by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub hoop: Hoop,
    /// Canonical player start (rectangle center)
    pub start: Vec2,
    /// Invisible walls the host movement component may not enter
    #[serde(default)]
    pub walls: Vec<Aabb>,
}

impl Default for Arena {
    fn default() -> Self {
        // Post hangs from the hoop down toward the first lane
        let post = Aabb::new(
            Vec2::new(
                HOOP_CENTER.x - HOOP_POST_SIZE.x / 2.0,
                HOOP_CENTER.y + HOOP_ACCEPTANCE_RADIUS,
            ),
            HOOP_POST_SIZE,
        );
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            hoop: Hoop::default(),
            start: PLAYER_START,
            walls: vec![post],
        }
    }
}

impl Arena {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    /// Rectangle covering one lateral half of the field
    pub fn half_bounds(&self, side: Side) -> Aabb {
        let half_width = self.width / 2.0;
        let min_x = match side {
            Side::Left => 0.0,
            Side::Right => half_width,
        };
        Aabb::new(Vec2::new(min_x, 0.0), Vec2::new(half_width, self.height))
    }

    /// Out of play on the left, right, or bottom. The top is open.
    pub fn is_out_of_bounds(&self, point: Vec2) -> bool {
        point.x < 0.0 || point.x > self.width || point.y > self.height
    }

    /// Clamp a player rectangle center so the rectangle stays on the field
    pub fn clamp_center(&self, center: Vec2, size: Vec2) -> Vec2 {
        let half = size / 2.0;
        Vec2::new(
            center.x.clamp(half.x, (self.width - half.x).max(half.x)),
            center.y.clamp(half.y, (self.height - half.y).max(half.y)),
        )
    }
}
