//! Axis-aligned rectangles and sprite frames
//!
//! Every moving thing in the runner is a sprite with an anchor point and a
//! trimmed physics body. Positions stored in the simulation are anchors; the
//! body rectangle is derived on demand.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Rectangle overlap test. Touching edges count as overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Which side of `other` this box ran into, judged by the smaller overlap axis
    pub fn contact_side(&self, other: &Aabb) -> Option<ContactSide> {
        if !self.overlaps(other) {
            return None;
        }

        let overlap_x = (self.max.x - other.min.x).min(other.max.x - self.min.x);
        let overlap_y = (self.max.y - other.min.y).min(other.max.y - self.min.y);

        let side = if overlap_x < overlap_y {
            if self.center().x < other.center().x {
                ContactSide::Left
            } else {
                ContactSide::Right
            }
        } else if self.center().y < other.center().y {
            ContactSide::Top
        } else {
            ContactSide::Bottom
        };
        Some(side)
    }
}

/// Face of a static box that a moving box struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// Sprite dimensions plus its trimmed physics body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteFrame {
    /// Full sprite size
    pub size: Vec2,
    /// Anchor as a fraction of the size ((0.5, 1.0) = bottom-center)
    pub origin: Vec2,
    /// Body offset from the sprite's top-left corner
    pub body_offset: Vec2,
    /// Body size
    pub body_size: Vec2,
}

impl SpriteFrame {
    pub const fn new(size: Vec2, origin: Vec2, body_offset: Vec2, body_size: Vec2) -> Self {
        Self {
            size,
            origin,
            body_offset,
            body_size,
        }
    }

    /// Frame whose body is the whole sprite
    pub const fn full(size: Vec2, origin: Vec2) -> Self {
        Self::new(size, origin, Vec2::ZERO, size)
    }

    /// Body rectangle for a sprite anchored at `anchor`
    pub fn body_at(&self, anchor: Vec2) -> Aabb {
        let top_left = anchor - self.size * self.origin + self.body_offset;
        Aabb::new(top_left.x, top_left.y, self.body_size.x, self.body_size.y)
    }
}
