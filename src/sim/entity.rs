//! Obstacle and collectible entities

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, SpriteFrame};

const BOTTOM_CENTER: Vec2 = Vec2::new(0.5, 1.0);
const CENTER: Vec2 = Vec2::new(0.5, 0.5);

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Cactus,
    Rock,
    /// Flies in an altitude band and bobs vertically
    Bird,
    Spike,
}

impl ObstacleKind {
    /// Order used by the weighted picker
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Cactus,
        ObstacleKind::Rock,
        ObstacleKind::Bird,
        ObstacleKind::Spike,
    ];

    pub fn frame(self) -> SpriteFrame {
        match self {
            ObstacleKind::Cactus => SpriteFrame::new(
                Vec2::new(24.0, 48.0),
                BOTTOM_CENTER,
                Vec2::new(4.0, 8.0),
                Vec2::new(16.0, 40.0),
            ),
            ObstacleKind::Rock => SpriteFrame::new(
                Vec2::new(32.0, 24.0),
                BOTTOM_CENTER,
                Vec2::new(2.0, 4.0),
                Vec2::new(28.0, 20.0),
            ),
            ObstacleKind::Bird => SpriteFrame::new(
                Vec2::new(32.0, 24.0),
                CENTER,
                Vec2::new(2.0, 4.0),
                Vec2::new(28.0, 16.0),
            ),
            ObstacleKind::Spike => SpriteFrame::new(
                Vec2::new(24.0, 32.0),
                BOTTOM_CENTER,
                Vec2::new(4.0, 4.0),
                Vec2::new(16.0, 28.0),
            ),
        }
    }

    pub fn is_airborne(self) -> bool {
        self == ObstacleKind::Bird
    }
}

/// Time-boxed or consumable pickup effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Magnet,
    SpeedBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::Magnet,
        PowerUpKind::SpeedBoost,
    ];
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    PowerUp(PowerUpKind),
}

impl CollectibleKind {
    pub fn frame(self) -> SpriteFrame {
        match self {
            CollectibleKind::Coin => SpriteFrame::full(Vec2::new(16.0, 16.0), CENTER),
            CollectibleKind::PowerUp(_) => SpriteFrame::full(Vec2::new(24.0, 24.0), CENTER),
        }
    }
}

/// Something the spawners own: anchored sprite plus liveness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity<K> {
    pub id: u32,
    pub kind: K,
    /// Sprite anchor
    pub pos: Vec2,
    pub alive: bool,
}

/// Anything with a sprite frame can be an entity kind
pub trait EntityKind: Copy {
    fn sprite_frame(self) -> SpriteFrame;
}

impl EntityKind for ObstacleKind {
    fn sprite_frame(self) -> SpriteFrame {
        self.frame()
    }
}

impl EntityKind for CollectibleKind {
    fn sprite_frame(self) -> SpriteFrame {
        self.frame()
    }
}

impl<K: EntityKind> Entity<K> {
    pub fn new(id: u32, kind: K, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            alive: true,
        }
    }

    fn sprite(&self) -> SpriteFrame {
        self.kind.sprite_frame()
    }

    /// Physics body in world space
    pub fn bounds(&self) -> Aabb {
        self.sprite().body_at(self.pos)
    }

    pub fn width(&self) -> f32 {
        self.sprite().size.x
    }

    /// Past the trailing screen edge by at least a full sprite width
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -self.width()
    }

    /// Mark dead; the owning pool drops it before the next iteration
    pub fn kill(&mut self) {
        self.alive = false;
    }
}

/// Monotonic id source shared by both spawners
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl EntityIds {
    pub fn next(&mut self) -> u32 {
        self.next += 1;
        self.next
    }
}

pub type Obstacle = Entity<ObstacleKind>;
pub type Collectible = Entity<CollectibleKind>;
