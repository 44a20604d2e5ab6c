//! All game entity types: pure data, no logic.

use std::fmt;

use crate::store::EntityStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Paused,
}

/// Travel direction of a bullet.  Only upward fire exists today.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
}

/// Identifier of a live bullet or enemy.  Allocated by the [`EntityStore`],
/// one counter per entity kind, never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned bounding box in field units.  `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ── Projectiles & enemies ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
}

// ── Master world state ────────────────────────────────────────────────────────

/// Everything the simulation advances.  Cloneable so the pure update
/// functions in [`crate::compute`] can return a new copy.
#[derive(Clone, Debug)]
pub struct WorldState {
    pub player: Player,
    pub store: EntityStore,
    pub score: u32,
}
