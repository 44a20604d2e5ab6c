//! Live bullets and enemies.
//!
//! Both collections keep insertion order.  Removal is always by id, and bulk
//! removal filters the whole collection against a marked set in one pass, so
//! removing several neighbours at once can never skip or repeat an element.

use std::collections::HashSet;

use crate::entities::{Bullet, Direction, Enemy, EntityId};

#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    bullets: Vec<Bullet>,
    enemies: Vec<Enemy>,
    next_bullet_id: u64,
    next_enemy_id: u64,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Positions may be edited in place; membership only changes through the
    /// add/remove methods.
    pub fn bullets_mut(&mut self) -> &mut [Bullet] {
        &mut self.bullets
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn add_bullet(&mut self, x: f32, y: f32, direction: Direction) -> EntityId {
        self.next_bullet_id += 1;
        let id = EntityId(self.next_bullet_id);
        self.bullets.push(Bullet { id, x, y, direction });
        id
    }

    pub fn add_enemy(&mut self, x: f32, y: f32) -> EntityId {
        self.next_enemy_id += 1;
        let id = EntityId(self.next_enemy_id);
        self.enemies.push(Enemy { id, x, y });
        id
    }

    /// Returns `false` when the bullet is already gone.
    pub fn remove_bullet(&mut self, id: EntityId) -> bool {
        let before = self.bullets.len();
        self.bullets.retain(|b| b.id != id);
        self.bullets.len() != before
    }

    /// Returns `false` when the enemy is already gone.
    pub fn remove_enemy(&mut self, id: EntityId) -> bool {
        let before = self.enemies.len();
        self.enemies.retain(|e| e.id != id);
        self.enemies.len() != before
    }

    /// Drops every bullet whose id is in `ids`.  Ids that are not live are
    /// ignored.  Returns how many bullets were removed.
    pub fn remove_bullets(&mut self, ids: &HashSet<EntityId>) -> usize {
        let before = self.bullets.len();
        self.bullets.retain(|b| !ids.contains(&b.id));
        before - self.bullets.len()
    }

    pub fn remove_enemies(&mut self, ids: &HashSet<EntityId>) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|e| !ids.contains(&e.id));
        before - self.enemies.len()
    }

    pub fn retain_bullets(&mut self, keep: impl FnMut(&Bullet) -> bool) {
        self.bullets.retain(keep);
    }

    pub fn retain_enemies(&mut self, keep: impl FnMut(&Enemy) -> bool) {
        self.enemies.retain(keep);
    }

    /// Empties both collections.  Id counters keep running so an id handed
    /// out before the clear never comes back.
    pub fn clear(&mut self) {
        self.bullets.clear();
        self.enemies.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty() && self.enemies.is_empty()
    }
}
