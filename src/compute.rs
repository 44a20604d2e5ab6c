//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `WorldState` and the `GameConfig` (and, where needed, an RNG handle) and
//! returns a brand-new `WorldState`.  Side effects are limited to the injected
//! RNG.

use std::collections::HashSet;

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bullet, Direction, Enemy, EntityId, Player, Rect, WorldState};
use crate::store::EntityStore;

/// Gap between the player's left edge and the left bullet of a pair.
pub const BULLET_SIDE_OFFSET: f32 = 10.0;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned bounding-box intersection.  Boxes that only share an edge do
/// not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

pub fn bullet_rect(bullet: &Bullet, config: &GameConfig) -> Rect {
    Rect {
        x: bullet.x,
        y: bullet.y,
        width: config.bullet_width,
        height: config.bullet_height,
    }
}

pub fn enemy_rect(enemy: &Enemy, config: &GameConfig) -> Rect {
    Rect {
        x: enemy.x,
        y: enemy.y,
        width: config.enemy_width,
        height: config.enemy_height,
    }
}

pub fn player_rect(player: &Player) -> Rect {
    Rect {
        x: player.x,
        y: player.y,
        width: player.width,
        height: player.height,
    }
}

// Upper clamp bounds.  A sprite larger than the field pins to 0.
fn max_player_x(config: &GameConfig) -> f32 {
    (config.field_width - config.player_width).max(0.0)
}

fn max_player_y(config: &GameConfig) -> f32 {
    (config.field_height - config.player_height).max(0.0)
}

fn max_enemy_x(config: &GameConfig) -> f32 {
    let max_x = (config.field_width - config.enemy_width).max(0.0);
    // An unbounded field has no range to sample from
    if max_x.is_finite() {
        max_x
    } else {
        0.0
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn centered_player(config: &GameConfig) -> Player {
    Player {
        x: max_player_x(config) / 2.0,
        y: max_player_y(config) / 2.0,
        width: config.player_width,
        height: config.player_height,
    }
}

/// Build the state a new session starts from.
pub fn init_state(config: &GameConfig) -> WorldState {
    WorldState {
        player: centered_player(config),
        store: EntityStore::new(),
        score: 0,
    }
}

/// Empty field, zero score, player back in the centre.  Id counters carry
/// over from `state`.
pub fn reset_state(state: &WorldState, config: &GameConfig) -> WorldState {
    let mut store = state.store.clone();
    store.clear();
    WorldState {
        player: centered_player(config),
        store,
        score: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Move the player to an absolute position, clamped to the field.  A NaN
/// coordinate leaves that axis where it was.
pub fn move_player_to(state: &WorldState, x: f32, y: f32, config: &GameConfig) -> WorldState {
    let x = if x.is_nan() {
        state.player.x
    } else {
        x.clamp(0.0, max_player_x(config))
    };
    let y = if y.is_nan() {
        state.player.y
    } else {
        y.clamp(0.0, max_player_y(config))
    };
    WorldState {
        player: Player {
            x,
            y,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire a pair of bullets: one just left of the player, one at its right
/// edge, both level with the player's vertical centre.
pub fn player_fire(state: &WorldState) -> WorldState {
    let p = &state.player;
    let y = p.y + p.height / 2.0;
    let mut store = state.store.clone();
    store.add_bullet(p.x - BULLET_SIDE_OFFSET, y, Direction::Up);
    store.add_bullet(p.x + p.width, y, Direction::Up);
    WorldState {
        store,
        ..state.clone()
    }
}

// ── Spawning (RNG is injected) ───────────────────────────────────────────────

/// Drop a new enemy in at the top edge with a uniformly random x.
pub fn spawn_enemy(
    state: &WorldState,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> (WorldState, EntityId) {
    let max_x = max_enemy_x(config);
    let x = rng.gen_range(0.0..=max_x).clamp(0.0, max_x);
    let mut store = state.store.clone();
    let id = store.add_enemy(x, 0.0);
    (
        WorldState {
            store,
            ..state.clone()
        },
        id,
    )
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Entities dropped for leaving the field during one motion step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Culled {
    pub bullets: usize,
    pub enemies: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub bullet: EntityId,
    pub enemy: EntityId,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub culled: Culled,
    pub hits: Vec<Hit>,
}

/// Advance every bullet and enemy by one fixed step, then drop bullets above
/// the top edge and enemies below the bottom edge.
pub fn move_entities(state: &WorldState, config: &GameConfig) -> (WorldState, Culled) {
    let mut store = state.store.clone();

    for bullet in store.bullets_mut() {
        match bullet.direction {
            Direction::Up => bullet.y -= config.bullet_speed,
        }
    }
    for enemy in store.enemies_mut() {
        enemy.y += config.enemy_speed;
    }

    let bullets_before = store.bullets().len();
    let enemies_before = store.enemies().len();
    store.retain_bullets(|b| b.y >= 0.0);
    let field_height = config.field_height;
    store.retain_enemies(|e| e.y <= field_height);

    let culled = Culled {
        bullets: bullets_before - store.bullets().len(),
        enemies: enemies_before - store.enemies().len(),
    };
    (
        WorldState {
            store,
            ..state.clone()
        },
        culled,
    )
}

/// Pair each bullet with the first live enemy it overlaps.  A bullet is spent
/// on at most one enemy and an enemy dies at most once, so the score grows by
/// exactly the number of distinct enemies destroyed.  Removal happens after
/// the scan.
pub fn resolve_collisions(state: &WorldState, config: &GameConfig) -> (WorldState, Vec<Hit>) {
    let mut hits: Vec<Hit> = Vec::new();
    let mut used_bullets: HashSet<EntityId> = HashSet::new();
    let mut killed_enemies: HashSet<EntityId> = HashSet::new();

    for bullet in state.store.bullets() {
        let b = bullet_rect(bullet, config);
        let target = state
            .store
            .enemies()
            .iter()
            .filter(|e| !killed_enemies.contains(&e.id))
            .find(|e| overlaps(&b, &enemy_rect(e, config)));
        if let Some(enemy) = target {
            killed_enemies.insert(enemy.id);
            used_bullets.insert(bullet.id);
            hits.push(Hit {
                bullet: bullet.id,
                enemy: enemy.id,
            });
        }
    }

    if hits.is_empty() {
        return (state.clone(), hits);
    }

    let mut store = state.store.clone();
    store.remove_bullets(&used_bullets);
    store.remove_enemies(&killed_enemies);

    let next = WorldState {
        store,
        score: state.score.saturating_add(hits.len() as u32),
        ..state.clone()
    };
    (next, hits)
}

/// One simulation step: motion first, then collisions at the post-move
/// positions.
pub fn tick(state: &WorldState, config: &GameConfig) -> (WorldState, TickReport) {
    let (moved, culled) = move_entities(state, config);
    let (resolved, hits) = resolve_collisions(&moved, config);
    (resolved, TickReport { culled, hits })
}
