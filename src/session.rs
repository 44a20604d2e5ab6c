//! The game loop controller.
//!
//! A [`GameSession`] owns the world, the run state and both schedulers.  Hosts
//! drive it from a single thread: deliver frames through
//! [`GameSession::on_frame`], wall-clock time through
//! [`GameSession::on_spawn_timer`] (or both at once with
//! [`GameSession::pump`]), and player input through [`GameSession::apply`].

use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, trace};

use crate::commands::Command;
use crate::compute;
use crate::config::GameConfig;
use crate::entities::{EntityId, GameStatus, Rect, WorldState};
use crate::scheduler::{FrameHandle, FrameScheduler, SpawnTimer};

/// Position of one bullet or enemy as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityView {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
}

/// Read-only view of a session, taken after a frame for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub player: Rect,
    pub bullets: Vec<EntityView>,
    pub enemies: Vec<EntityView>,
    pub score: u32,
    pub status: GameStatus,
}

pub struct GameSession<R = StdRng> {
    config: GameConfig,
    world: WorldState,
    status: GameStatus,
    frames: FrameScheduler,
    spawn_timer: SpawnTimer,
    rng: R,
}

impl<R: Rng> GameSession<R> {
    /// Start a session.  It is Running right away, with a frame requested and
    /// the spawn timer armed.
    pub fn new(config: GameConfig, rng: R) -> Self {
        let world = compute::init_state(&config);
        let mut spawn_timer = SpawnTimer::new(config.spawn_period());
        spawn_timer.start();
        let mut frames = FrameScheduler::new();
        frames.request();

        info!(
            field_width = config.field_width,
            field_height = config.field_height,
            spawn_period_ms = config.enemy_spawn_period_ms,
            "session started"
        );

        Self {
            config,
            world,
            status: GameStatus::Running,
            frames,
            spawn_timer,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.world.score
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    // ── Commands ─────────────────────────────────────────────────────────────

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MovePlayer { x, y } => self.set_player_position(x, y),
            Command::Fire => self.fire(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Restart => self.restart(),
        }
    }

    /// No-op while paused.
    pub fn set_player_position(&mut self, x: f32, y: f32) {
        if !self.is_running() {
            return;
        }
        self.world = compute::move_player_to(&self.world, x, y, &self.config);
    }

    /// No-op while paused.
    pub fn fire(&mut self) {
        if !self.is_running() {
            return;
        }
        self.world = compute::player_fire(&self.world);
        trace!(bullets = self.world.store.bullets().len(), "fired");
    }

    /// Halt both schedulers, keeping entities and score.  Pausing a paused
    /// session does nothing.
    pub fn pause(&mut self) {
        if !self.is_running() {
            return;
        }
        self.frames.cancel();
        self.spawn_timer.stop();
        self.status = GameStatus::Paused;
        info!(score = self.world.score, "paused");
    }

    /// Restart both schedulers.  Resuming a running session does nothing.
    pub fn resume(&mut self) {
        if self.is_running() {
            return;
        }
        self.status = GameStatus::Running;
        self.spawn_timer.start();
        self.frames.request();
        info!("resumed");
    }

    /// Start over from any state.  Pending callbacks are cancelled before the
    /// field is cleared, so nothing scheduled earlier can touch the new round.
    pub fn restart(&mut self) {
        self.frames.cancel();
        self.spawn_timer.stop();

        let previous = self.world.score;
        self.world = compute::reset_state(&self.world, &self.config);
        self.status = GameStatus::Running;

        self.spawn_timer.start();
        self.frames.request();
        info!(previous_score = previous, "restarted");
    }

    // ── Scheduler callbacks ──────────────────────────────────────────────────

    /// The frame the host should deliver next, if one is requested.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frames.pending()
    }

    /// Run one tick for `handle`.  Returns `false` without touching state if
    /// the handle was cancelled, superseded or the session is paused.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if !self.is_running() || !self.frames.take(handle) {
            trace!(?handle, "ignoring stale frame");
            return false;
        }

        let (world, report) = compute::tick(&self.world, &self.config);
        self.world = world;

        for hit in &report.hits {
            debug!(bullet = %hit.bullet, enemy = %hit.enemy, score = self.world.score, "enemy destroyed");
        }
        trace!(
            bullets = self.world.store.bullets().len(),
            enemies = self.world.store.enemies().len(),
            expired_bullets = report.culled.bullets,
            escaped_enemies = report.culled.enemies,
            "tick"
        );

        self.frames.request();
        true
    }

    /// Feed wall-clock time to the spawn timer.  Returns the id of the enemy
    /// spawned, if the period completed.  Time fed while paused is discarded.
    pub fn on_spawn_timer(&mut self, elapsed: Duration) -> Option<EntityId> {
        if !self.is_running() || !self.spawn_timer.advance(elapsed) {
            return None;
        }
        let (world, id) = compute::spawn_enemy(&self.world, &self.config, &mut self.rng);
        self.world = world;
        debug!(enemy = %id, "enemy spawned");
        Some(id)
    }

    /// Deliver the pending frame, then advance the spawn timer by `elapsed`.
    pub fn pump(&mut self, elapsed: Duration) {
        if let Some(handle) = self.pending_frame() {
            self.on_frame(handle);
        }
        self.on_spawn_timer(elapsed);
    }

    // ── Presentation ─────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        let store = &self.world.store;
        Snapshot {
            player: compute::player_rect(&self.world.player),
            bullets: store
                .bullets()
                .iter()
                .map(|b| EntityView { id: b.id, x: b.x, y: b.y })
                .collect(),
            enemies: store
                .enemies()
                .iter()
                .map(|e| EntityView { id: e.id, x: e.x, y: e.y })
                .collect(),
            score: self.world.score,
            status: self.status,
        }
    }
}
