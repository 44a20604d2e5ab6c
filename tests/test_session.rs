use std::time::Duration;

use twin_shooter::commands::Command;
use twin_shooter::compute::centered_player;
use twin_shooter::config::GameConfig;
use twin_shooter::entities::{Direction, GameStatus};
use twin_shooter::session::GameSession;

use rand::rngs::StdRng;
use rand::SeedableRng;

const SECOND: Duration = Duration::from_millis(1000);

fn config() -> GameConfig {
    GameConfig {
        field_width: 400.0,
        field_height: 300.0,
        player_width: 50.0,
        player_height: 40.0,
        bullet_speed: 20.0,
        enemy_speed: 2.0,
        enemy_spawn_period_ms: 1000,
        ..GameConfig::default()
    }
}

fn make_session() -> GameSession {
    GameSession::new(config(), StdRng::seed_from_u64(7))
}

/// Deliver `n` frames, each followed by `dt` of wall-clock time.
fn run_frames(session: &mut GameSession, n: usize, dt: Duration) {
    for _ in 0..n {
        session.pump(dt);
    }
}

/// Line one bullet of the next pair up with an enemy at `enemy_x`, close
/// enough below it that the pair hits within ten frames.
fn aim_at(session: &mut GameSession, enemy_x: f32) {
    // Left bullet when the player fits, right bullet near the right wall
    let x = if enemy_x + 20.0 <= 350.0 { enemy_x + 20.0 } else { enemy_x - 40.0 };
    session.set_player_position(x, 150.0);
}

// ── Start ─────────────────────────────────────────────────────────────────────

#[test]
fn new_session_is_running_with_frame_pending() {
    let s = make_session();
    assert_eq!(s.status(), GameStatus::Running);
    assert!(s.pending_frame().is_some());
    assert_eq!(s.score(), 0);
    assert_eq!(s.world().player, centered_player(&config()));
}

#[test]
fn frames_without_input_or_spawns_change_nothing() {
    let mut s = make_session();
    run_frames(&mut s, 50, Duration::ZERO);
    let snap = s.snapshot();
    assert!(snap.bullets.is_empty());
    assert!(snap.enemies.is_empty());
    assert_eq!(snap.score, 0);
}

// ── Frame scheduling ──────────────────────────────────────────────────────────

#[test]
fn each_frame_requests_the_next() {
    let mut s = make_session();
    let first = s.pending_frame().expect("frame requested at start");
    assert!(s.on_frame(first));
    let second = s.pending_frame().expect("next frame requested");
    assert_ne!(first, second);
    // A handle is honoured only once
    assert!(!s.on_frame(first));
}

#[test]
fn bullets_move_once_per_frame() {
    let mut s = make_session();
    s.set_player_position(100.0, 250.0);
    s.fire();
    let start_y = s.snapshot().bullets[0].y;
    run_frames(&mut s, 4, Duration::ZERO);
    assert_eq!(s.snapshot().bullets[0].y, start_y - 4.0 * 20.0);
}

// ── Spawn timer ───────────────────────────────────────────────────────────────

#[test]
fn enemy_spawns_once_per_period() {
    let mut s = make_session();
    assert!(s.on_spawn_timer(Duration::from_millis(999)).is_none());
    let id = s.on_spawn_timer(Duration::from_millis(1)).expect("period elapsed");
    let snap = s.snapshot();
    assert_eq!(snap.enemies.len(), 1);
    assert_eq!(snap.enemies[0].id, id);
    assert_eq!(snap.enemies[0].y, 0.0);
}

#[test]
fn long_gap_spawns_only_one_enemy() {
    let mut s = make_session();
    assert!(s.on_spawn_timer(SECOND * 5).is_some());
    assert_eq!(s.snapshot().enemies.len(), 1);
}

#[test]
fn spawn_on_unbounded_field_does_not_panic() {
    let cfg = GameConfig {
        field_width: f32::INFINITY,
        ..config()
    };
    let mut s = GameSession::new(cfg, StdRng::seed_from_u64(1));
    assert!(s.on_spawn_timer(SECOND).is_some());
    assert_eq!(s.snapshot().enemies[0].x, 0.0);
}

#[test]
fn spawn_cadence_is_independent_of_frame_rate() {
    let mut slow = make_session();
    let mut fast = make_session();
    // Two seconds each, at 10 and 100 frames per second
    run_frames(&mut slow, 20, Duration::from_millis(100));
    run_frames(&mut fast, 200, Duration::from_millis(10));
    assert_eq!(slow.snapshot().enemies.len(), 2);
    assert_eq!(fast.snapshot().enemies.len(), 2);
}

// ── Commands while running ────────────────────────────────────────────────────

#[test]
fn fire_adds_two_bullets() {
    let mut s = make_session();
    s.apply(Command::MovePlayer { x: 100.0, y: 200.0 });
    s.apply(Command::Fire);
    let world = s.world();
    let bullets = world.store.bullets();
    assert_eq!(bullets.len(), 2);
    assert_eq!(bullets[0].x, 90.0);
    assert_eq!(bullets[1].x, 150.0);
    assert!(bullets.iter().all(|b| b.y == 220.0 && b.direction == Direction::Up));
}

#[test]
fn move_is_clamped() {
    let mut s = make_session();
    s.set_player_position(-50.0, 9999.0);
    let p = s.snapshot().player;
    assert_eq!((p.x, p.y), (0.0, 260.0));
}

#[test]
fn shooting_a_spawned_enemy_scores() {
    let mut s = make_session();
    let id = s.on_spawn_timer(SECOND).expect("spawned");
    let enemy_x = s.snapshot().enemies[0].x;

    aim_at(&mut s, enemy_x);
    s.fire();
    run_frames(&mut s, 10, Duration::ZERO);

    let snap = s.snapshot();
    assert_eq!(snap.score, 1);
    assert!(snap.enemies.iter().all(|e| e.id != id));
}

// ── Pause / resume ────────────────────────────────────────────────────────────

#[test]
fn pause_freezes_motion_and_spawning() {
    let mut s = make_session();
    s.fire();
    s.on_spawn_timer(SECOND);
    s.pause();
    let frozen = s.snapshot();
    assert_eq!(frozen.status, GameStatus::Paused);
    assert!(s.pending_frame().is_none());

    for _ in 0..100 {
        s.pump(SECOND);
        assert!(s.on_spawn_timer(SECOND * 3).is_none());
    }
    let after = s.snapshot();
    assert_eq!(after.bullets, frozen.bullets);
    assert_eq!(after.enemies, frozen.enemies);
    assert_eq!(after.score, frozen.score);
}

#[test]
fn frame_handle_from_before_pause_is_refused() {
    let mut s = make_session();
    let stale = s.pending_frame().expect("pending");
    s.pause();
    assert!(!s.on_frame(stale));
    s.resume();
    assert!(!s.on_frame(stale));
    assert!(s.pending_frame().is_some());
}

#[test]
fn paused_time_does_not_count_toward_spawn() {
    let mut s = make_session();
    assert!(s.on_spawn_timer(Duration::from_millis(900)).is_none());
    s.pause();
    s.on_spawn_timer(SECOND * 10);
    s.resume();
    // Resuming starts a fresh period
    assert!(s.on_spawn_timer(Duration::from_millis(900)).is_none());
    assert!(s.on_spawn_timer(Duration::from_millis(100)).is_some());
}

#[test]
fn commands_while_paused_are_ignored() {
    let mut s = make_session();
    let before = s.snapshot();
    s.pause();
    s.fire();
    s.set_player_position(0.0, 0.0);
    let after = s.snapshot();
    assert!(after.bullets.is_empty());
    assert_eq!(after.player, before.player);
}

#[test]
fn pause_twice_equals_pause_once() {
    let mut s = make_session();
    s.fire();
    s.pause();
    let once = s.snapshot();
    s.pause();
    assert_eq!(s.snapshot(), once);
    assert_eq!(s.status(), GameStatus::Paused);

    s.resume();
    assert_eq!(s.status(), GameStatus::Running);
}

#[test]
fn resume_while_running_keeps_current_frame() {
    let mut s = make_session();
    let pending = s.pending_frame();
    s.resume();
    assert_eq!(s.pending_frame(), pending);
}

#[test]
fn resume_continues_from_preserved_state() {
    let mut s = make_session();
    s.set_player_position(100.0, 250.0);
    s.fire();
    run_frames(&mut s, 2, Duration::ZERO);
    let y = s.snapshot().bullets[0].y;
    s.pause();
    s.resume();
    run_frames(&mut s, 1, Duration::ZERO);
    assert_eq!(s.snapshot().bullets[0].y, y - 20.0);
}

// ── Restart ───────────────────────────────────────────────────────────────────

#[test]
fn restart_clears_everything() {
    let mut s = make_session();
    // Build up some score first
    for _ in 0..7 {
        s.on_spawn_timer(SECOND);
        let enemy_x = s.snapshot().enemies.last().map(|e| e.x).unwrap_or(0.0);
        aim_at(&mut s, enemy_x);
        s.fire();
        run_frames(&mut s, 10, Duration::ZERO);
    }
    s.fire();
    s.on_spawn_timer(SECOND);
    assert_eq!(s.score(), 7);
    assert!(!s.snapshot().bullets.is_empty());
    assert!(!s.snapshot().enemies.is_empty());

    s.pause();
    s.apply(Command::Restart);
    let snap = s.snapshot();
    assert!(snap.bullets.is_empty());
    assert!(snap.enemies.is_empty());
    assert_eq!(snap.score, 0);
    assert_eq!(snap.status, GameStatus::Running);
    let centre = centered_player(&config());
    assert_eq!((snap.player.x, snap.player.y), (centre.x, centre.y));
}

#[test]
fn restart_refuses_frames_scheduled_before_it() {
    let mut s = make_session();
    s.fire();
    let stale = s.pending_frame().expect("pending");
    s.restart();
    s.pause();
    s.resume();
    assert!(!s.on_frame(stale));
    assert!(s.snapshot().bullets.is_empty());
}

#[test]
fn restart_restarts_spawn_period() {
    let mut s = make_session();
    s.on_spawn_timer(Duration::from_millis(900));
    s.restart();
    assert!(s.on_spawn_timer(Duration::from_millis(900)).is_none());
    assert!(s.on_spawn_timer(Duration::from_millis(100)).is_some());
}

#[test]
fn ids_stay_unique_across_restart() {
    let mut s = make_session();
    let before = s.on_spawn_timer(SECOND).expect("spawned");
    s.restart();
    let after = s.on_spawn_timer(SECOND).expect("spawned");
    assert_ne!(before, after);
}
