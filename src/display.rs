//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable snapshot of the
//! session.  No game logic is performed; this module only translates field
//! coordinates into terminal cells and cells into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use twin_shooter::config::GameConfig;
use twin_shooter::entities::{GameStatus, Rect};
use twin_shooter::session::{EntityView, Snapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_RUNNING: Color = Color::Green;
const C_HUD_PAUSED: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Field ↔ terminal mapping ──────────────────────────────────────────────────

/// Maps the playfield onto the terminal.  Row 0 is the HUD, rows 1 and
/// `rows - 2` are the border, the last row holds the controls hint.
#[derive(Clone, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    config: GameConfig,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, config: &GameConfig) -> Self {
        Self {
            cols,
            rows,
            config: config.clone(),
        }
    }

    fn play_cols(&self) -> u16 {
        self.cols.saturating_sub(2).max(1)
    }

    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(4).max(1)
    }

    fn scale_x(&self) -> f32 {
        self.play_cols() as f32 / self.config.field_width.max(1.0)
    }

    fn scale_y(&self) -> f32 {
        self.play_rows() as f32 / self.config.field_height.max(1.0)
    }

    /// Cell span `(first, count)` covering `[start, start + len)` on one axis.
    /// Always at least one cell, always inside the play area.
    fn span(start: f32, len: f32, scale: f32, offset: u16, cells: u16) -> (u16, u16) {
        let last = cells.saturating_sub(1) as f32;
        let first = (start * scale).floor().clamp(0.0, last);
        let end = ((start + len) * scale).ceil().clamp(first + 1.0, last + 1.0);
        (offset + first as u16, (end - first) as u16)
    }

    fn cells_of(&self, rect: &Rect) -> (u16, u16, u16, u16) {
        let (col, width) = Self::span(rect.x, rect.width, self.scale_x(), 1, self.play_cols());
        let (row, height) = Self::span(rect.y, rect.height, self.scale_y(), 2, self.play_rows());
        (col, row, width, height)
    }

    /// Convert a drag distance in cells back into field units.
    pub fn cells_to_field(&self, dcol: i32, drow: i32) -> (f32, f32) {
        (dcol as f32 / self.scale_x(), drow as f32 / self.scale_y())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, snap, view)?;

    let enemy_size = (view.config.enemy_width, view.config.enemy_height);
    for enemy in &snap.enemies {
        draw_box(out, view, enemy, enemy_size, C_ENEMY, '▓')?;
    }
    let bullet_size = (view.config.bullet_width, view.config.bullet_height);
    for bullet in &snap.bullets {
        draw_box(out, view, bullet, bullet_size, C_BULLET, '║')?;
    }

    draw_player(out, snap, view)?;
    draw_controls_hint(out, view)?;

    if snap.status == GameStatus::Paused {
        draw_paused(out, snap, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", snap.score)))?;

    let (label, color) = match snap.status {
        GameStatus::Running => ("[ RUNNING ]", C_HUD_RUNNING),
        GameStatus::Paused => ("[ PAUSED ]", C_HUD_PAUSED),
    };
    let rx = view.cols.saturating_sub(label.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(label))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    (col, row, width, height): (u16, u16, u16, u16),
    glyph: char,
) -> std::io::Result<()> {
    let line: String = std::iter::repeat(glyph).take(width as usize).collect();
    for r in row..row + height {
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_box<W: Write>(
    out: &mut W,
    view: &Viewport,
    entity: &EntityView,
    (width, height): (f32, f32),
    color: Color,
    glyph: char,
) -> std::io::Result<()> {
    let rect = Rect {
        x: entity.x,
        y: entity.y,
        width,
        height,
    };
    out.queue(style::SetForegroundColor(color))?;
    fill(out, view.cells_of(&rect), glyph)
}

fn draw_player<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    // Tip on the first row, hull below it
    let (col, row, width, height) = view.cells_of(&snap.player);
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col + width / 2, row))?;
    out.queue(Print("▲"))?;
    if height > 1 {
        fill(out, (col, row + 1, width, height - 1), '█')?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "Arrows/WASD/drag: Move  SPACE: Shoot  P: Pause  R/N: Restart  Q: Quit",
    ))?;
    Ok(())
}

// ── Pause overlay ─────────────────────────────────────────────────────────────

fn draw_paused<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Score: {}", snap.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Yellow),
        ("║      PAUSED      ║", Color::Yellow),
        ("╚══════════════════╝", Color::Yellow),
        (&score_line, Color::White),
        ("P - Resume  R - Restart  Q - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
