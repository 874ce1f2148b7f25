/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only translates field
/// coordinates into terminal cells and cells back into field coordinates.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use descent_shooter::collision::Rect;
use descent_shooter::config::{GameConfig, Variant};
use descent_shooter::entities::{GameSession, GameStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Red;
const C_BULLET: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_BUTTON: Color = Color::Cyan;

// ── Field ↔ terminal mapping ──────────────────────────────────────────────────

/// The terminal area the field is stretched over.
///
/// Row 0 is the HUD, row 1 and row `rows - 2` are the border, the last row
/// holds the controls hint.  Column 0 and `cols - 1` are the side walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    const LEFT: u16 = 1;
    const TOP: u16 = 2;

    pub fn new(cols: u16, rows: u16) -> Viewport {
        Viewport { cols, rows }
    }

    fn inner_cols(&self) -> u16 {
        self.cols.saturating_sub(2).max(1)
    }

    fn inner_rows(&self) -> u16 {
        self.rows.saturating_sub(4).max(1)
    }

    /// Cell containing field point `(x, y)`, clamped to the play area.
    pub fn to_cell(&self, cfg: &GameConfig, x: f32, y: f32) -> (u16, u16) {
        let iw = self.inner_cols();
        let ih = self.inner_rows();
        let cx = ((x / cfg.field_width) * iw as f32).floor();
        let cy = ((y / cfg.field_height) * ih as f32).floor();
        let cx = cx.clamp(0.0, (iw - 1) as f32) as u16;
        let cy = cy.clamp(0.0, (ih - 1) as f32) as u16;
        (Self::LEFT + cx, Self::TOP + cy)
    }

    /// Field point at the center of cell `(col, row)`, or `None` for cells
    /// outside the play area.
    pub fn to_field(&self, cfg: &GameConfig, col: u16, row: u16) -> Option<(f32, f32)> {
        let iw = self.inner_cols();
        let ih = self.inner_rows();
        if col < Self::LEFT || row < Self::TOP {
            return None;
        }
        let (cx, cy) = (col - Self::LEFT, row - Self::TOP);
        if cx >= iw || cy >= ih {
            return None;
        }
        let x = (cx as f32 + 0.5) / iw as f32 * cfg.field_width;
        let y = (cy as f32 + 0.5) / ih as f32 * cfg.field_height;
        Some((x, y))
    }

    /// Inclusive cell span `(col0, row0, col1, row1)` covered by `rect`.
    fn span(&self, cfg: &GameConfig, rect: &Rect) -> (u16, u16, u16, u16) {
        let (c0, r0) = self.to_cell(cfg, rect.x, rect.y);
        // Nudge inward so an edge lying exactly on a cell boundary does not
        // claim the next cell.
        let (c1, r1) = self.to_cell(cfg, rect.right() - 0.001, rect.bottom() - 0.001);
        (c0, r0, c1.max(c0), r1.max(r0))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, view: &Viewport, state: &GameSession) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, view, state)?;

    for enemy in &state.enemies {
        let glyph = match state.config().variant {
            Variant::Classic => "▓",
            Variant::Arcade => "●",
        };
        fill(out, view, state.config(), &enemy.bounds(state.config()), glyph, C_ENEMY)?;
    }

    draw_player(out, view, state)?;

    out.queue(style::SetForegroundColor(C_BULLET))?;
    for bullet in &state.bullets {
        let (col, row) = view.to_cell(state.config(), bullet.x, bullet.y);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("║"))?;
    }

    draw_controls_hint(out, view, state)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, view, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn fill<W: Write>(
    out: &mut W,
    view: &Viewport,
    cfg: &GameConfig,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let (c0, r0, c1, r1) = view.span(cfg, rect);
    let line = glyph.repeat((c1 - c0 + 1) as usize);
    out.queue(style::SetForegroundColor(color))?;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, state: &GameSession) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", state.score)))?;

    let variant_str = format!("[ {} ]", state.config().variant.label());
    let color = match state.config().variant {
        Variant::Classic => Color::Green,
        Variant::Arcade => Color::Magenta,
    };
    let x = (view.cols / 2).saturating_sub(variant_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(x, 0))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(&variant_str))?;

    Ok(())
}

// ── Player ────────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: &Viewport, state: &GameSession) -> std::io::Result<()> {
    let cfg = state.config();
    let (c0, r0, c1, r1) = view.span(cfg, &state.player.bounds(cfg));
    let width = (c1 - c0 + 1) as usize;
    out.queue(style::SetForegroundColor(C_PLAYER))?;

    // Nose on the top row, hull below it
    let nose_col = c0 + (c1 - c0) / 2;
    out.queue(cursor::MoveTo(nose_col, r0))?;
    out.queue(Print("▲"))?;
    for row in (r0 + 1)..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print("█".repeat(width)))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameSession,
) -> std::io::Result<()> {
    let hint = match state.status {
        GameStatus::Playing => "← → / A D : Move   SPACE : Shoot   Q : Quit",
        GameStatus::GameOver => "R / click RESTART : Play again   M : Menu   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameSession,
) -> std::io::Result<()> {
    let cfg = state.config();

    let (_, title_row) = view.to_cell(cfg, 0.0, cfg.field_height / 2.0 - 20.0);
    let (_, score_row) = view.to_cell(cfg, 0.0, cfg.field_height / 2.0 + 20.0);
    let score_row = score_row.max(title_row + 1);
    let cx = view.cols / 2;

    let title = "GAME  OVER";
    out.queue(cursor::MoveTo(cx.saturating_sub(title.len() as u16 / 2), title_row))?;
    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(Print(title))?;

    let score_line = format!("Final Score: {}", state.score);
    out.queue(cursor::MoveTo(
        cx.saturating_sub(score_line.chars().count() as u16 / 2),
        score_row,
    ))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    // Restart button over its hit region
    fill(out, view, cfg, &cfg.restart_button, "░", C_BUTTON)?;
    let (c0, r0, c1, r1) = view.span(cfg, &cfg.restart_button);
    let label = "RESTART";
    let mid_col = c0 + (c1 - c0) / 2;
    let mid_row = r0 + (r1 - r0) / 2;
    out.queue(cursor::MoveTo(
        mid_col.saturating_sub(label.len() as u16 / 2),
        mid_row,
    ))?;
    out.queue(style::SetForegroundColor(C_BUTTON))?;
    out.queue(style::SetAttribute(style::Attribute::Reverse))?;
    out.queue(Print(format!(" {} ", label)))?;
    out.queue(style::SetAttribute(style::Attribute::NoReverse))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_play_area() {
        let cfg = GameConfig::default();
        let view = Viewport::new(62, 34); // 60 x 30 inner cells
        assert_eq!(view.to_cell(&cfg, 0.0, 0.0), (1, 2));
        assert_eq!(view.to_cell(&cfg, 600.0, 600.0), (60, 31));
    }

    #[test]
    fn clicks_outside_play_area_are_ignored() {
        let cfg = GameConfig::default();
        let view = Viewport::new(62, 34);
        assert_eq!(view.to_field(&cfg, 0, 10), None);
        assert_eq!(view.to_field(&cfg, 10, 1), None);
        assert_eq!(view.to_field(&cfg, 61, 10), None);
    }

    #[test]
    fn click_on_drawn_button_lands_in_hit_region() {
        let cfg = GameConfig::default();
        let view = Viewport::new(62, 34);
        let (c0, r0, c1, r1) = view.span(&cfg, &cfg.restart_button);
        let (col, row) = (c0 + (c1 - c0) / 2, r0 + (r1 - r0) / 2);
        let (x, y) = view.to_field(&cfg, col, row).unwrap();
        assert!(cfg.restart_button.contains(x, y), "cell ({}, {}) -> ({}, {})", col, row, x, y);
    }
}
