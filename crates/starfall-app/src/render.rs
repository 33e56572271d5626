//! Snapshot renderer — scales canvas coordinates onto the terminal grid.
//!
//! Pure sink: reads a snapshot, queues one frame, flushes. Never touches
//! game state and returns nothing to the core.

use std::io::Write;

use crossterm::style::{self, Color, Print};
use crossterm::{cursor, terminal, QueueableCommand};

use starfall_core::state::WorldSnapshot;
use starfall_core::types::Position;

use crate::game_loop::CELL_SCALE;

pub fn draw<W: Write>(
    out: &mut W,
    frame: &WorldSnapshot,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    for star in &frame.stars {
        let glyph = if star.size >= 2.5 { '*' } else { '.' };
        put(out, &star.pos, glyph, cols, rows)?;
    }

    out.queue(style::SetForegroundColor(Color::Red))?;
    for enemy in &frame.enemies {
        // Dead hulls linger in the data but are never drawn.
        if !enemy.is_dead {
            put(out, &enemy.pos, 'v', cols, rows)?;
        }
    }

    out.queue(style::SetForegroundColor(Color::Cyan))?;
    for enemy in &frame.enemies {
        for shot in &enemy.shots {
            put(out, &shot.pos, '!', cols, rows)?;
        }
    }

    out.queue(style::SetForegroundColor(Color::Yellow))?;
    for shot in &frame.hero_shots {
        put(out, &shot.pos, '^', cols, rows)?;
    }

    out.queue(style::SetForegroundColor(Color::Green))?;
    put(out, &frame.ship.pos, 'A', cols, rows)?;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(format!("Score: {}", frame.score.value)))?;

    out.queue(style::ResetColor)?;
    out.flush()
}

pub fn draw_game_over<W: Write>(out: &mut W, score: u64) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let cx = cols / 2;
    let cy = rows / 2;

    let title = "GAME OVER";
    let score_line = format!("Final score: {score}");
    let exit_line = "Press any key to exit";

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.len() as u16 / 2),
        cy.saturating_sub(1),
    ))?;
    out.queue(Print(title))?;

    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(cursor::MoveTo(
        cx.saturating_sub(score_line.len() as u16 / 2),
        cy + 1,
    ))?;
    out.queue(Print(&score_line))?;

    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(cursor::MoveTo(
        cx.saturating_sub(exit_line.len() as u16 / 2),
        cy + 3,
    ))?;
    out.queue(Print(exit_line))?;

    out.queue(style::ResetColor)?;
    out.flush()
}

fn put<W: Write>(
    out: &mut W,
    pos: &Position,
    glyph: char,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let col = (pos.x / CELL_SCALE).round();
    let row = (pos.y / CELL_SCALE).round();
    if col < 0.0 || row < 0.0 || col >= cols as f64 || row >= rows as f64 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(Print(glyph))?;
    Ok(())
}
