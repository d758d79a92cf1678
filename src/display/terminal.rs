/// Terminal presenter.  The only place a canvas touches real terminal I/O.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use super::canvas::Canvas;

/// Flush a whole canvas, emitting colour changes only where they differ
/// from the previous cell.
pub fn present<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    let mut fg: Option<Color> = None;
    let mut bg: Option<Color> = None;

    for (row, cells) in canvas.iter_rows().enumerate() {
        out.queue(cursor::MoveTo(0, row as u16))?;
        let mut run = String::new();
        for cell in cells {
            if fg != Some(cell.fg) || bg != Some(cell.bg) {
                if !run.is_empty() {
                    out.queue(Print(std::mem::take(&mut run)))?;
                }
                if fg != Some(cell.fg) {
                    out.queue(style::SetForegroundColor(cell.fg))?;
                    fg = Some(cell.fg);
                }
                if bg != Some(cell.bg) {
                    out.queue(style::SetBackgroundColor(cell.bg))?;
                    bg = Some(cell.bg);
                }
            }
            run.push(cell.ch);
        }
        if !run.is_empty() {
            out.queue(Print(run))?;
        }
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, canvas.rows().saturating_sub(1)))?;
    out.flush()
}
