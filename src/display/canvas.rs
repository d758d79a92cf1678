/// In-memory drawing surface: a grid of terminal cells.

use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            None
        } else {
            Some(row as usize * self.cols as usize + col as usize)
        }
    }

    pub fn cell(&self, col: i32, row: i32) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    /// Blank a whole row with a background colour.
    pub fn fill_row(&mut self, row: u16, bg: Color) {
        if row >= self.rows {
            return;
        }
        let start = row as usize * self.cols as usize;
        for cell in &mut self.cells[start..start + self.cols as usize] {
            *cell = Cell { bg, ..Cell::default() };
        }
    }

    /// Draw a glyph, keeping the background already there.  Off-canvas
    /// positions are silently clipped.
    pub fn put(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i].ch = ch;
            self.cells[i].fg = fg;
        }
    }

    pub fn put_str(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, fg);
        }
    }

    /// Like `put_str` but also paints the background; used by overlays.
    pub fn put_str_on(&mut self, col: i32, row: i32, text: &str, fg: Color, bg: Color) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(idx) = self.index(col + i as i32, row) {
                self.cells[idx] = Cell { ch, fg, bg };
            }
        }
    }

    /// Row contents as plain text.
    pub fn row_text(&self, row: u16) -> String {
        if row >= self.rows {
            return String::new();
        }
        let start = row as usize * self.cols as usize;
        self.cells[start..start + self.cols as usize]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_clips_out_of_bounds() {
        let mut c = Canvas::new(4, 2);
        c.put(-1, 0, 'x', Color::Red);
        c.put(4, 0, 'x', Color::Red);
        c.put(0, 2, 'x', Color::Red);
        assert_eq!(c.row_text(0), "    ");
        assert_eq!(c.row_text(1), "    ");
    }

    #[test]
    fn put_keeps_background() {
        let mut c = Canvas::new(3, 1);
        c.fill_row(0, Color::Blue);
        c.put(1, 0, '*', Color::Yellow);
        let cell = c.cell(1, 0).unwrap();
        assert_eq!(cell.ch, '*');
        assert_eq!(cell.bg, Color::Blue);
    }

    #[test]
    fn put_str_wraps_nothing() {
        let mut c = Canvas::new(5, 1);
        c.put_str(3, 0, "abcd", Color::White);
        assert_eq!(c.row_text(0), "   ab");
    }
}
