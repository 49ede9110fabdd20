//! `CellBuffer`: a grid of cells, the logical screen widgets draw into.
//!
//! Cells are stored in row-major order: `index = y * width + x`. Writes
//! outside the grid are silently clipped.

use super::cell::{Cell, Style};
use crate::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Box-drawing glyph set for window borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    /// Single lines.
    Single,
    /// Double lines (the active window).
    Double,
}

impl BorderStyle {
    /// `[top-left, top-right, bottom-left, bottom-right, horizontal, vertical]`
    const fn glyphs(self) -> [&'static str; 6] {
        match self {
            Self::Single => ["┌", "┐", "└", "┘", "─", "│"],
            Self::Double => ["╔", "╗", "╚", "╝", "═", "║"],
        }
    }
}

/// A grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBuffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl CellBuffer {
    /// Create a blank buffer.
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Cell::default(); size],
            width,
            height,
        }
    }

    /// Buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The whole buffer as a rectangle.
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Cell at `(x, y)`, if inside the buffer.
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Replace the cell at `(x, y)`. Returns `false` if out of bounds.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        match self.index_of(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Draw `text` starting at `(x, y)`, stopping at `max_width` columns or
    /// the buffer edge. Returns the number of columns used.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style, max_width: u16) -> u16 {
        let limit = x.saturating_add(max_width).min(self.width);
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let width = u16::try_from(grapheme.width()).unwrap_or(1);
            if width == 0 {
                continue;
            }
            if col.saturating_add(width) > limit {
                break;
            }
            self.set(col, y, Cell::new(grapheme, style));
            for extra in 1..width {
                self.set(col + extra, y, Cell::continuation(style));
            }
            col += width;
        }
        col - x
    }

    /// Fill a rectangle with blanks of the given style.
    pub fn fill_rect(&mut self, rect: Rect, style: Style) {
        let x_end = rect.right().min(self.width);
        let y_end = rect.bottom().min(self.height);
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                self.set(x, y, Cell::blank(style));
            }
        }
    }

    /// Draw a border around `rect`, with an optional centered title.
    pub fn draw_box(&mut self, rect: Rect, border: BorderStyle, style: Style, title: &str) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let [tl, tr, bl, br, horizontal, vertical] = border.glyphs();
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;

        for x in rect.x + 1..right {
            self.set(x, rect.y, Cell::new(horizontal, style));
            self.set(x, bottom, Cell::new(horizontal, style));
        }
        for y in rect.y + 1..bottom {
            self.set(rect.x, y, Cell::new(vertical, style));
            self.set(right, y, Cell::new(vertical, style));
        }
        self.set(rect.x, rect.y, Cell::new(tl, style));
        self.set(right, rect.y, Cell::new(tr, style));
        self.set(rect.x, bottom, Cell::new(bl, style));
        self.set(right, bottom, Cell::new(br, style));

        if !title.is_empty() {
            let label = format!(" {title} ");
            let available = rect.width.saturating_sub(4);
            let label_width = u16::try_from(label.width()).unwrap_or(u16::MAX).min(available);
            let start = rect.x + (rect.width - label_width) / 2;
            self.put_str(start, rect.y, &label, style, label_width);
        }
    }

    /// Reset every cell to the default blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize, keeping the overlapping top-left content.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        let mut resized = Self::new(width, height);
        for y in 0..self.height.min(height) {
            for x in 0..self.width.min(width) {
                if let Some(cell) = self.get(x, y) {
                    resized.set(x, y, cell.clone());
                }
            }
        }
        *self = resized;
    }

    /// Text of row `y`, continuation cells skipped. Handy in tests.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(Cell::symbol)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_clips_at_max_width() {
        let mut buf = CellBuffer::new(10, 1);
        let used = buf.put_str(2, 0, "hello world", Style::default(), 5);
        assert_eq!(used, 5);
        assert_eq!(buf.row_text(0), "  hello   ");
    }

    #[test]
    fn test_put_str_wide_graphemes() {
        let mut buf = CellBuffer::new(6, 1);
        let used = buf.put_str(0, 0, "日本語", Style::default(), 6);
        assert_eq!(used, 6);
        assert!(buf.get(1, 0).unwrap().is_continuation());
        assert_eq!(buf.row_text(0), "日本語");
    }

    #[test]
    fn test_wide_grapheme_not_split_at_edge() {
        let mut buf = CellBuffer::new(3, 1);
        let used = buf.put_str(0, 0, "日本", Style::default(), 3);
        assert_eq!(used, 2);
        assert_eq!(buf.get(2, 0).unwrap().symbol(), " ");
    }

    #[test]
    fn test_draw_box_corners_and_title() {
        let mut buf = CellBuffer::new(12, 4);
        buf.draw_box(Rect::new(0, 0, 12, 4), BorderStyle::Double, Style::default(), "T");
        assert_eq!(buf.get(0, 0).unwrap().symbol(), "╔");
        assert_eq!(buf.get(11, 3).unwrap().symbol(), "╝");
        assert!(buf.row_text(0).contains(" T "));
        assert_eq!(buf.get(0, 1).unwrap().symbol(), "║");
    }

    #[test]
    fn test_resize_keeps_overlap() {
        let mut buf = CellBuffer::new(4, 2);
        buf.put_str(0, 0, "abcd", Style::default(), 4);
        buf.resize(2, 3);
        assert_eq!(buf.row_text(0), "ab");
        assert_eq!(buf.height(), 3);
    }
}
