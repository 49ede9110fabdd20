//! Table widget: a scrollable grid of text cells with row and column labels.
//!
//! The table owns the selection and the scroll origin. It reports its
//! extents through [`ContentWidget`] so the window around it can keep its
//! scrollers in step. Cell contents are set programmatically; there is no
//! in-place editing.

use super::traits::{ContentWidget, Widget};
use crate::backend::{KeyCode, KeyEvent, MouseEvent, ResizeEvent, ResizeKind};
use crate::layout::Rect;
use crate::screen::{CellBuffer, Modifiers, Rgb, Style};
use std::collections::HashMap;

/// Rows scrolled per wheel notch.
const WHEEL_STEP: usize = 3;

/// Configuration for the table widget.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
    /// Width of every column, in cells.
    pub column_width: u16,
    /// Cell text style.
    pub style: Style,
    /// Row/column label style.
    pub label_style: Style,
    /// Style of the selected row/column band.
    pub highlight_style: Style,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            columns: 26,
            column_width: 8,
            style: Style::new(Rgb::LIGHT_GRAY, Rgb::BLUE),
            label_style: Style::new(Rgb::YELLOW, Rgb::BLUE).with_modifiers(Modifiers::BOLD),
            highlight_style: Style::new(Rgb::WHITE, Rgb::CYAN),
        }
    }
}

/// Spreadsheet-style label for a zero-based column: A..Z, AA, AB, ...
pub fn column_label(mut column: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + u8::try_from(column % 26).unwrap_or(0));
        if column < 26 {
            break;
        }
        column = column / 26 - 1;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// A grid of text cells.
#[derive(Debug)]
pub struct TableWidget {
    bounds: Rect,
    config: TableConfig,
    cells: HashMap<(usize, usize), String>,
    selected_row: usize,
    selected_column: usize,
    top_row: usize,
    left_column: usize,
    show_row_labels: bool,
    show_column_labels: bool,
    highlight_row: bool,
    highlight_column: bool,
}

impl TableWidget {
    /// Create an empty table occupying `bounds`.
    pub fn new(bounds: Rect, config: TableConfig) -> Self {
        Self {
            bounds,
            config,
            cells: HashMap::new(),
            selected_row: 0,
            selected_column: 0,
            top_row: 0,
            left_column: 0,
            show_row_labels: true,
            show_column_labels: true,
            highlight_row: false,
            highlight_column: false,
        }
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.config.rows
    }

    /// Number of columns.
    pub const fn columns(&self) -> usize {
        self.config.columns
    }

    /// Selected `(row, column)`.
    pub const fn selected(&self) -> (usize, usize) {
        (self.selected_row, self.selected_column)
    }

    /// Set the text of a cell. Out-of-range cells are ignored.
    pub fn set_text(&mut self, row: usize, column: usize, text: impl Into<String>) {
        if row < self.config.rows && column < self.config.columns {
            self.cells.insert((row, column), text.into());
        }
    }

    /// Text of a cell, empty if never set.
    pub fn text(&self, row: usize, column: usize) -> &str {
        self.cells.get(&(row, column)).map_or("", String::as_str)
    }

    /// Select a cell and scroll it into view.
    pub fn select(&mut self, row: usize, column: usize) {
        self.selected_row = row.min(self.config.rows.saturating_sub(1));
        self.selected_column = column.min(self.config.columns.saturating_sub(1));
        self.ensure_selection_visible();
    }

    /// Show or hide the row label gutter.
    pub fn set_show_row_labels(&mut self, show: bool) {
        self.show_row_labels = show;
        self.clamp_origin();
    }

    /// Show or hide the column label header.
    pub fn set_show_column_labels(&mut self, show: bool) {
        self.show_column_labels = show;
        self.clamp_origin();
    }

    /// Band the selected row.
    pub fn set_highlight_row(&mut self, highlight: bool) {
        self.highlight_row = highlight;
    }

    /// Band the selected column.
    pub fn set_highlight_column(&mut self, highlight: bool) {
        self.highlight_column = highlight;
    }

    fn label_width(&self) -> u16 {
        if !self.show_row_labels {
            return 0;
        }
        let digits = self.config.rows.max(1).to_string().len();
        u16::try_from(digits + 1).unwrap_or(u16::MAX)
    }

    const fn header_height(&self) -> u16 {
        if self.show_column_labels {
            1
        } else {
            0
        }
    }

    /// Rows that fit in the viewport.
    pub fn visible_rows(&self) -> usize {
        usize::from(self.bounds.height.saturating_sub(self.header_height()))
    }

    /// Whole columns that fit in the viewport.
    pub fn visible_columns(&self) -> usize {
        let width = self.bounds.width.saturating_sub(self.label_width());
        usize::from(width / self.config.column_width.max(1))
    }

    fn clamp_origin(&mut self) {
        self.top_row = self.top_row.min(self.max_row());
        self.left_column = self.left_column.min(self.max_column());
    }

    fn ensure_selection_visible(&mut self) {
        let rows = self.visible_rows().max(1);
        if self.selected_row < self.top_row {
            self.top_row = self.selected_row;
        } else if self.selected_row >= self.top_row + rows {
            self.top_row = self.selected_row + 1 - rows;
        }

        let columns = self.visible_columns().max(1);
        if self.selected_column < self.left_column {
            self.left_column = self.selected_column;
        } else if self.selected_column >= self.left_column + columns {
            self.left_column = self.selected_column + 1 - columns;
        }
        self.clamp_origin();
    }

    /// The cell under a point relative to this widget, if any.
    fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        let header = self.header_height();
        let labels = self.label_width();
        if x < labels || y < header || x >= self.bounds.width || y >= self.bounds.height {
            return None;
        }
        let row = self.top_row + usize::from(y - header);
        let column = self.left_column + usize::from((x - labels) / self.config.column_width.max(1));
        (row < self.config.rows && column < self.config.columns).then_some((row, column))
    }

    fn move_selection(&mut self, rows: isize, columns: isize) {
        let row = self.selected_row.saturating_add_signed(rows);
        let column = self.selected_column.saturating_add_signed(columns);
        self.select(row, column);
    }

    fn cell_style(&self, row: usize, column: usize) -> Style {
        if (row, column) == self.selected() {
            return self.config.style.with_modifiers(Modifiers::REVERSED);
        }
        if (self.highlight_row && row == self.selected_row)
            || (self.highlight_column && column == self.selected_column)
        {
            return self.config.highlight_style;
        }
        self.config.style
    }
}

impl Widget for TableWidget {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.clamp_origin();
    }

    fn draw(&self, buffer: &mut CellBuffer, area: Rect) {
        buffer.fill_rect(area, self.config.style);

        let header = self.header_height();
        let labels = self.label_width();
        let column_width = self.config.column_width.max(1);
        let right = area.right();

        if header > 0 {
            let mut x = area.x + labels;
            let mut column = self.left_column;
            while x < right && column < self.config.columns {
                let style = if column == self.selected_column {
                    self.config.label_style.with_modifiers(Modifiers::REVERSED)
                } else {
                    self.config.label_style
                };
                let label = format!("{:^width$}", column_label(column), width = usize::from(column_width));
                buffer.put_str(x, area.y, &label, style, right - x);
                x = x.saturating_add(column_width);
                column += 1;
            }
        }

        for offset in 0..self.visible_rows() {
            let row = self.top_row + offset;
            if row >= self.config.rows {
                break;
            }
            let Ok(dy) = u16::try_from(offset) else {
                break;
            };
            let y = area.y + header + dy;

            if labels > 0 {
                let label = format!("{:>width$} ", row + 1, width = usize::from(labels - 1));
                buffer.put_str(area.x, y, &label, self.config.label_style, labels.min(area.width));
            }

            let mut x = area.x + labels;
            let mut column = self.left_column;
            while x < right && column < self.config.columns {
                let style = self.cell_style(row, column);
                let span = column_width.min(right - x);
                buffer.fill_rect(Rect::new(x, y, span, 1), style);
                buffer.put_str(x, y, self.text(row, column), style, span.saturating_sub(1));
                x = x.saturating_add(column_width);
                column += 1;
            }
        }
    }

    fn on_resize(&mut self, event: &ResizeEvent) {
        if event.kind == ResizeKind::Widget {
            self.set_bounds(self.bounds.with_size(event.width, event.height));
        }
    }

    fn on_mouse_down(&mut self, mouse: &MouseEvent) {
        if mouse.is_wheel_up() {
            self.set_visible_row(self.top_row.saturating_sub(WHEEL_STEP));
        } else if mouse.is_wheel_down() {
            self.set_visible_row(self.top_row + WHEEL_STEP);
        } else if mouse.is_left() {
            if let Some((row, column)) = self.cell_at(mouse.x, mouse.y) {
                self.select(row, column);
            }
        }
    }

    fn on_mouse_motion(&mut self, mouse: &MouseEvent) {
        if mouse.is_left() {
            if let Some((row, column)) = self.cell_at(mouse.x, mouse.y) {
                self.select(row, column);
            }
        }
    }

    fn on_keypress(&mut self, key: &KeyEvent) {
        let page = isize::try_from(self.visible_rows().max(1)).unwrap_or(isize::MAX);
        match key.code {
            KeyCode::Up => self.move_selection(-1, 0),
            KeyCode::Down | KeyCode::Enter => self.move_selection(1, 0),
            KeyCode::Left | KeyCode::BackTab => self.move_selection(0, -1),
            KeyCode::Right | KeyCode::Tab => self.move_selection(0, 1),
            KeyCode::PageUp => self.move_selection(-page, 0),
            KeyCode::PageDown => self.move_selection(page, 0),
            KeyCode::Home if key.modifiers.control => self.select(0, 0),
            KeyCode::End if key.modifiers.control => self.select(usize::MAX, usize::MAX),
            KeyCode::Home => self.select(self.selected_row, 0),
            KeyCode::End => self.select(self.selected_row, usize::MAX),
            _ => {}
        }
    }
}

impl ContentWidget for TableWidget {
    fn max_row(&self) -> usize {
        self.config.rows.saturating_sub(self.visible_rows())
    }

    fn max_column(&self) -> usize {
        self.config.columns.saturating_sub(self.visible_columns())
    }

    fn visible_row(&self) -> usize {
        self.top_row
    }

    fn visible_column(&self) -> usize {
        self.left_column
    }

    fn page_size(&self) -> (usize, usize) {
        (self.visible_rows(), self.visible_columns())
    }

    fn set_visible_row(&mut self, row: usize) {
        self.top_row = row.min(self.max_row());
    }

    fn set_visible_column(&mut self, column: usize) {
        self.left_column = column.min(self.max_column());
    }
}
