//! Widget traits.
//!
//! Every handler has a no-op default, so a widget only implements the
//! capabilities it has. Parents dispatch to children in an explicit order;
//! there is no implicit bubbling.

use crate::backend::{KeyEvent, MouseEvent, ResizeEvent, ResizeKind};
use crate::layout::Rect;
use crate::screen::CellBuffer;

/// A UI component inside a window.
pub trait Widget {
    /// Bounds relative to the parent's interior.
    fn bounds(&self) -> Rect;

    /// Move or resize the widget.
    fn set_bounds(&mut self, bounds: Rect);

    /// Draw into `buffer`, where `area` is this widget's absolute rectangle.
    fn draw(&self, buffer: &mut CellBuffer, area: Rect);

    /// Handle a resize.
    ///
    /// By default a widget-level resize sets this widget's size and a
    /// screen-level resize is ignored.
    fn on_resize(&mut self, event: &ResizeEvent) {
        if event.kind == ResizeKind::Widget {
            let bounds = self.bounds().with_size(event.width, event.height);
            self.set_bounds(bounds);
        }
    }

    /// A button was pressed over this widget. Coordinates are relative to it.
    fn on_mouse_down(&mut self, _mouse: &MouseEvent) {}

    /// A button was released over this widget.
    fn on_mouse_up(&mut self, _mouse: &MouseEvent) {}

    /// The pointer moved over this widget.
    fn on_mouse_motion(&mut self, _mouse: &MouseEvent) {}

    /// A key was pressed while this widget had focus.
    fn on_keypress(&mut self, _key: &KeyEvent) {}
}

/// A widget whose content can scroll, and that reports its extents so the
/// owning window can keep its scrollers in sync.
///
/// Positions are scroll origins: `visible_row` is the first row shown and
/// `max_row` the largest origin that still fills the viewport.
pub trait ContentWidget: Widget {
    /// Largest legal vertical origin.
    fn max_row(&self) -> usize;

    /// Largest legal horizontal origin.
    fn max_column(&self) -> usize;

    /// Current vertical origin.
    fn visible_row(&self) -> usize;

    /// Current horizontal origin.
    fn visible_column(&self) -> usize;

    /// Rows and columns shown at once; scrollers page by this much.
    fn page_size(&self) -> (usize, usize);

    /// Scroll vertically. Values past `max_row` are clamped.
    fn set_visible_row(&mut self, row: usize);

    /// Scroll horizontally. Values past `max_column` are clamped.
    fn set_visible_column(&mut self, column: usize);
}
