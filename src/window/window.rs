//! Window: a bordered frame around one scrollable content widget.
//!
//! The window keeps two [`ScrollRange`]s in its right and bottom border
//! gutters and is responsible for keeping them in agreement with the
//! content after anything that can move it: resizes, keys, clicks, drags
//! and wheel motion.

use super::command::{Command, CommandShell, TABLE_COMMANDS};
use crate::backend::{KeyEvent, MouseEvent, MouseKind, ResizeEvent, ResizeKind};
use crate::layout::Rect;
use crate::screen::{BorderStyle, CellBuffer, Modifiers, Rgb, Style};
use crate::widget::{ContentWidget, ScrollRange, TableConfig, TableWidget, Widget};
use log::trace;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Smallest width a resize may produce.
    pub min_width: u16,
    /// Smallest height a resize may produce.
    pub min_height: u16,
    /// Border and gutter style.
    pub frame_style: Style,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            min_width: 25,
            min_height: 10,
            frame_style: Style::new(Rgb::WHITE, Rgb::BLUE).with_modifiers(Modifiers::BOLD),
        }
    }
}

/// Which scroller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Vertical,
    Horizontal,
}

/// What part of a gutter the pointer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GutterPart {
    BackArrow,
    ForwardArrow,
    TrackBefore,
    TrackAfter,
    Thumb,
}

/// A bordered window hosting a content widget and optional extra children.
pub struct Window {
    title: String,
    bounds: Rect,
    config: WindowConfig,
    content: Box<dyn ContentWidget>,
    children: Vec<Box<dyn Widget>>,
    vertical: ScrollRange,
    horizontal: ScrollRange,
    commands: &'static [Command],
    focused: bool,
    dragging: Option<Axis>,
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("title", &self.title)
            .field("bounds", &self.bounds)
            .field("focused", &self.focused)
            .field("vertical", &self.vertical)
            .field("horizontal", &self.horizontal)
            .finish_non_exhaustive()
    }
}

impl Window {
    /// Create a window at `bounds` (absolute screen coordinates).
    ///
    /// `commands` is the set enabled while this window has focus. The size
    /// is clamped to the configured minimum and the content is fitted to
    /// the interior.
    pub fn new(
        title: impl Into<String>,
        bounds: Rect,
        content: Box<dyn ContentWidget>,
        commands: &'static [Command],
        config: WindowConfig,
    ) -> Self {
        let mut window = Self {
            title: title.into(),
            bounds,
            config,
            content,
            children: Vec::new(),
            vertical: ScrollRange::default(),
            horizontal: ScrollRange::default(),
            commands,
            focused: false,
            dragging: None,
        };
        window.on_resize(&ResizeEvent::widget(bounds.width, bounds.height));
        window
    }

    /// A window around a [`TableWidget`], carrying the table command set.
    pub fn table(title: impl Into<String>, bounds: Rect, table: TableConfig, config: WindowConfig) -> Self {
        let content = TableWidget::new(Rect::ZERO, table);
        Self::new(title, bounds, Box::new(content), TABLE_COMMANDS, config)
    }

    /// Title shown in the top border.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Absolute bounds, border included.
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Move without resizing.
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.bounds = self.bounds.at(x, y);
    }

    /// The area inside the border, in absolute coordinates.
    pub const fn interior(&self) -> Rect {
        Rect::new(
            self.bounds.x.saturating_add(1),
            self.bounds.y.saturating_add(1),
            self.bounds.width.saturating_sub(2),
            self.bounds.height.saturating_sub(2),
        )
    }

    /// The primary content widget.
    pub fn content(&self) -> &dyn ContentWidget {
        self.content.as_ref()
    }

    /// Mutable access to the content. Call [`sync_scrollers`](Self::sync_scrollers)
    /// after scrolling it directly.
    pub fn content_mut(&mut self) -> &mut dyn ContentWidget {
        self.content.as_mut()
    }

    /// Add a child widget. Its bounds are relative to the interior.
    pub fn add_child(&mut self, child: Box<dyn Widget>) {
        self.children.push(child);
    }

    /// Vertical scroller state.
    pub const fn vertical(&self) -> &ScrollRange {
        &self.vertical
    }

    /// Horizontal scroller state.
    pub const fn horizontal(&self) -> &ScrollRange {
        &self.horizontal
    }

    /// Commands enabled while this window has focus.
    pub const fn commands(&self) -> &'static [Command] {
        self.commands
    }

    /// Whether this window has focus.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the window contains an absolute point, border included.
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        self.bounds.contains(x, y)
    }

    /// Apply a resize.
    ///
    /// A widget resize sets this window's size (never below the minimum),
    /// fits the content to the new interior and re-derives both scrollers.
    /// A screen resize is passed on unchanged to the content and then to
    /// every other child.
    pub fn on_resize(&mut self, event: &ResizeEvent) {
        match event.kind {
            ResizeKind::Widget => {
                let width = event.width.max(self.config.min_width);
                let height = event.height.max(self.config.min_height);
                self.bounds = self.bounds.with_size(width, height);

                let inner = ResizeEvent::widget(width.saturating_sub(2), height.saturating_sub(2));
                self.content.on_resize(&inner);
                self.sync_scrollers();
                trace!("window {:?} resized to {:?}", self.title, self.bounds);
            }
            ResizeKind::Screen => {
                self.content.on_resize(event);
                for child in &mut self.children {
                    child.on_resize(event);
                }
            }
        }
    }

    /// Enable this window's commands.
    pub fn on_focus(&mut self, shell: &mut dyn CommandShell) {
        self.focused = true;
        shell.set_commands(self.commands, true);
    }

    /// Disable this window's commands.
    pub fn on_unfocus(&mut self, shell: &mut dyn CommandShell) {
        self.focused = false;
        self.dragging = None;
        shell.set_commands(self.commands, false);
    }

    /// Pointer strictly inside the border.
    pub fn is_over_content(&self, mouse: &MouseEvent) -> bool {
        let b = self.bounds;
        let (x, y) = (u32::from(mouse.abs_x), u32::from(mouse.abs_y));
        x > u32::from(b.x)
            && x + 1 < u32::from(b.x) + u32::from(b.width)
            && y > u32::from(b.y)
            && y + 1 < u32::from(b.y) + u32::from(b.height)
    }

    /// Pointer on the right border, within the interior rows.
    pub const fn is_over_vertical_scroller(&self, mouse: &MouseEvent) -> bool {
        self.vertical_gutter().contains(mouse.abs_x, mouse.abs_y)
    }

    /// Pointer on the bottom border, within the interior columns.
    pub const fn is_over_horizontal_scroller(&self, mouse: &MouseEvent) -> bool {
        self.horizontal_gutter().contains(mouse.abs_x, mouse.abs_y)
    }

    const fn vertical_gutter(&self) -> Rect {
        let interior = self.interior();
        Rect::new(interior.right(), interior.y, 1, interior.height)
    }

    const fn horizontal_gutter(&self) -> Rect {
        let interior = self.interior();
        Rect::new(interior.x, interior.bottom(), interior.width, 1)
    }

    /// Re-derive both scroller ranges from the content's extents.
    pub fn sync_scrollers(&mut self) {
        let (rows, columns) = self.content.page_size();
        self.vertical.set_range(0, self.content.max_row());
        self.vertical.set_value(self.content.visible_row());
        self.vertical.set_big_change(rows);
        self.horizontal.set_range(0, self.content.max_column());
        self.horizontal.set_value(self.content.visible_column());
        self.horizontal.set_big_change(columns);
    }

    /// A button was pressed.
    pub fn on_mouse_down(&mut self, mouse: &MouseEvent) {
        self.deliver_to_children(mouse);
        if self.is_over_content(mouse) {
            self.sync_scrollers();
            return;
        }

        let Some(axis) = self.gutter_under(mouse) else {
            return;
        };
        if mouse.is_wheel_up() {
            self.scroll(axis, ScrollRange::decrement);
        } else if mouse.is_wheel_down() {
            self.scroll(axis, ScrollRange::increment);
        } else if mouse.is_left() {
            match self.gutter_part(axis, mouse) {
                GutterPart::BackArrow => self.scroll(axis, ScrollRange::decrement),
                GutterPart::ForwardArrow => self.scroll(axis, ScrollRange::increment),
                GutterPart::TrackBefore => self.scroll(axis, ScrollRange::big_decrement),
                GutterPart::TrackAfter => self.scroll(axis, ScrollRange::big_increment),
                GutterPart::Thumb => self.dragging = Some(axis),
            }
        }
    }

    /// A button was released.
    pub fn on_mouse_up(&mut self, mouse: &MouseEvent) {
        self.deliver_to_children(mouse);
        self.dragging = None;
        if self.is_over_content(mouse) {
            self.sync_scrollers();
        }
    }

    /// The pointer moved.
    pub fn on_mouse_motion(&mut self, mouse: &MouseEvent) {
        self.deliver_to_children(mouse);
        if let Some(axis) = self.dragging {
            if mouse.is_left() {
                let (offset, track_len) = self.track_position(axis, mouse);
                let range = self.range(axis);
                let value = range.value_at(offset, track_len);
                self.scroll(axis, |range| range.set_value(value));
                return;
            }
            self.dragging = None;
        }
        if self.is_over_content(mouse) {
            self.sync_scrollers();
        }
    }

    /// A key was pressed while this window had focus.
    pub fn on_keypress(&mut self, key: &KeyEvent) {
        self.content.on_keypress(key);
        self.sync_scrollers();
    }

    /// Draw the frame, the content, the children and both gutters.
    pub fn draw(&self, buffer: &mut CellBuffer) {
        let border = if self.focused {
            BorderStyle::Double
        } else {
            BorderStyle::Single
        };
        let style = self.config.frame_style;
        buffer.fill_rect(self.bounds, style);
        buffer.draw_box(self.bounds, border, style, &self.title);

        let interior = self.interior();
        self.content.draw(buffer, interior.to_outer(self.content.bounds()));
        for child in &self.children {
            child.draw(buffer, interior.to_outer(child.bounds()));
        }

        self.draw_gutter(buffer, Axis::Vertical);
        self.draw_gutter(buffer, Axis::Horizontal);
    }

    fn draw_gutter(&self, buffer: &mut CellBuffer, axis: Axis) {
        let (gutter, back, forward) = match axis {
            Axis::Vertical => (self.vertical_gutter(), "▲", "▼"),
            Axis::Horizontal => (self.horizontal_gutter(), "◄", "►"),
        };
        let len = gutter_len(axis, gutter);
        if len < 2 {
            return;
        }
        let style = self.config.frame_style;
        let thumb = self.range(axis).thumb_offset(usize::from(len - 2));
        for offset in 0..len {
            let glyph = if offset == 0 {
                back
            } else if offset == len - 1 {
                forward
            } else if usize::from(offset - 1) == thumb {
                "■"
            } else {
                "░"
            };
            let (x, y) = match axis {
                Axis::Vertical => (gutter.x, gutter.y + offset),
                Axis::Horizontal => (gutter.x + offset, gutter.y),
            };
            buffer.put_str(x, y, glyph, style, 1);
        }
    }

    fn deliver_to_children(&mut self, mouse: &MouseEvent) {
        let interior = self.interior();
        deliver(self.content.as_mut(), interior, mouse);
        for child in &mut self.children {
            deliver(child.as_mut(), interior, mouse);
        }
    }

    fn gutter_under(&self, mouse: &MouseEvent) -> Option<Axis> {
        if self.is_over_vertical_scroller(mouse) {
            Some(Axis::Vertical)
        } else if self.is_over_horizontal_scroller(mouse) {
            Some(Axis::Horizontal)
        } else {
            None
        }
    }

    const fn range(&self, axis: Axis) -> &ScrollRange {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    /// Pointer position along the gutter, relative to its start.
    const fn gutter_offset(&self, axis: Axis, mouse: &MouseEvent) -> (u16, u16) {
        match axis {
            Axis::Vertical => {
                let gutter = self.vertical_gutter();
                (mouse.abs_y.saturating_sub(gutter.y), gutter.height)
            }
            Axis::Horizontal => {
                let gutter = self.horizontal_gutter();
                (mouse.abs_x.saturating_sub(gutter.x), gutter.width)
            }
        }
    }

    /// Pointer position along the track between the arrows, and the track length.
    fn track_position(&self, axis: Axis, mouse: &MouseEvent) -> (usize, usize) {
        let (offset, len) = self.gutter_offset(axis, mouse);
        let track_len = usize::from(len.saturating_sub(2));
        let offset = usize::from(offset.saturating_sub(1)).min(track_len.saturating_sub(1));
        (offset, track_len)
    }

    fn gutter_part(&self, axis: Axis, mouse: &MouseEvent) -> GutterPart {
        let (offset, len) = self.gutter_offset(axis, mouse);
        if offset == 0 {
            return GutterPart::BackArrow;
        }
        if offset + 1 >= len {
            return GutterPart::ForwardArrow;
        }
        let track_len = usize::from(len - 2);
        let thumb = self.range(axis).thumb_offset(track_len);
        match usize::from(offset - 1).cmp(&thumb) {
            std::cmp::Ordering::Less => GutterPart::TrackBefore,
            std::cmp::Ordering::Greater => GutterPart::TrackAfter,
            std::cmp::Ordering::Equal => GutterPart::Thumb,
        }
    }

    /// Move one scroller, push the value to the content, then re-derive
    /// both ranges so they only ever hold values the content accepted.
    fn scroll(&mut self, axis: Axis, apply: impl FnOnce(&mut ScrollRange)) {
        let range = match axis {
            Axis::Vertical => &mut self.vertical,
            Axis::Horizontal => &mut self.horizontal,
        };
        apply(range);
        let value = range.value();
        match axis {
            Axis::Vertical => self.content.set_visible_row(value),
            Axis::Horizontal => self.content.set_visible_column(value),
        }
        self.sync_scrollers();
    }
}

const fn gutter_len(axis: Axis, gutter: Rect) -> u16 {
    match axis {
        Axis::Vertical => gutter.height,
        Axis::Horizontal => gutter.width,
    }
}

/// Hand a mouse event to `widget` if the pointer is inside it.
fn deliver<W: Widget + ?Sized>(widget: &mut W, interior: Rect, mouse: &MouseEvent) {
    let area = interior.to_outer(widget.bounds());
    if !area.contains(mouse.abs_x, mouse.abs_y) {
        return;
    }
    let local = mouse.relative_to(area.x, area.y);
    match mouse.kind {
        MouseKind::Down => widget.on_mouse_down(&local),
        MouseKind::Up => widget.on_mouse_up(&local),
        MouseKind::Motion => widget.on_mouse_motion(&local),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{KeyCode, MouseButtons};
    use crate::window::CommandRegistry;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn table_window(x: u16, y: u16, width: u16, height: u16) -> Window {
        Window::table(
            "Sheet",
            Rect::new(x, y, width, height),
            TableConfig::default(),
            WindowConfig::default(),
        )
    }

    fn press(x: u16, y: u16, buttons: MouseButtons) -> MouseEvent {
        MouseEvent::new(MouseKind::Down, x, y, buttons)
    }

    fn assert_synced(window: &Window) {
        let content = window.content();
        assert_eq!(window.vertical().max(), content.max_row());
        assert_eq!(window.vertical().value(), content.visible_row());
        assert_eq!(window.horizontal().max(), content.max_column());
        assert_eq!(window.horizontal().value(), content.visible_column());
    }

    /// Records what it receives.
    #[derive(Default)]
    struct Probe {
        bounds: Rect,
        resizes: Rc<RefCell<Vec<ResizeEvent>>>,
        presses: Rc<RefCell<Vec<(u16, u16)>>>,
    }

    impl Widget for Probe {
        fn bounds(&self) -> Rect {
            self.bounds
        }

        fn set_bounds(&mut self, bounds: Rect) {
            self.bounds = bounds;
        }

        fn draw(&self, _buffer: &mut CellBuffer, _area: Rect) {}

        fn on_resize(&mut self, event: &ResizeEvent) {
            self.resizes.borrow_mut().push(*event);
        }

        fn on_mouse_down(&mut self, mouse: &MouseEvent) {
            self.presses.borrow_mut().push((mouse.x, mouse.y));
        }
    }

    #[test]
    fn test_resize_cascades_to_content() {
        let mut window = table_window(0, 0, 40, 20);
        assert_eq!(window.content().bounds().width, 38);
        assert_eq!(window.content().bounds().height, 18);

        window.on_resize(&ResizeEvent::widget(50, 24));
        assert_eq!(window.bounds(), Rect::new(0, 0, 50, 24));
        assert_eq!(window.content().bounds().width, 48);
        assert_eq!(window.content().bounds().height, 22);
        assert_eq!(window.vertical().max(), 79);
        assert_eq!(window.horizontal().max(), 21);
        assert_synced(&window);
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut window = table_window(0, 0, 40, 20);
        window.on_resize(&ResizeEvent::widget(10, 3));
        assert_eq!(window.bounds(), Rect::new(0, 0, 25, 10));
        assert_eq!(window.content().bounds().width, 23);
        assert_eq!(window.content().bounds().height, 8);
        assert_synced(&window);
    }

    #[test]
    fn test_screen_resize_forwarded_unchanged() {
        let mut window = table_window(0, 0, 40, 20);
        let probe = Probe {
            bounds: Rect::new(0, 0, 5, 1),
            ..Probe::default()
        };
        let resizes = Rc::clone(&probe.resizes);
        window.add_child(Box::new(probe));

        window.on_resize(&ResizeEvent::screen(132, 43));
        assert_eq!(window.bounds(), Rect::new(0, 0, 40, 20));
        assert_eq!(*resizes.borrow(), vec![ResizeEvent::screen(132, 43)]);

        window.on_resize(&ResizeEvent::widget(60, 30));
        assert_eq!(resizes.borrow().len(), 1);
    }

    #[test]
    fn test_is_over_content_excludes_border() {
        let window = table_window(5, 5, 40, 20);
        let at = |x, y| window.is_over_content(&press(x, y, MouseButtons::LEFT));
        assert!(!at(5, 10));
        assert!(at(6, 10));
        assert!(at(43, 10));
        assert!(!at(44, 10));
        assert!(!at(10, 5));
        assert!(at(10, 6));
        assert!(at(10, 23));
        assert!(!at(10, 24));
        assert!(!at(0, 0));
    }

    #[test]
    fn test_scroller_gutters_on_border() {
        let window = table_window(0, 0, 40, 20);
        assert!(window.is_over_vertical_scroller(&press(39, 5, MouseButtons::LEFT)));
        assert!(!window.is_over_vertical_scroller(&press(39, 0, MouseButtons::LEFT)));
        assert!(!window.is_over_vertical_scroller(&press(39, 19, MouseButtons::LEFT)));
        assert!(window.is_over_horizontal_scroller(&press(10, 19, MouseButtons::LEFT)));
        assert!(!window.is_over_horizontal_scroller(&press(39, 19, MouseButtons::LEFT)));
    }

    #[test]
    fn test_motion_over_content_resyncs() {
        let mut window = table_window(0, 0, 40, 20);
        window.content_mut().set_visible_row(40);
        assert_eq!(window.vertical().value(), 0);

        window.on_mouse_motion(&MouseEvent::new(MouseKind::Motion, 10, 10, MouseButtons::empty()));
        assert_eq!(window.vertical().value(), 40);
        assert_synced(&window);
    }

    #[test]
    fn test_left_drag_over_content_resyncs() {
        let mut window = table_window(0, 0, 40, 20);
        window.content_mut().set_visible_row(25);
        window.content_mut().set_visible_column(7);
        assert_eq!(window.vertical().value(), 0);
        assert_eq!(window.horizontal().value(), 0);

        window.on_mouse_motion(&MouseEvent::new(MouseKind::Motion, 10, 10, MouseButtons::LEFT));
        assert_eq!(window.vertical().value(), 25);
        assert_eq!(window.horizontal().value(), 7);
        assert_synced(&window);
    }

    #[test]
    fn test_drag_selects_within_viewport() {
        let mut window = table_window(0, 0, 40, 20);
        window.on_mouse_down(&press(10, 3, MouseButtons::LEFT));
        window.on_mouse_motion(&MouseEvent::new(MouseKind::Motion, 22, 18, MouseButtons::LEFT));
        window.on_mouse_up(&MouseEvent::new(MouseKind::Up, 22, 18, MouseButtons::LEFT));
        assert_eq!(window.vertical().value(), 0);
        assert_synced(&window);
    }

    #[test]
    fn test_keys_resync() {
        let mut window = table_window(0, 0, 40, 20);
        window.on_keypress(&KeyEvent::new(KeyCode::PageDown));
        window.on_keypress(&KeyEvent::new(KeyCode::PageDown));
        assert_eq!(window.vertical().value(), window.content().visible_row());
        assert!(window.vertical().value() > 0);
    }

    #[test]
    fn test_vertical_gutter_arrows_and_track() {
        let mut window = table_window(0, 0, 40, 20);
        // Gutter runs y = 1..=18: arrows at both ends, track of 16 between.
        window.on_mouse_down(&press(39, 18, MouseButtons::LEFT));
        assert_eq!(window.vertical().value(), 1);
        assert_eq!(window.content().visible_row(), 1);

        window.on_mouse_down(&press(39, 1, MouseButtons::LEFT));
        assert_eq!(window.vertical().value(), 0);

        window.on_mouse_down(&press(39, 12, MouseButtons::LEFT));
        assert_eq!(window.vertical().value(), 17);
        assert_synced(&window);
    }

    #[test]
    fn test_wheel_on_gutter_steps() {
        let mut window = table_window(0, 0, 40, 20);
        window.on_mouse_down(&press(39, 8, MouseButtons::WHEEL_DOWN));
        window.on_mouse_down(&press(39, 8, MouseButtons::WHEEL_DOWN));
        assert_eq!(window.vertical().value(), 2);
        window.on_mouse_down(&press(20, 19, MouseButtons::WHEEL_DOWN));
        assert_eq!(window.horizontal().value(), 1);
        assert_synced(&window);
    }

    #[test]
    fn test_thumb_drag() {
        let mut window = table_window(0, 0, 40, 20);
        window.on_mouse_down(&press(39, 2, MouseButtons::LEFT));
        window.on_mouse_motion(&MouseEvent::new(MouseKind::Motion, 20, 17, MouseButtons::LEFT));
        assert_eq!(window.vertical().value(), window.vertical().max());
        assert_eq!(window.content().visible_row(), window.content().max_row());

        window.on_mouse_up(&MouseEvent::new(MouseKind::Up, 20, 17, MouseButtons::LEFT));
        window.on_mouse_motion(&MouseEvent::new(MouseKind::Motion, 39, 2, MouseButtons::LEFT));
        assert_eq!(window.vertical().value(), window.vertical().max());
    }

    #[test]
    fn test_wheel_over_content_scrolls() {
        let mut window = table_window(0, 0, 40, 20);
        window.on_mouse_down(&press(10, 10, MouseButtons::WHEEL_DOWN));
        assert_eq!(window.content().visible_row(), 3);
        assert_synced(&window);
    }

    #[test]
    fn test_children_get_relative_coordinates() {
        let mut window = table_window(10, 5, 40, 20);
        let probe = Probe {
            bounds: Rect::new(2, 3, 6, 2),
            ..Probe::default()
        };
        let presses = Rc::clone(&probe.presses);
        window.add_child(Box::new(probe));

        window.on_mouse_down(&press(14, 9, MouseButtons::LEFT));
        window.on_mouse_down(&press(30, 9, MouseButtons::LEFT));
        assert_eq!(*presses.borrow(), vec![(1, 0)]);
    }

    #[test]
    fn test_focus_toggles_command_set() {
        let mut registry = CommandRegistry::new();
        let mut window = table_window(0, 0, 40, 20);
        window.on_focus(&mut registry);
        assert!(window.is_focused());
        assert_eq!(registry.enabled_count(), TABLE_COMMANDS.len());
        window.on_unfocus(&mut registry);
        assert!(!window.is_focused());
        assert_eq!(registry.enabled_count(), 0);
    }

    #[test]
    fn test_draw_frame() {
        let mut window = table_window(0, 0, 30, 10);
        let mut buffer = CellBuffer::new(30, 10);
        window.draw(&mut buffer);
        assert!(buffer.row_text(0).starts_with('┌'));
        assert!(buffer.row_text(0).contains("Sheet"));
        assert!(buffer.row_text(1).ends_with('▲'));
        assert!(buffer.row_text(9).contains('►'));

        window.on_focus(&mut CommandRegistry::new());
        window.draw(&mut buffer);
        assert!(buffer.row_text(0).starts_with('╔'));
    }
}
