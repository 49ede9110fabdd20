//! Input event types delivered by the backend.
//!
//! These are produced by the decoder thread, queued in arrival order, and
//! handed to the application loop by [`Backend::get_events`](super::Backend::get_events).

use bitflags::bitflags;

/// Key codes for keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Tab key.
    Tab,
    /// Backtab (Shift+Tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Check if any modifier is active.
    pub const fn any(&self) -> bool {
        self.shift || self.control || self.alt
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers held during the key press.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// A key press without modifiers.
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

bitflags! {
    /// Buttons (and wheel directions) involved in a mouse event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        /// Left button.
        const LEFT = 0b0000_0001;
        /// Middle button.
        const MIDDLE = 0b0000_0010;
        /// Right button.
        const RIGHT = 0b0000_0100;
        /// Wheel scrolled up.
        const WHEEL_UP = 0b0000_1000;
        /// Wheel scrolled down.
        const WHEEL_DOWN = 0b0001_0000;
    }
}

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseKind {
    /// A button was pressed (wheel motion arrives as a press).
    Down,
    /// A button was released.
    Up,
    /// The pointer moved, possibly with buttons held (a drag).
    Motion,
}

/// A mouse event.
///
/// `abs_x`/`abs_y` are screen coordinates and never change while the event
/// travels down the widget tree. `x`/`y` are relative to whichever widget is
/// currently looking at the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Press, release or motion.
    pub kind: MouseKind,
    /// Column relative to the receiving widget.
    pub x: u16,
    /// Row relative to the receiving widget.
    pub y: u16,
    /// Absolute screen column.
    pub abs_x: u16,
    /// Absolute screen row.
    pub abs_y: u16,
    /// Buttons involved.
    pub buttons: MouseButtons,
    /// Key modifiers held during the mouse event.
    pub modifiers: KeyModifiers,
}

impl MouseEvent {
    /// Create an event at an absolute screen position.
    pub const fn new(kind: MouseKind, abs_x: u16, abs_y: u16, buttons: MouseButtons) -> Self {
        Self {
            kind,
            x: abs_x,
            y: abs_y,
            abs_x,
            abs_y,
            buttons,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Copy of this event with coordinates relative to a widget at `(origin_x, origin_y)`.
    #[must_use]
    pub const fn relative_to(&self, origin_x: u16, origin_y: u16) -> Self {
        let mut event = *self;
        event.x = self.abs_x.saturating_sub(origin_x);
        event.y = self.abs_y.saturating_sub(origin_y);
        event
    }

    /// Left button involved.
    pub const fn is_left(&self) -> bool {
        self.buttons.contains(MouseButtons::LEFT)
    }

    /// Wheel scrolled up.
    pub const fn is_wheel_up(&self) -> bool {
        self.buttons.contains(MouseButtons::WHEEL_UP)
    }

    /// Wheel scrolled down.
    pub const fn is_wheel_down(&self) -> bool {
        self.buttons.contains(MouseButtons::WHEEL_DOWN)
    }
}

/// Whose geometry a resize event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeKind {
    /// The terminal itself changed size.
    Screen,
    /// A specific widget or window was resized.
    Widget,
}

/// A resize notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    /// Screen or widget resize.
    pub kind: ResizeKind,
    /// New width in columns.
    pub width: u16,
    /// New height in rows.
    pub height: u16,
}

impl ResizeEvent {
    /// The terminal changed to `width` x `height`.
    pub const fn screen(width: u16, height: u16) -> Self {
        Self {
            kind: ResizeKind::Screen,
            width,
            height,
        }
    }

    /// A widget was resized to `width` x `height`.
    pub const fn widget(width: u16, height: u16) -> Self {
        Self {
            kind: ResizeKind::Widget,
            width,
            height,
        }
    }
}

/// Events from the decoder thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key(KeyEvent),
    /// Mouse press, release or motion.
    Mouse(MouseEvent),
    /// Terminal or widget resize.
    Resize(ResizeEvent),
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self::Key(event)
    }
}

impl From<MouseEvent> for InputEvent {
    fn from(event: MouseEvent) -> Self {
        Self::Mouse(event)
    }
}

impl From<ResizeEvent> for InputEvent {
    fn from(event: ResizeEvent) -> Self {
        Self::Resize(event)
    }
}
