//! Desktop: the z-ordered window stack and input routing.

use super::command::CommandRegistry;
use super::window::Window;
use crate::backend::{InputEvent, MouseEvent, MouseKind, ResizeKind};
use crate::screen::{CellBuffer, Rgb, Style};
use log::debug;

/// Owns every window and decides which one sees each event.
///
/// Windows are stored bottom to top. The focused window is always the
/// topmost one.
#[derive(Debug)]
pub struct Desktop {
    windows: Vec<Window>,
    focused: Option<usize>,
    commands: CommandRegistry,
    width: u16,
    height: u16,
    background: Style,
    /// A press landed in the focused window and the button is still down.
    captured: bool,
}

impl Desktop {
    /// An empty desktop of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            windows: Vec::new(),
            focused: None,
            commands: CommandRegistry::new(),
            width,
            height,
            background: Style::new(Rgb::LIGHT_GRAY, Rgb::BLACK),
            captured: false,
        }
    }

    /// Desktop size.
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Windows, bottom to top.
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// The focused window.
    pub fn focused(&self) -> Option<&Window> {
        self.focused.and_then(|index| self.windows.get(index))
    }

    /// Mutable access to the focused window.
    pub fn focused_mut(&mut self) -> Option<&mut Window> {
        self.focused.and_then(|index| self.windows.get_mut(index))
    }

    /// Which commands are enabled right now.
    pub const fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Add a window on top and give it focus.
    pub fn add_window(&mut self, window: Window) {
        self.windows.push(window);
        self.activate(self.windows.len() - 1);
    }

    /// Focus the window at `index`, raising it to the top.
    ///
    /// The previous window's commands are disabled before the new one's
    /// are enabled, so exactly one window's set is live afterwards.
    pub fn activate(&mut self, index: usize) {
        if index >= self.windows.len() {
            return;
        }
        if let Some(previous) = self.focused.take() {
            if previous == index {
                self.focused = Some(previous);
                return;
            }
            if let Some(window) = self.windows.get_mut(previous) {
                window.on_unfocus(&mut self.commands);
            }
        }

        let window = self.windows.remove(index);
        self.windows.push(window);
        let top = self.windows.len() - 1;
        self.windows[top].on_focus(&mut self.commands);
        self.focused = Some(top);
        self.captured = false;
        debug!("focused window {:?}", self.windows[top].title());
    }

    /// Focus the bottom-most window, cycling through the stack.
    pub fn focus_next(&mut self) {
        if self.windows.len() > 1 {
            self.activate(0);
        }
    }

    /// Route one event.
    ///
    /// - Screen resize: every window.
    /// - Keys and widget resizes: the focused window.
    /// - Mouse: the topmost window under the pointer. A press focuses that
    ///   window first, and until release the focused window keeps
    ///   receiving the pointer even when it leaves the window.
    pub fn dispatch(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Resize(resize) if resize.kind == ResizeKind::Screen => {
                self.width = resize.width;
                self.height = resize.height;
                for window in &mut self.windows {
                    window.on_resize(resize);
                }
            }
            InputEvent::Resize(resize) => {
                if let Some(window) = self.focused_mut() {
                    window.on_resize(resize);
                }
            }
            InputEvent::Key(key) => {
                if let Some(window) = self.focused_mut() {
                    window.on_keypress(key);
                }
            }
            InputEvent::Mouse(mouse) => self.dispatch_mouse(mouse),
        }
    }

    fn dispatch_mouse(&mut self, mouse: &MouseEvent) {
        if mouse.kind == MouseKind::Down {
            let Some(index) = self.window_at(mouse.abs_x, mouse.abs_y) else {
                return;
            };
            self.activate(index);
            self.captured = mouse.is_left();
            if let Some(window) = self.focused_mut() {
                window.on_mouse_down(mouse);
            }
            return;
        }

        let target = if self.captured {
            self.focused
        } else {
            self.window_at(mouse.abs_x, mouse.abs_y)
        };
        if mouse.kind == MouseKind::Up {
            self.captured = false;
        }
        let Some(window) = target.and_then(|index| self.windows.get_mut(index)) else {
            return;
        };
        match mouse.kind {
            MouseKind::Up => window.on_mouse_up(mouse),
            _ => window.on_mouse_motion(mouse),
        }
    }

    fn window_at(&self, x: u16, y: u16) -> Option<usize> {
        self.windows.iter().rposition(|window| window.contains(x, y))
    }

    /// Draw the background and every window, bottom to top.
    pub fn draw(&self, buffer: &mut CellBuffer) {
        buffer.fill_rect(buffer.area(), self.background);
        for window in &self.windows {
            window.draw(buffer);
        }
    }
}
