//! Crossterm glue: raw-mode management and conversion of crossterm events.
//!
//! Byte-level escape sequence parsing is crossterm's job. This module only
//! maps its events onto [`InputEvent`] and puts the terminal in and out of
//! the mode the toolkit needs.

use super::decoder::{EventSource, SizeProbe};
use super::event::{
    InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButtons, MouseEvent, MouseKind, ResizeEvent,
};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use std::io;
use std::time::Duration;

/// Reads events from the controlling terminal through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermSource;

impl EventSource for CrosstermSource {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if event::poll(timeout)? {
            Ok(convert_event(event::read()?))
        } else {
            Ok(None)
        }
    }
}

/// Asks crossterm for the terminal size.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermSize;

impl SizeProbe for CrosstermSize {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

/// Raw mode plus optional alternate screen and mouse capture.
///
/// Restored by [`restore`](Self::restore) or, failing that, on drop.
#[derive(Debug)]
pub struct TerminalMode {
    mouse: bool,
    alternate_screen: bool,
    active: bool,
}

impl TerminalMode {
    /// Put the terminal into raw mode and enable the requested features.
    pub fn enter(mouse: bool, alternate_screen: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if mouse {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        execute!(stdout, cursor::Hide)?;
        debug!("terminal entered raw mode (mouse={mouse}, alternate_screen={alternate_screen})");

        Ok(Self {
            mouse,
            alternate_screen,
            active: true,
        })
    }

    /// Put the terminal back the way it was.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut stdout = io::stdout();
        execute!(stdout, cursor::Show)?;
        if self.mouse {
            execute!(stdout, event::DisableMouseCapture)?;
        }
        if self.alternate_screen {
            execute!(stdout, LeaveAlternateScreen)?;
        }
        terminal::disable_raw_mode()?;
        debug!("terminal restored to cooked mode");
        Ok(())
    }
}

impl Drop for TerminalMode {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Convert a crossterm event to an [`InputEvent`].
///
/// Returns `None` for events the toolkit does not deliver (key releases,
/// focus changes, paste).
pub fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            let code = convert_key_code(key_event.code)?;
            Some(InputEvent::Key(KeyEvent {
                code,
                modifiers: convert_modifiers(key_event.modifiers),
            }))
        }
        Event::Mouse(mouse_event) => convert_mouse_event(mouse_event).map(InputEvent::Mouse),
        Event::Resize(width, height) => Some(InputEvent::Resize(ResizeEvent::screen(width, height))),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => None,
    }
}

fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::BackTab => KeyCode::BackTab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Insert => KeyCode::Insert,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: mods.contains(event::KeyModifiers::SHIFT),
        control: mods.contains(event::KeyModifiers::CONTROL),
        alt: mods.contains(event::KeyModifiers::ALT),
    }
}

fn convert_button(button: event::MouseButton) -> MouseButtons {
    match button {
        event::MouseButton::Left => MouseButtons::LEFT,
        event::MouseButton::Right => MouseButtons::RIGHT,
        event::MouseButton::Middle => MouseButtons::MIDDLE,
    }
}

fn convert_mouse_event(mouse: event::MouseEvent) -> Option<MouseEvent> {
    let (kind, buttons) = match mouse.kind {
        event::MouseEventKind::Down(button) => (MouseKind::Down, convert_button(button)),
        event::MouseEventKind::Up(button) => (MouseKind::Up, convert_button(button)),
        event::MouseEventKind::Drag(button) => (MouseKind::Motion, convert_button(button)),
        event::MouseEventKind::Moved => (MouseKind::Motion, MouseButtons::empty()),
        event::MouseEventKind::ScrollUp => (MouseKind::Down, MouseButtons::WHEEL_UP),
        event::MouseEventKind::ScrollDown => (MouseKind::Down, MouseButtons::WHEEL_DOWN),
        _ => return None,
    };

    let mut event = MouseEvent::new(kind, mouse.column, mouse.row, buttons);
    event.modifiers = convert_modifiers(mouse.modifiers);
    Some(event)
}
