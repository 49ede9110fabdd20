//! The application loop: draw, flush, wait for input, dispatch.

use crate::backend::{Backend, Decoder, InputEvent, ResizeKind};
use crate::error::Result;
use crate::screen::Renderer;
use crate::window::Desktop;
use log::{debug, info};
use std::time::Duration;

/// Configuration for [`run_loop`].
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Longest wait for input before idle events are collected.
    pub idle_timeout: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_millis(250),
        }
    }
}

/// What the application hook wants done with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Route the event to the desktop.
    Continue,
    /// The hook handled it; skip the desktop.
    Consume,
    /// Leave the loop.
    Quit,
}

/// Run until `hook` returns [`Action::Quit`] or the decoder fails.
///
/// Every iteration redraws the desktop, flushes, then waits up to
/// `idle_timeout` for events. Each event goes to `hook` first. Screen
/// resizes also resize the renderer before the desktop sees them.
///
/// The backend is left running; call [`Backend::shutdown`] afterwards.
pub fn run_loop<D, R, F>(
    backend: &mut Backend<D, R>,
    desktop: &mut Desktop,
    config: &LoopConfig,
    mut hook: F,
) -> Result<()>
where
    D: Decoder,
    R: Renderer,
    F: FnMut(&InputEvent, &mut Desktop) -> Action,
{
    info!("event loop started");
    loop {
        desktop.draw(backend.renderer_mut().buffer_mut());
        backend.flush_screen()?;

        for event in backend.get_events(config.idle_timeout)? {
            if let InputEvent::Resize(resize) = &event {
                if resize.kind == ResizeKind::Screen {
                    debug!("screen resized to {}x{}", resize.width, resize.height);
                    backend.renderer_mut().resize(resize.width, resize.height);
                }
            }
            match hook(&event, desktop) {
                Action::Continue => desktop.dispatch(&event),
                Action::Consume => {}
                Action::Quit => {
                    info!("event loop finished");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{EventQueue, KeyCode, KeyEvent, ResizeEvent};
    use crate::error::Error;
    use crate::layout::Rect;
    use crate::screen::CellBuffer;
    use crate::widget::TableConfig;
    use crate::window::{Window, WindowConfig};
    use std::io;
    use std::sync::Arc;

    #[derive(Default)]
    struct ScriptDecoder {
        queue: Arc<EventQueue>,
    }

    impl Decoder for ScriptDecoder {
        fn queue(&self) -> &EventQueue {
            &self.queue
        }

        fn drain_idle_events(&mut self) -> Vec<InputEvent> {
            self.queue.drain()
        }

        fn shutdown(&mut self) -> Result<()> {
            Ok(())
        }
    }

    struct MemoryRenderer {
        buffer: CellBuffer,
        flushes: usize,
    }

    impl Renderer for MemoryRenderer {
        fn buffer_mut(&mut self) -> &mut CellBuffer {
            &mut self.buffer
        }

        fn resize(&mut self, width: u16, height: u16) {
            self.buffer.resize(width, height);
        }

        fn flush_physical(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    fn setup() -> (Backend<ScriptDecoder, MemoryRenderer>, Desktop) {
        let backend = Backend::new(
            ScriptDecoder::default(),
            MemoryRenderer {
                buffer: CellBuffer::new(80, 24),
                flushes: 0,
            },
        );
        let mut desktop = Desktop::new(80, 24);
        desktop.add_window(Window::table(
            "Sheet",
            Rect::new(0, 0, 40, 20),
            TableConfig::default(),
            WindowConfig::default(),
        ));
        (backend, desktop)
    }

    fn config() -> LoopConfig {
        LoopConfig {
            idle_timeout: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_loop_dispatches_until_quit() {
        let (mut backend, mut desktop) = setup();
        backend.decoder().queue().push_all([
            InputEvent::from(KeyEvent::new(KeyCode::PageDown)),
            InputEvent::from(ResizeEvent::screen(100, 30)),
            InputEvent::from(KeyEvent::new(KeyCode::Esc)),
            InputEvent::from(KeyEvent::new(KeyCode::PageDown)),
        ]);

        run_loop(&mut backend, &mut desktop, &config(), |event, _| match event {
            InputEvent::Key(key) if key.code == KeyCode::Esc => Action::Quit,
            _ => Action::Continue,
        })
        .unwrap();

        assert_eq!(desktop.size(), (100, 30));
        assert_eq!(backend.renderer().buffer.width(), 100);
        assert_eq!(backend.renderer().flushes, 1);
        assert_eq!(desktop.focused().map(|w| w.vertical().value()), Some(1));
    }

    #[test]
    fn test_consumed_events_skip_desktop() {
        let (mut backend, mut desktop) = setup();
        backend.decoder().queue().push_all([
            InputEvent::from(KeyEvent::new(KeyCode::PageDown)),
            InputEvent::from(KeyEvent::new(KeyCode::Esc)),
        ]);

        run_loop(&mut backend, &mut desktop, &config(), |event, _| match event {
            InputEvent::Key(key) if key.code == KeyCode::Esc => Action::Quit,
            _ => Action::Consume,
        })
        .unwrap();

        assert_eq!(desktop.focused().map(|w| w.vertical().value()), Some(0));
    }

    #[test]
    fn test_decoder_failure_ends_loop() {
        let (mut backend, mut desktop) = setup();
        backend.decoder().queue().fail("tty closed");
        let result = run_loop(&mut backend, &mut desktop, &config(), |_, _| Action::Continue);
        assert!(matches!(result, Err(Error::Decoder(_))));
    }
}
