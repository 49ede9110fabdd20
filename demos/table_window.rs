//! Table window demo: two table windows on a desktop.
//!
//! - F6 switches focus between the windows
//! - Click a window to focus it, drag the scroller thumbs, use the wheel
//! - Esc or Ctrl+C quits
//!
//! Logs go to `table_window.log` in the current directory.

use log::{info, LevelFilter};
use treadle::{
    run_loop, Action, Backend, DecoderConfig, Desktop, InputEvent, KeyCode, LoopConfig, Rect,
    Renderer, TableConfig, TableWidget, Window, WindowConfig,
};

fn init_logging() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message));
        })
        .level(LevelFilter::Debug)
        .chain(fern::log_file("table_window.log")?)
        .apply()?;
    Ok(())
}

fn sheet(title: &str, bounds: Rect, seed: usize) -> Window {
    let mut table = TableWidget::new(Rect::ZERO, TableConfig::default());
    for row in 0..table.rows() {
        for column in 0..table.columns() {
            if (row + column + seed) % 3 == 0 {
                table.set_text(row, column, format!("{}", (row + 1) * (column + seed + 1)));
            }
        }
    }
    Window::new(
        title,
        bounds,
        Box::new(table),
        treadle::window::TABLE_COMMANDS,
        WindowConfig::default(),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let mut backend = Backend::terminal(&DecoderConfig::default())?;
    let (width, height) = {
        let buffer = backend.renderer_mut().buffer_mut();
        (buffer.width(), buffer.height())
    };

    let mut desktop = Desktop::new(width, height);
    desktop.add_window(sheet("Budget", Rect::new(1, 1, 50, 18), 0));
    desktop.add_window(sheet("Forecast", Rect::new(20, 6, 56, 18), 1));
    info!("desktop ready at {width}x{height}");

    let result = run_loop(&mut backend, &mut desktop, &LoopConfig::default(), |event, desktop| {
        let InputEvent::Key(key) = event else {
            return Action::Continue;
        };
        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if key.modifiers.control => Action::Quit,
            KeyCode::F(6) => {
                desktop.focus_next();
                Action::Consume
            }
            _ => Action::Continue,
        }
    });

    backend.shutdown()?;
    result?;
    Ok(())
}
