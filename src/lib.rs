//! # Treadle
//!
//! The event-delivery backbone of a text-mode windowing toolkit.
//!
//! A decoder thread turns terminal input into events and queues them. The
//! application loop pulls them with a bounded wait through the [`Backend`],
//! routes them to the [`Desktop`], and flushes the redrawn screen.
//!
//! ## Core Concepts
//!
//! - **Bounded waits**: [`Backend::get_events`] never blocks past its timeout
//!   and falls back to idle events (such as a missed resize) when nothing
//!   arrives
//! - **Lossless delivery**: every decoded event is returned exactly once, in order
//! - **Resize cascade**: a window clamps to its minimum size, fits its content
//!   to the interior, and re-derives its scrollers from the content
//! - **Focus commands**: focusing a window enables its command set, and
//!   unfocusing disables it
//!
//! ## Example
//!
//! ```rust,ignore
//! use treadle::{run_loop, Action, Backend, DecoderConfig, Desktop, LoopConfig, Rect, Window};
//!
//! let mut backend = Backend::terminal(&DecoderConfig::default())?;
//! let mut desktop = Desktop::new(80, 24);
//! desktop.add_window(Window::table("Sheet", Rect::new(2, 1, 60, 20), Default::default(), Default::default()));
//!
//! run_loop(&mut backend, &mut desktop, &LoopConfig::default(), |_, _| Action::Continue)?;
//! backend.shutdown()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod backend;
pub mod error;
pub mod layout;
pub mod screen;
pub mod widget;
pub mod window;

// Re-exports for convenience
pub use app::{run_loop, Action, LoopConfig};
pub use backend::{
    Backend, Decoder, DecoderConfig, InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButtons,
    MouseEvent, MouseKind, ResizeEvent, ResizeKind, TerminalDecoder,
};
pub use error::{Error, Result};
pub use layout::Rect;
pub use screen::{CellBuffer, Renderer, Rgb, Screen, Style};
pub use widget::{ContentWidget, ScrollRange, TableConfig, TableWidget, Widget};
pub use window::{Command, CommandRegistry, CommandShell, Desktop, Window, WindowConfig};
