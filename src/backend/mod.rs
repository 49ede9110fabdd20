//! Backend: event delivery between the decoder thread and the application loop.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐  push + notify   ┌────────────┐  get_events(timeout)  ┌──────────────┐
//! │ Decoder thread │ ───────────────▶ │ EventQueue │ ────────────────────▶ │   App loop   │
//! └────────────────┘                  └────────────┘                       └──────────────┘
//!                                                                                 │
//!                                           flush_screen()                        │
//!                                     ┌──────────────────┐                        │
//!                                     │     Renderer     │ ◀──────────────────────┘
//!                                     └──────────────────┘
//! ```
//!
//! The queue is the only state both threads touch. Everything downstream of
//! `get_events` runs on the application thread without locking.

#[allow(clippy::module_inception)]
mod backend;
mod decoder;
mod event;
mod input;
mod queue;

pub use backend::Backend;
pub use decoder::{Decoder, DecoderConfig, EventSource, SizeProbe, TerminalDecoder};
pub use event::{
    InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButtons, MouseEvent, MouseKind, ResizeEvent,
    ResizeKind,
};
pub use input::{convert_event, CrosstermSize, CrosstermSource, TerminalMode};
pub use queue::{EventQueue, Pending, Wake};
