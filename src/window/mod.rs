//! Windows: bordered frames around scrollable content, and the desktop
//! that stacks them.
//!
//! A [`Window`] keeps its scrollers in agreement with its content and
//! toggles its command set through a [`CommandShell`] when focus changes.
//! The [`Desktop`] routes input and guarantees one focused window.

mod command;
mod desktop;
#[allow(clippy::module_inception)]
mod window;

pub use command::{Command, CommandRegistry, CommandShell, TABLE_COMMANDS};
pub use desktop::Desktop;
pub use window::{Window, WindowConfig};
