//! Screen module: the logical cell grid and the renderer that flushes it.
//!
//! - [`Cell`], [`Style`], [`Rgb`], [`Modifiers`]: what one screen position holds
//! - [`CellBuffer`]: the grid widgets draw into
//! - [`Renderer`] / [`Screen`]: syncs the logical grid to the device, changed cells only

mod buffer;
mod cell;
#[allow(clippy::module_inception)]
mod screen;

pub use buffer::{BorderStyle, CellBuffer};
pub use cell::{Cell, Modifiers, Rgb, Style};
pub use screen::{FlushStats, Renderer, Screen};
