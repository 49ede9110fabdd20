//! Widgets: the components a window hosts.
//!
//! - [`Widget`]: bounds, drawing and input handlers with no-op defaults
//! - [`ContentWidget`]: a widget that scrolls and reports its extents
//! - [`ScrollRange`]: the value model behind a scroller gutter
//! - [`TableWidget`]: a scrollable grid of text cells

mod scroller;
mod table;
mod traits;

pub use scroller::ScrollRange;
pub use table::{column_label, TableConfig, TableWidget};
pub use traits::{ContentWidget, Widget};
