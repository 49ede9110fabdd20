//! Layout module: rectangle geometry shared by windows and widgets.

mod rect;

pub use rect::Rect;
