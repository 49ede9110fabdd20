//! Cell: one character position on the screen, with its style.

use bitflags::bitflags;
use crossterm::style::{Attribute, Color};
use unicode_width::UnicodeWidthStr;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Default window background.
    pub const BLUE: Self = Self::new(0, 0, 170);
    /// Default window foreground.
    pub const LIGHT_GRAY: Self = Self::new(170, 170, 170);
    /// Highlight color.
    pub const CYAN: Self = Self::new(0, 170, 170);
    /// Label color.
    pub const YELLOW: Self = Self::new(255, 255, 85);
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

bitflags! {
    /// Text style modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Underlined text
        const UNDERLINE = 0b0000_0100;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0000_1000;
    }
}

impl Modifiers {
    /// The SGR attributes that switch these modifiers on.
    pub fn attributes(self) -> impl Iterator<Item = Attribute> {
        [
            (Self::BOLD, Attribute::Bold),
            (Self::DIM, Attribute::Dim),
            (Self::UNDERLINE, Attribute::Underlined),
            (Self::REVERSED, Attribute::Reverse),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, attribute)| attribute)
    }
}

/// Colors and modifiers applied to drawn text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// A plain style with the given colors.
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            modifiers: Modifiers::empty(),
        }
    }

    /// Add modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Rgb::WHITE, Rgb::BLACK)
    }
}

/// One screen position.
///
/// The symbol is a single grapheme. A double-width grapheme occupies its
/// cell plus a continuation cell whose symbol is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    symbol: String,
    /// Cell style.
    pub style: Style,
}

impl Cell {
    /// A blank cell in the given style.
    pub fn blank(style: Style) -> Self {
        Self {
            symbol: String::from(" "),
            style,
        }
    }

    /// A cell holding one grapheme.
    pub fn new(grapheme: &str, style: Style) -> Self {
        Self {
            symbol: grapheme.to_string(),
            style,
        }
    }

    /// The trailing half of a double-width grapheme.
    pub(crate) fn continuation(style: Style) -> Self {
        Self {
            symbol: String::new(),
            style,
        }
    }

    /// The grapheme shown in this cell (empty for a continuation cell).
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Whether this is the trailing half of a wide grapheme.
    pub fn is_continuation(&self) -> bool {
        self.symbol.is_empty()
    }

    /// Display width of the symbol, in columns.
    pub fn display_width(&self) -> u16 {
        u16::try_from(self.symbol.width()).unwrap_or(1)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Style::default())
    }
}
