//! Rect: a rectangle primitive for widget geometry and hit testing.

/// A rectangle defined by position and size.
///
/// Edges follow the half-open convention: `right()` and `bottom()` are one
/// past the last column and row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: u16,
    /// Y coordinate (row) of the top-left corner.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a size, anchored at the origin.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink the rectangle by a margin on all sides.
    #[inline]
    #[must_use]
    pub const fn shrink(&self, margin: u16) -> Self {
        let m2 = margin * 2;
        if self.width <= m2 || self.height <= m2 {
            return Self::ZERO;
        }
        Self::new(self.x + margin, self.y + margin, self.width - m2, self.height - m2)
    }

    /// The same size at a different position.
    #[inline]
    #[must_use]
    pub const fn at(&self, x: u16, y: u16) -> Self {
        Self::new(x, y, self.width, self.height)
    }

    /// The same position with a different size.
    #[inline]
    #[must_use]
    pub const fn with_size(&self, width: u16, height: u16) -> Self {
        Self::new(self.x, self.y, width, height)
    }

    /// Translate a rectangle expressed relative to this one into the
    /// coordinate space this one lives in.
    #[inline]
    #[must_use]
    pub const fn to_outer(&self, inner: Self) -> Self {
        Self::new(
            self.x.saturating_add(inner.x),
            self.y.saturating_add(inner.y),
            inner.width,
            inner.height,
        )
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}
