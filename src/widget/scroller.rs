//! Scroll ranges: the (min, value, max) triple behind each window scroller.

/// One axis of scrollable extent.
///
/// `min <= value <= max` holds after every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRange {
    min: usize,
    max: usize,
    value: usize,
    small_change: usize,
    big_change: usize,
}

impl Default for ScrollRange {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl ScrollRange {
    /// A range positioned at `min`.
    pub const fn new(min: usize, max: usize) -> Self {
        let max = if max < min { min } else { max };
        Self {
            min,
            max,
            value: min,
            small_change: 1,
            big_change: 10,
        }
    }

    /// Lower bound (top or left).
    pub const fn min(&self) -> usize {
        self.min
    }

    /// Upper bound (bottom or right).
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Current position.
    pub const fn value(&self) -> usize {
        self.value
    }

    /// Step used by arrows and the wheel.
    pub const fn small_change(&self) -> usize {
        self.small_change
    }

    /// Step used by track clicks.
    pub const fn big_change(&self) -> usize {
        self.big_change
    }

    /// Change the bounds, pulling the value inside them.
    pub fn set_range(&mut self, min: usize, max: usize) {
        self.min = min;
        self.max = max.max(min);
        self.value = self.value.clamp(self.min, self.max);
    }

    /// Move to `value`, clamped to the bounds.
    pub fn set_value(&mut self, value: usize) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Set the arrow/wheel step. Zero is treated as one.
    pub fn set_small_change(&mut self, step: usize) {
        self.small_change = step.max(1);
    }

    /// Set the page step. Zero is treated as one.
    pub fn set_big_change(&mut self, step: usize) {
        self.big_change = step.max(1);
    }

    /// Step back by `small_change`.
    pub fn decrement(&mut self) {
        self.set_value(self.value.saturating_sub(self.small_change));
    }

    /// Step forward by `small_change`.
    pub fn increment(&mut self) {
        self.set_value(self.value.saturating_add(self.small_change));
    }

    /// Page back by `big_change`.
    pub fn big_decrement(&mut self) {
        self.set_value(self.value.saturating_sub(self.big_change));
    }

    /// Page forward by `big_change`.
    pub fn big_increment(&mut self) {
        self.set_value(self.value.saturating_add(self.big_change));
    }

    /// Thumb offset within a track of `track_len` cells.
    pub fn thumb_offset(&self, track_len: usize) -> usize {
        let span = self.max - self.min;
        if span == 0 || track_len <= 1 {
            return 0;
        }
        (self.value - self.min) * (track_len - 1) / span
    }

    /// The value a thumb dragged to `offset` within `track_len` cells stands for.
    pub fn value_at(&self, offset: usize, track_len: usize) -> usize {
        if track_len <= 1 {
            return self.min;
        }
        let offset = offset.min(track_len - 1);
        self.min + (offset * (self.max - self.min) + (track_len - 1) / 2) / (track_len - 1)
    }
}
