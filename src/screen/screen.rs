//! Screen: double-buffered renderer.
//!
//! Widgets draw into the logical buffer. [`Renderer::flush_physical`]
//! compares it against the physical buffer (what the device is showing),
//! emits cursor moves, colors and text for changed cells only, and then
//! makes the physical buffer match.

use super::buffer::CellBuffer;
use super::cell::{Modifiers, Style};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// The output side of a backend.
pub trait Renderer {
    /// The logical buffer to draw the next frame into.
    fn buffer_mut(&mut self) -> &mut CellBuffer;

    /// Change the screen size. The next flush repaints everything.
    fn resize(&mut self, width: u16, height: u16);

    /// Synchronize the device with the logical buffer.
    fn flush_physical(&mut self) -> io::Result<()>;
}

/// Statistics about the last flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    /// Cells written.
    pub cells_changed: usize,
    /// Whether the whole screen was repainted.
    pub full_repaint: bool,
}

/// Double-buffered renderer writing ANSI sequences to `W`.
pub struct Screen<W: Write> {
    logical: CellBuffer,
    physical: CellBuffer,
    out: W,
    needs_full_repaint: bool,
    last_flush: FlushStats,
}

impl Screen<io::Stdout> {
    /// A screen on standard output, sized to the terminal.
    pub fn stdout() -> io::Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        Ok(Self::new(io::stdout(), width, height))
    }
}

impl<W: Write> Screen<W> {
    /// A screen of the given size writing to `out`.
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            logical: CellBuffer::new(width, height),
            physical: CellBuffer::new(width, height),
            out,
            needs_full_repaint: true,
            last_flush: FlushStats::default(),
        }
    }

    /// The logical buffer.
    pub const fn buffer(&self) -> &CellBuffer {
        &self.logical
    }

    /// The underlying writer.
    pub const fn writer(&self) -> &W {
        &self.out
    }

    /// Mutable access to the underlying writer.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// What the last flush did.
    pub const fn last_flush(&self) -> FlushStats {
        self.last_flush
    }

    fn emit(&mut self, full: bool) -> io::Result<usize> {
        let mut changed = 0;
        let mut pen: Option<Style> = None;
        // Where the terminal cursor is after the last Print.
        let mut cursor: Option<(u16, u16)> = None;

        if full {
            queue!(self.out, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
        }

        for y in 0..self.logical.height() {
            for x in 0..self.logical.width() {
                let Some(cell) = self.logical.get(x, y) else {
                    continue;
                };
                if cell.is_continuation() {
                    continue;
                }
                if !full && self.physical.get(x, y) == Some(cell) {
                    continue;
                }
                changed += 1;

                if cursor != Some((x, y)) {
                    queue!(self.out, MoveTo(x, y))?;
                }
                if pen != Some(cell.style) {
                    let removed = pen
                        .map_or(Modifiers::empty(), |p| p.modifiers)
                        .difference(cell.style.modifiers);
                    if !removed.is_empty() {
                        queue!(self.out, SetAttribute(Attribute::Reset))?;
                    }
                    queue!(
                        self.out,
                        SetForegroundColor(cell.style.fg.into()),
                        SetBackgroundColor(cell.style.bg.into())
                    )?;
                    for attribute in cell.style.modifiers.attributes() {
                        queue!(self.out, SetAttribute(attribute))?;
                    }
                    pen = Some(cell.style);
                }
                queue!(self.out, Print(cell.symbol()))?;
                cursor = Some((x + cell.display_width().max(1), y));
            }
        }

        if changed > 0 || full {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        Ok(changed)
    }
}

impl<W: Write> Renderer for Screen<W> {
    fn buffer_mut(&mut self) -> &mut CellBuffer {
        &mut self.logical
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.logical.resize(width, height);
        self.physical = CellBuffer::new(width, height);
        self.needs_full_repaint = true;
    }

    fn flush_physical(&mut self) -> io::Result<()> {
        let full = self.needs_full_repaint;
        let cells_changed = self.emit(full)?;
        self.out.flush()?;

        self.physical.clone_from(&self.logical);
        self.needs_full_repaint = false;
        self.last_flush = FlushStats {
            cells_changed,
            full_repaint: full,
        };
        Ok(())
    }
}
