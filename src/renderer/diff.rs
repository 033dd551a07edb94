//! Differential renderer.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! rewrites rows that changed. Output is queued through crossterm and flushed
//! once per frame.
//!
//! # Algorithm
//!
//! 1. For each row in the new frame:
//!    - If the previous frame has the same size and the row is unchanged: skip
//!    - Otherwise: move to the row start and emit its cells, switching color
//!      and attributes only when they change
//! 2. Flush the writer (single syscall)
//! 3. Store current frame as previous for next comparison

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use super::buffer::FrameBuffer;
use crate::types::{Attr, Cell, Rgba};

/// Differential renderer writing to any `Write` (stdout in practice).
pub struct DiffRenderer<W: Write> {
    out: W,
    previous: Option<FrameBuffer>,
}

impl<W: Write> DiffRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, previous: None }
    }

    /// Render a frame, outputting only changed rows.
    ///
    /// Returns true if any rows were written.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<bool> {
        let mut has_changes = false;

        for y in 0..buffer.height() {
            let changed = match &self.previous {
                Some(prev) if prev.width() == buffer.width() && prev.height() == buffer.height() => {
                    prev.row(y) != buffer.row(y)
                }
                _ => true,
            };

            if changed {
                has_changes = true;
                self.write_row(y, buffer.row(y))?;
            }
        }

        if has_changes {
            queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        self.out.flush()?;

        self.previous = Some(buffer.clone());
        Ok(has_changes)
    }

    fn write_row(&mut self, y: u16, cells: &[Cell]) -> io::Result<()> {
        queue!(self.out, MoveTo(0, y), ResetColor, SetAttribute(Attribute::Reset))?;

        let mut fg = Rgba::TERMINAL_DEFAULT;
        let mut attrs = Attr::NONE;
        for cell in cells {
            if cell.attrs != attrs {
                queue!(self.out, SetAttribute(Attribute::Reset))?;
                apply_attrs(&mut self.out, cell.attrs)?;
                attrs = cell.attrs;
                // Reset clears the color too
                fg = Rgba::TERMINAL_DEFAULT;
            }
            if cell.fg != fg {
                queue!(self.out, SetForegroundColor(to_color(cell.fg)))?;
                fg = cell.fg;
            }
            queue!(self.out, Print(cell.ch))?;
        }
        Ok(())
    }

    /// Invalidate the previous frame.
    ///
    /// Next render will be a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter fullscreen mode (alternate screen buffer).
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        self.out.flush()?;
        self.invalidate();
        Ok(())
    }

    /// Exit fullscreen mode.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset), Show, LeaveAlternateScreen)?;
        self.out.flush()
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }
}

fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r as u8,
            g: color.g as u8,
            b: color.b as u8,
        }
    }
}

fn apply_attrs<W: Write>(out: &mut W, attrs: Attr) -> io::Result<()> {
    if attrs.contains(Attr::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if attrs.contains(Attr::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if attrs.contains(Attr::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if attrs.contains(Attr::INVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
