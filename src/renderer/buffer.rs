//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be displayed
//! on the terminal. Out-of-bounds writes are clipped silently.

use crate::types::{Attr, BorderStyle, Cell, Rect, Rgba};

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// One row of cells.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = self.index(0, y);
        &self.cells[start..start + self.width as usize]
    }

    /// Write one character.
    pub fn draw_char(&mut self, x: u16, y: u16, ch: char, fg: Rgba, attrs: Attr) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.cells[idx] = Cell { ch, fg, attrs };
        }
    }

    /// Write a single-line string starting at (x, y).
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgba, attrs: Attr) {
        for (offset, ch) in text.chars().enumerate() {
            let Ok(offset) = u16::try_from(offset) else {
                break;
            };
            self.draw_char(x.saturating_add(offset), y, ch, fg, attrs);
        }
    }

    /// Draw a text string centered horizontally and vertically in `rect`.
    pub fn draw_centered(&mut self, rect: Rect, text: &str, fg: Rgba, attrs: Attr) {
        let len = text.chars().count() as u16;
        let x = rect.x + rect.width.saturating_sub(len) / 2;
        let y = rect.y + rect.height.saturating_sub(1) / 2;
        self.draw_text(x, y, text, fg, attrs);
    }

    /// Draw a border around `rect`.
    pub fn draw_border(&mut self, rect: Rect, style: BorderStyle, color: Rgba, attrs: Attr) {
        if style == BorderStyle::None || rect.width < 2 || rect.height < 2 {
            return;
        }
        let (h, v, tl, tr, br, bl) = style.chars();
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;

        for x in rect.x + 1..right {
            self.draw_char(x, rect.y, h, color, attrs);
            self.draw_char(x, bottom, h, color, attrs);
        }
        for y in rect.y + 1..bottom {
            self.draw_char(rect.x, y, v, color, attrs);
            self.draw_char(right, y, v, color, attrs);
        }
        self.draw_char(rect.x, rect.y, tl, color, attrs);
        self.draw_char(right, rect.y, tr, color, attrs);
        self.draw_char(right, bottom, br, color, attrs);
        self.draw_char(rect.x, bottom, bl, color, attrs);
    }

    /// Plain-text rows, trailing spaces trimmed.
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                let line: String = self.row(y).iter().map(|c| c.ch).collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_box_with_digit() {
        let mut fb = FrameBuffer::new(5, 3);
        let rect = Rect::new(0, 0, 5, 3);
        fb.draw_border(rect, BorderStyle::Rounded, Rgba::GRAY, Attr::NONE);
        fb.draw_centered(rect, "7", Rgba::WHITE, Attr::BOLD);

        assert_eq!(fb.to_lines(), vec!["╭───╮", "│ 7 │", "╰───╯"]);
        assert_eq!(fb.get(2, 1).map(|c| c.attrs), Some(Attr::BOLD));
    }

    #[test]
    fn test_clipping() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.draw_text(1, 0, "abcdef", Rgba::WHITE, Attr::NONE);
        fb.draw_char(9, 9, 'x', Rgba::WHITE, Attr::NONE);
        assert_eq!(fb.to_lines(), vec![" ab"]);
        assert!(fb.get(3, 0).is_none());
        assert!(fb.row(5).is_empty());
    }

    #[test]
    fn test_border_too_small_is_skipped() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.draw_border(Rect::new(0, 0, 1, 4), BorderStyle::Single, Rgba::GRAY, Attr::NONE);
        assert!(fb.to_lines().iter().all(|l| l.is_empty()));
    }
}
