//! Segments - Pure code⇄segments synchronization and edit pipeline
//!
//! The OTP field splits one code string into N single-character segments.
//! Everything here is plain data and pure transitions so the policy can be
//! exercised without a terminal:
//!
//! - `segments_from_code` / `code_from_segments` - the two sync directions
//! - `SegmentedCode` - segments + focus, with `resync`, `set_value`, `paste`
//!   and `key` transitions that report what the host code must become
//!
//! Direction is fixed per event: typing goes segments → code, host writes and
//! mount go code → segments. Transitions never read back what they wrote.

use tracing::{debug, trace, warn};

use crate::error::{OtpError, Result};
use crate::state::focus::{self, FocusPin};
use crate::state::keyboard::KeyboardEvent;

// =============================================================================
// SYNC HELPERS
// =============================================================================

/// Split the first `digits` characters of `code` into one segment each,
/// padding with empty segments.
pub fn segments_from_code(code: &str, digits: usize) -> Vec<String> {
    let mut segments: Vec<String> = code.chars().take(digits).map(String::from).collect();
    segments.resize(digits, String::new());
    segments
}

/// Concatenate segments in order.
pub fn code_from_segments(segments: &[String]) -> String {
    segments.concat()
}

/// Index of the first unfilled segment for `code`, capped at `digits`.
pub fn active_index(code: &str, digits: usize) -> usize {
    code.chars().take(digits).count()
}

/// Keep only the first character of a segment value.
pub fn clamp_value(value: &str) -> String {
    value.chars().next().map(String::from).unwrap_or_default()
}

// =============================================================================
// EDIT RESULT
// =============================================================================

/// What an input event did to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Not meant for the field; let other handlers see it.
    Pass,
    /// Consumed without changing the code (filtered, rejected or focus only).
    Handled,
    /// Consumed; the host code must become this value.
    Commit(String),
}

impl Edit {
    /// Whether the event was consumed.
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Edit::Pass)
    }
}

// =============================================================================
// SEGMENTED CODE
// =============================================================================

/// Segments plus focus for one field of `digits` boxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedCode {
    digits: usize,
    segments: Vec<String>,
    focused: Option<FocusPin>,
}

impl SegmentedCode {
    /// Create an empty field. Fails for zero digits.
    pub fn new(digits: usize) -> Result<Self> {
        if digits == 0 {
            return Err(OtpError::ZeroDigits);
        }
        Ok(Self {
            digits,
            segments: vec![String::new(); digits],
            focused: None,
        })
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn focused(&self) -> Option<FocusPin> {
        self.focused
    }

    fn last_index(&self) -> usize {
        self.digits - 1
    }

    /// Concatenation of the current segments.
    pub fn joined(&self) -> String {
        code_from_segments(&self.segments)
    }

    /// A segment accepts direct activation only when it is the first
    /// unfilled one and is empty.
    pub fn is_hit_testable(&self, code: &str, index: usize) -> bool {
        active_index(code, self.digits) == index
            && self.segments.get(index).is_some_and(|s| s.is_empty())
    }

    /// Focus the active segment. Returns false when the code is complete.
    pub fn activate(&mut self, code: &str) -> bool {
        let index = active_index(code, self.digits);
        if index >= self.digits {
            self.focused = None;
            return false;
        }
        self.focused = Some(FocusPin(index));
        true
    }

    /// Focus a segment directly, subject to hit-testing.
    pub fn focus(&mut self, code: &str, index: usize) -> bool {
        if !self.is_hit_testable(code, index) {
            return false;
        }
        self.focused = Some(FocusPin(index));
        true
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Re-derive every segment from `code`, discarding partial input.
    ///
    /// A complete code drops focus. Otherwise an existing focus follows the
    /// first unfilled segment.
    pub fn resync(&mut self, code: &str) {
        self.segments = segments_from_code(code, self.digits);
        let active = active_index(code, self.digits);
        if active >= self.digits {
            self.focused = None;
        } else if self.focused.is_some() {
            self.focused = Some(FocusPin(active));
        }
        debug!(digits = self.digits, filled = active, "segments resynced");
    }

    /// A segment's value changed to `value`.
    ///
    /// - longer than the field: the value is the whole code (paste)
    /// - empty: the segment is cleared
    /// - otherwise the first character is taken; non-digits are dropped, and
    ///   a complete code refuses it and drops focus
    pub fn set_value(&mut self, code: &str, index: usize, value: &str) -> Edit {
        if index >= self.digits {
            return Edit::Pass;
        }

        let len = value.chars().count();
        if len > self.digits {
            return self.replace_code(value);
        }

        if len == 0 {
            self.segments[index].clear();
            return Edit::Commit(self.joined());
        }

        let value = clamp_value(value);
        if !value.chars().all(|c| c.is_ascii_digit()) {
            trace!(index, "non-digit dropped");
            return Edit::Handled;
        }

        if active_index(code, self.digits) >= self.digits {
            warn!(index, "code complete, input refused");
            self.focused = None;
            return Edit::Handled;
        }

        self.segments[index] = value;
        self.focused = focus::next(self.focused, self.last_index());
        let joined = self.joined();
        if active_index(&joined, self.digits) >= self.digits {
            debug!("code complete");
            self.focused = None;
        }
        Edit::Commit(joined)
    }

    /// Text delivered at once into the focused segment (paste or one-time
    /// code autofill). Anything longer than one character replaces the code.
    pub fn paste(&mut self, code: &str, text: &str) -> Edit {
        let Some(pin) = self.focused else {
            return Edit::Pass;
        };
        match text.chars().count() {
            0 => Edit::Handled,
            1 => self.set_value(code, pin.index(), text),
            _ => self.replace_code(text),
        }
    }

    /// A key press while a segment is focused.
    pub fn key(&mut self, code: &str, event: &KeyboardEvent) -> Edit {
        let Some(pin) = self.focused else {
            return Edit::Pass;
        };
        let index = pin.index();

        if event.is_delete() {
            if !self.segments[index].is_empty() {
                return Edit::Handled;
            }
            let previous = pin.previous();
            self.focused = Some(previous);
            self.segments[previous.index()].clear();
            trace!(from = index, to = previous.index(), "retreat on delete");
            return Edit::Commit(self.joined());
        }

        if event.modifiers.ctrl || event.modifiers.alt {
            return Edit::Pass;
        }

        match event.char() {
            Some(c) if c.is_ascii_digit() => {
                trace!(index, "digit typed");
                self.set_value(code, index, &c.to_string())
            }
            Some(_) => Edit::Handled,
            None => Edit::Pass,
        }
    }

    /// A complete code drops focus through `resync`; a partial one keeps
    /// focus on the first empty segment.
    fn replace_code(&mut self, text: &str) -> Edit {
        debug!(len = text.chars().count(), "whole code delivered");
        self.resync(text);
        Edit::Commit(text.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
