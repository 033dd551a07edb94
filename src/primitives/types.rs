//! Primitive Types - Props and shared aliases for primitives.

use spark_signals::Signal;

use crate::types::{BorderStyle, Rgba};

/// Cleanup function returned by primitives.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// SegmentStyle
// =============================================================================

/// Presentation of each segment box. Carries no behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    /// Box width in cells, border included.
    pub width: u16,
    /// Box height in cells, border included.
    pub height: u16,
    /// Cells between adjacent boxes.
    pub gap: u16,
    pub border: BorderStyle,
    pub border_color: Rgba,
    /// Border color of the focused box.
    pub focus_color: Rgba,
    pub text_color: Rgba,
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self {
            width: 5,
            height: 3,
            gap: 1,
            border: BorderStyle::Rounded,
            border_color: Rgba::GRAY,
            focus_color: Rgba::CYAN,
            text_color: Rgba::TERMINAL_DEFAULT,
        }
    }
}

// =============================================================================
// OtpFieldProps
// =============================================================================

/// Properties for the OTP field primitive.
pub struct OtpFieldProps {
    /// Optional ID used in log output.
    pub id: Option<String>,

    /// Number of segments. Must be at least 1.
    pub number_of_digits: usize,

    /// The full code (two-way bound, owned by the host).
    pub code: Signal<String>,

    /// Focus the first unfilled segment on mount.
    pub auto_focus: bool,

    pub style: SegmentStyle,
}

impl OtpFieldProps {
    /// Create props with the required fields; everything else defaults.
    pub fn new(number_of_digits: usize, code: Signal<String>) -> Self {
        Self {
            id: None,
            number_of_digits,
            code,
            auto_focus: true,
            style: SegmentStyle::default(),
        }
    }
}
