//! # spark-otp
//!
//! Segmented one-time-code input for reactive terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity. The host owns the code as a `Signal<String>`; the
//! field splits it into N single-character segments and writes it back as the
//! user types.
//!
//! ## Architecture
//!
//! ```text
//! crossterm event → state::input → keyboard/mouse registries → OtpField
//!                                                      │
//!   host code signal ◄──── segments → code ────────────┤
//!   host code signal ────► code → segments (effect) ───┘
//!                                                      │
//!            OtpField::render → FrameBuffer → DiffRenderer → terminal
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Colors, attributes, cells, rects, border styles
//! - [`state`] - Focus value, keyboard/mouse registries, crossterm input
//! - [`primitives`] - The OTP field and its pure segment logic
//! - [`layout`] - Taffy row layout for the boxes
//! - [`renderer`] - FrameBuffer and differential terminal output

pub mod error;
pub mod layout;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod types;

pub use error::{OtpError, Result};

pub use types::{Attr, BorderStyle, Cell, Rect, Rgba};

pub use layout::{compute_segment_layout, SegmentLayout};

pub use renderer::{DiffRenderer, FrameBuffer};

pub use primitives::{otp_field, Cleanup, Edit, OtpField, OtpFieldProps, SegmentStyle, SegmentedCode};

pub use state::{
    FocusPin, InputEvent, KeyState, KeyboardEvent, Modifiers, MouseAction, MouseButton,
    MouseEvent,
};
