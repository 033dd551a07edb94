//! TUI Primitives - Component building blocks.
//!
//! - [`otp_field`] - Segmented one-time-code input bound to a host signal
//! - [`segments`] - The pure sync and edit rules behind it
//!
//! # Architecture
//!
//! A primitive is mounted with a props struct and returns a handle that
//! owns its cleanup functions:
//! 1. Build the pure state from props
//! 2. Register an effect on the bound signal (signal → state)
//! 3. Register input handlers (state → signal)
//! 4. Return the handle; `cleanup()` undoes 2 and 3
//!
//! Pass the host's signal itself, not its current value, or the binding is
//! lost:
//!
//! ```ignore
//! // CORRECT - the field follows every write
//! otp_field(OtpFieldProps::new(6, code.clone()));
//!
//! // WRONG - a fresh signal nobody else writes
//! otp_field(OtpFieldProps::new(6, signal(code.get())));
//! ```

mod otp_field;
pub mod segments;
mod types;

pub use otp_field::{otp_field, OtpField};
pub use segments::{Edit, SegmentedCode};
pub use types::*;
