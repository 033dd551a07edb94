//! Terminal renderer - the "blind" output layer.
//!
//! The renderer knows only about cells. It doesn't understand segments or
//! focus. The widget fills a FrameBuffer; the DiffRenderer writes it out.
//!
//! ```text
//! OtpField::render → FrameBuffer → DiffRenderer → Terminal
//! ```

mod buffer;
mod diff;

pub use buffer::FrameBuffer;
pub use diff::DiffRenderer;
