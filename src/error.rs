//! Error type for the crate.
//!
//! Input is never an error: bad keystrokes are dropped and over-long values
//! are read as pastes. Only construction, layout and terminal I/O can fail.

/// Errors produced by the OTP field and its rendering pipeline.
#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    #[error("an OTP field needs at least one digit")]
    ZeroDigits,
    #[error("layout failed: {0}")]
    Layout(String),
    #[error("terminal i/o: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OtpError>;
