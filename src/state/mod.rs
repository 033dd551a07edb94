//! State Module - Runtime input state
//!
//! - **Focus** - Segment focus value and clamped navigation
//! - **Keyboard** - Event types, dispatch, key and paste handler registry
//! - **Mouse** - Event types, mouse-down handler registry
//! - **Input** - crossterm conversion, polling and routing

pub mod focus;
pub mod input;
pub mod keyboard;
pub mod mouse;

pub use focus::FocusPin;
pub use input::{poll_event, read_event, route_event, InputEvent};
pub use keyboard::{KeyState, KeyboardEvent, Modifiers};
pub use mouse::{MouseAction, MouseButton, MouseEvent};
