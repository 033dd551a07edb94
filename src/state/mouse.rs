//! Mouse Module - Mouse event types and click handler registry
//!
//! Only presses matter to the OTP field: a press on the active segment is the
//! terminal version of tapping it. Hit-testing itself lives with the widget,
//! which knows which segment is interactable.
//!
//! # API
//!
//! - `dispatch(event)` - Dispatch mouse event
//! - `on_mouse_down(fn)` - Global mouse down handler
//! - `last_event` - Get last mouse event

use std::cell::RefCell;
use spark_signals::{signal, Signal};

use super::keyboard::Modifiers;

// =============================================================================
// TYPES
// =============================================================================

/// Mouse action type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Down,
    Up,
    Move,
    Drag,
    Scroll,
}

/// Mouse button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    #[default]
    None,
}

/// Mouse event
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    pub action: MouseAction,
    pub button: MouseButton,
    /// X coordinate (0-indexed)
    pub x: u16,
    /// Y coordinate (0-indexed)
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event
    pub fn new(action: MouseAction, button: MouseButton, x: u16, y: u16) -> Self {
        Self {
            action,
            button,
            x,
            y,
            modifiers: Modifiers::default(),
        }
    }

    /// Create a mouse down event
    pub fn down(button: MouseButton, x: u16, y: u16) -> Self {
        Self::new(MouseAction::Down, button, x, y)
    }
}

/// Mouse handler. Return true to consume the event.
pub type MouseHandler = Box<dyn Fn(&MouseEvent) -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<MouseEvent>> = signal(None);
    static DOWN_HANDLERS: RefCell<(usize, Vec<(usize, MouseHandler)>)> = RefCell::new((0, Vec::new()));
}

/// Get the last mouse event
pub fn last_event() -> Option<MouseEvent> {
    LAST_EVENT.with(|s| s.get())
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Dispatch a mouse event. Returns true if a handler consumed it.
pub fn dispatch(event: MouseEvent) -> bool {
    LAST_EVENT.with(|s| s.set(Some(event.clone())));

    if event.action != MouseAction::Down {
        return false;
    }

    DOWN_HANDLERS.with(|handlers| {
        let handlers = handlers.borrow();
        handlers.1.iter().any(|(_, handler)| handler(&event))
    })
}

/// Subscribe to mouse down events.
/// Returns cleanup function.
pub fn on_mouse_down<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&MouseEvent) -> bool + 'static,
{
    let id = DOWN_HANDLERS.with(|handlers| {
        let mut handlers = handlers.borrow_mut();
        let id = handlers.0;
        handlers.0 += 1;
        handlers.1.push((id, Box::new(handler)));
        id
    });

    move || {
        DOWN_HANDLERS.with(|handlers| {
            handlers.borrow_mut().1.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Reset mouse state (for testing)
pub fn reset_mouse_state() {
    DOWN_HANDLERS.with(|handlers| {
        *handlers.borrow_mut() = (0, Vec::new());
    });
    LAST_EVENT.with(|s| s.set(None));
}
