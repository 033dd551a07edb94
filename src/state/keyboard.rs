//! Keyboard Module - Keyboard event state and handler registry
//!
//! State and handler registry for keyboard and paste events.
//! Does NOT own stdin (that is the input module).
//!
//! # API
//!
//! - `last_event` - Get last keyboard event
//! - `last_key` - Get last key pressed
//! - `on(handler)` - Subscribe to all keyboard events
//! - `on_key(key, fn)` - Subscribe to a specific key
//! - `on_paste(handler)` - Subscribe to pasted / autofilled text
//!
//! # Example
//!
//! ```ignore
//! use spark_otp::state::keyboard;
//!
//! let cleanup = keyboard::on_key("F3", || {
//!     code.set(String::new());
//!     true // Consume event
//! });
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use spark_signals::{signal, Signal};

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "7", "Backspace", "F2")
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// The character this key types, if it types exactly one.
    pub fn char(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    /// Backspace or forward delete.
    pub fn is_delete(&self) -> bool {
        self.key == "Backspace" || self.key == "Delete"
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Box<dyn Fn(&KeyboardEvent) -> bool>;

/// Handler for specific key. Return true to consume the event.
pub type KeySpecificHandler = Box<dyn Fn() -> bool>;

/// Handler for pasted text. Return true to consume it.
pub type PasteHandler = Box<dyn Fn(&str) -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<KeyboardEvent>> = signal(None);
}

/// Get the last keyboard event
pub fn last_event() -> Option<KeyboardEvent> {
    LAST_EVENT.with(|s| s.get())
}

/// Get the last key pressed
pub fn last_key() -> String {
    last_event().map(|e| e.key).unwrap_or_default()
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct HandlerRegistry {
    global_handlers: Vec<(usize, KeyHandler)>,
    key_handlers: HashMap<String, Vec<(usize, KeySpecificHandler)>>,
    paste_handlers: Vec<(usize, PasteHandler)>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            global_handlers: Vec::new(),
            key_handlers: HashMap::new(),
            paste_handlers: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Dispatch a keyboard event to all registered handlers.
/// Returns true if any handler consumed the event.
///
/// Key-specific handlers run before global ones. Handlers may write signals,
/// but must not register or remove keyboard handlers while running.
pub fn dispatch(event: KeyboardEvent) -> bool {
    LAST_EVENT.with(|s| s.set(Some(event.clone())));

    // Only dispatch press events to handlers
    if event.state != KeyState::Press {
        return false;
    }

    REGISTRY.with(|reg| {
        let reg = reg.borrow();

        if let Some(handlers) = reg.key_handlers.get(&event.key) {
            for (_, handler) in handlers {
                if handler() {
                    return true;
                }
            }
        }

        for (_, handler) in &reg.global_handlers {
            if handler(&event) {
                return true;
            }
        }

        false
    })
}

/// Dispatch pasted text (bracketed paste or one-time-code autofill).
/// Returns true if a handler consumed it.
pub fn dispatch_paste(text: &str) -> bool {
    REGISTRY.with(|reg| {
        let reg = reg.borrow();
        reg.paste_handlers.iter().any(|(_, handler)| handler(text))
    })
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to all keyboard events.
/// Return true from handler to consume the event.
/// Returns cleanup function.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.global_handlers.push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.global_handlers.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Subscribe to a specific key.
/// Return true to consume the event.
/// Returns cleanup function.
pub fn on_key<F>(key: &str, handler: F) -> impl FnOnce()
where
    F: Fn() -> bool + 'static,
{
    let key = key.to_string();
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.key_handlers
            .entry(key.clone())
            .or_default()
            .push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.key_handlers.get_mut(&key) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.key_handlers.remove(&key);
                }
            }
        });
    }
}

/// Subscribe to pasted text.
/// Returns cleanup function.
pub fn on_paste<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&str) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.paste_handlers.push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.paste_handlers.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Reset keyboard state (for testing)
pub fn reset_keyboard_state() {
    REGISTRY.with(|reg| {
        *reg.borrow_mut() = HandlerRegistry::new();
    });
    LAST_EVENT.with(|s| s.set(None));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_keyboard_state();
    }

    #[test]
    fn test_initial_state() {
        setup();
        assert!(last_event().is_none());
        assert_eq!(last_key(), "");
    }

    #[test]
    fn test_dispatch_updates_state() {
        setup();

        dispatch(KeyboardEvent::new("4"));
        assert_eq!(last_key(), "4");

        dispatch(KeyboardEvent::new("Backspace"));
        assert_eq!(last_key(), "Backspace");
    }

    #[test]
    fn test_global_handler_cleanup() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let cleanup = on(move |_event| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        dispatch(KeyboardEvent::new("1"));
        dispatch(KeyboardEvent::new("2"));
        assert_eq!(count.get(), 2);

        cleanup();

        dispatch(KeyboardEvent::new("3"));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_key_handler_consumes_before_global() {
        setup();

        let reached = Rc::new(Cell::new(false));
        let reached_clone = reached.clone();

        let _c1 = on_key("F2", || true);
        let _c2 = on(move |_| {
            reached_clone.set(true);
            false
        });

        assert!(dispatch(KeyboardEvent::new("F2")));
        assert!(!reached.get());

        assert!(!dispatch(KeyboardEvent::new("F3")));
        assert!(reached.get());
    }

    #[test]
    fn test_release_not_dispatched() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let _cleanup = on(move |_| {
            count_clone.set(count_clone.get() + 1);
            true
        });

        let release = KeyboardEvent {
            state: KeyState::Release,
            ..KeyboardEvent::new("5")
        };
        assert!(!dispatch(release));
        assert_eq!(count.get(), 0);
        assert_eq!(last_key(), "5");
    }

    #[test]
    fn test_paste_dispatch() {
        setup();

        let pasted = Rc::new(RefCell::new(String::new()));
        let pasted_clone = pasted.clone();
        let cleanup = on_paste(move |text| {
            pasted_clone.borrow_mut().push_str(text);
            true
        });

        assert!(dispatch_paste("98765"));
        assert_eq!(pasted.borrow().as_str(), "98765");

        cleanup();
        assert!(!dispatch_paste("1"));
    }

    #[test]
    fn test_event_char() {
        assert_eq!(KeyboardEvent::new("7").char(), Some('7'));
        assert_eq!(KeyboardEvent::new("Enter").char(), None);
        assert_eq!(KeyboardEvent::new("").char(), None);
        assert!(KeyboardEvent::new("Delete").is_delete());
        assert!(!KeyboardEvent::new("d").is_delete());
    }
}
