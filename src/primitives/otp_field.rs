//! OTP Field Primitive - Segmented one-time-code input.
//!
//! N single-character boxes kept in sync with one code string owned by the
//! host.
//!
//! # Features
//!
//! - Two-way binding with the host's `Signal<String>`
//! - Advance on type, retreat-and-clear on delete
//! - Digits only; other characters are swallowed
//! - Whole-code paste / one-time-code autofill into any box
//! - Only the first unfilled box can be activated by click
//!
//! # Example
//!
//! ```ignore
//! use spark_otp::primitives::{otp_field, OtpFieldProps};
//! use spark_signals::signal;
//!
//! let code = signal(String::new());
//! let field = otp_field(OtpFieldProps::new(5, code.clone()))?;
//!
//! // Host "Fill" - the boxes follow
//! code.set("12345".to_string());
//! assert_eq!(field.segments()[4], "5");
//!
//! // Host "Clear"
//! code.set(String::new());
//! field.cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{effect, signal, Signal};
use tracing::debug;

use super::segments::{Edit, SegmentedCode};
use super::types::{Cleanup, OtpFieldProps, SegmentStyle};
use crate::error::Result;
use crate::layout::{compute_segment_layout, SegmentLayout};
use crate::renderer::FrameBuffer;
use crate::state::focus::FocusPin;
use crate::state::keyboard::{self, KeyboardEvent};
use crate::state::mouse::{self, MouseButton};
use crate::types::Attr;

// =============================================================================
// Shared field state
// =============================================================================

struct FieldInner {
    id: Option<String>,
    code: Signal<String>,
    state: RefCell<SegmentedCode>,
    style: SegmentStyle,
    origin: RefCell<(u16, u16)>,

    // Published copies for render effects. Written, never read, by the field.
    segments: Signal<Vec<String>>,
    focused: Signal<Option<FocusPin>>,
    published: RefCell<(Vec<String>, Option<FocusPin>)>,
}

impl FieldInner {
    /// Mirror the segment state into the public signals.
    fn publish(&self) {
        let (segments, focused) = {
            let state = self.state.borrow();
            (state.segments().to_vec(), state.focused())
        };

        let (segments_changed, focus_changed) = {
            let mut published = self.published.borrow_mut();
            let segments_changed = published.0 != segments;
            let focus_changed = published.1 != focused;
            *published = (segments.clone(), focused);
            (segments_changed, focus_changed)
        };

        if segments_changed {
            self.segments.set(segments);
        }
        if focus_changed {
            self.focused.set(focused);
        }
    }

    /// Apply the result of an input transition. Segments → code direction.
    fn commit(&self, edit: Edit) -> bool {
        let consumed = edit.is_consumed();
        self.publish();
        if let Edit::Commit(new_code) = edit {
            if self.code.get() != new_code {
                debug!(id = ?self.id, len = new_code.chars().count(), "code updated from segments");
                // Re-enters the resync effect synchronously.
                self.code.set(new_code);
            }
        }
        consumed
    }

    fn key_press(&self, event: &KeyboardEvent) -> bool {
        let code = self.code.get();
        let edit = self.state.borrow_mut().key(&code, event);
        self.commit(edit)
    }

    fn set_segment_value(&self, index: usize, value: &str) -> bool {
        let code = self.code.get();
        let edit = self.state.borrow_mut().set_value(&code, index, value);
        self.commit(edit)
    }

    fn paste(&self, text: &str) -> bool {
        let code = self.code.get();
        let edit = self.state.borrow_mut().paste(&code, text);
        self.commit(edit)
    }

    fn activate(&self) -> bool {
        let code = self.code.get();
        let activated = self.state.borrow_mut().activate(&code);
        self.publish();
        activated
    }

    fn layout(&self) -> Result<SegmentLayout> {
        let (x, y) = *self.origin.borrow();
        let digits = self.state.borrow().digits();
        compute_segment_layout(digits, &self.style, x, y)
    }

    fn hit_test(&self, x: u16, y: u16) -> Option<usize> {
        let index = self.layout().ok()?.segment_at(x, y)?;
        let code = self.code.get();
        self.state
            .borrow()
            .is_hit_testable(&code, index)
            .then_some(index)
    }

    fn click(&self, x: u16, y: u16) -> bool {
        let Some(index) = self.hit_test(x, y) else {
            return false;
        };
        let code = self.code.get();
        let focused = self.state.borrow_mut().focus(&code, index);
        self.publish();
        focused
    }
}

// =============================================================================
// OtpField handle
// =============================================================================

/// A mounted OTP field. Call [`OtpField::cleanup`] to unmount.
pub struct OtpField {
    inner: Rc<FieldInner>,
    cleanups: Vec<Cleanup>,
}

/// Mount an OTP field.
///
/// Segments are synchronized from the current code immediately, and again
/// every time the host writes the code signal. Keyboard, paste and mouse
/// handlers are registered with the global registries.
pub fn otp_field(props: OtpFieldProps) -> Result<OtpField> {
    let state = SegmentedCode::new(props.number_of_digits)?;
    let digits = state.digits();

    let inner = Rc::new(FieldInner {
        id: props.id,
        code: props.code,
        state: RefCell::new(state),
        style: props.style,
        origin: RefCell::new((0, 0)),
        segments: signal(vec![String::new(); digits]),
        focused: signal(None),
        published: RefCell::new((vec![String::new(); digits], None)),
    });

    let mut cleanups: Vec<Cleanup> = Vec::new();

    // Code → segments. The first run is the mount-time resync.
    let inner_fx = inner.clone();
    let stop_sync = effect(move || {
        let code = inner_fx.code.get();
        inner_fx.state.borrow_mut().resync(&code);
        inner_fx.publish();
    });
    cleanups.push(Box::new(stop_sync));

    if props.auto_focus {
        inner.activate();
    }

    let inner_keys = inner.clone();
    cleanups.push(Box::new(keyboard::on(move |event| inner_keys.key_press(event))));

    let inner_paste = inner.clone();
    cleanups.push(Box::new(keyboard::on_paste(move |text| inner_paste.paste(text))));

    let inner_mouse = inner.clone();
    cleanups.push(Box::new(mouse::on_mouse_down(move |event| {
        event.button == MouseButton::Left && inner_mouse.click(event.x, event.y)
    })));

    debug!(id = ?inner.id, digits, "otp field mounted");
    Ok(OtpField { inner, cleanups })
}

impl OtpField {
    pub fn digits(&self) -> usize {
        self.inner.state.borrow().digits()
    }

    /// Current segment values (tracked read).
    pub fn segments(&self) -> Vec<String> {
        self.inner.segments.get()
    }

    /// Currently focused segment (tracked read).
    pub fn focused(&self) -> Option<FocusPin> {
        self.inner.focused.get()
    }

    /// The host's code.
    pub fn code(&self) -> String {
        self.inner.code.get()
    }

    /// Segments signal, for render effects.
    pub fn segments_signal(&self) -> Signal<Vec<String>> {
        self.inner.segments.clone()
    }

    /// Focus signal, for render effects.
    pub fn focus_signal(&self) -> Signal<Option<FocusPin>> {
        self.inner.focused.clone()
    }

    /// Feed a key press to the focused segment. Returns true if consumed.
    pub fn key_press(&self, event: &KeyboardEvent) -> bool {
        self.inner.key_press(event)
    }

    /// A segment's value changed to `value` (IME composition or any other
    /// direct assignment). Values of up to N characters are clamped to their
    /// first character; only a value longer than N replaces the code. Use
    /// [`OtpField::paste`] to deliver a whole code at once. Returns true if
    /// consumed.
    pub fn set_segment_value(&self, index: usize, value: &str) -> bool {
        self.inner.set_segment_value(index, value)
    }

    /// Text delivered at once into the focused segment. Two or more
    /// characters become the whole code (one-time-code autofill).
    pub fn paste(&self, text: &str) -> bool {
        self.inner.paste(text)
    }

    /// Focus the first unfilled segment. Returns false if the code is complete.
    pub fn activate(&self) -> bool {
        self.inner.activate()
    }

    /// Clear focus.
    pub fn blur(&self) {
        self.inner.state.borrow_mut().blur();
        self.inner.publish();
    }

    /// Whether segment `index` can be activated directly right now.
    pub fn is_hit_testable(&self, index: usize) -> bool {
        let code = self.inner.code.get();
        self.inner.state.borrow().is_hit_testable(&code, index)
    }

    /// Move the field's top-left corner.
    pub fn set_origin(&self, x: u16, y: u16) {
        *self.inner.origin.borrow_mut() = (x, y);
    }

    /// Box placement at the current origin.
    pub fn layout(&self) -> Result<SegmentLayout> {
        self.inner.layout()
    }

    /// Interactable segment under a point.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<usize> {
        self.inner.hit_test(x, y)
    }

    /// Focus the segment under a point if it is interactable.
    pub fn click(&self, x: u16, y: u16) -> bool {
        self.inner.click(x, y)
    }

    /// Draw the field. Reads the published signals, so calling this from an
    /// effect re-renders on every change.
    pub fn render(&self, buffer: &mut FrameBuffer) -> Result<()> {
        let layout = self.layout()?;
        let segments = self.inner.segments.get();
        let focused = self.inner.focused.get();
        let style = &self.inner.style;

        for (index, rect) in layout.boxes.iter().enumerate() {
            let is_focused = focused == Some(FocusPin(index));
            let (color, attrs) = if is_focused {
                (style.focus_color, Attr::BOLD)
            } else {
                (style.border_color, Attr::NONE)
            };
            buffer.draw_border(*rect, style.border, color, attrs);

            match segments.get(index) {
                Some(value) if !value.is_empty() => {
                    buffer.draw_centered(*rect, value, style.text_color, Attr::BOLD);
                }
                _ if is_focused => {
                    buffer.draw_centered(*rect, "_", style.focus_color, Attr::DIM);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Unmount: stop the sync effect and drop all input handlers.
    pub fn cleanup(self) {
        for cleanup in self.cleanups {
            cleanup();
        }
        debug!(id = ?self.inner.id, "otp field unmounted");
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::keyboard::reset_keyboard_state;
    use crate::state::mouse::{reset_mouse_state, MouseEvent};
    use crate::types::Rect;

    fn setup() {
        reset_keyboard_state();
        reset_mouse_state();
    }

    fn segs(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_zero_digits_is_an_error() {
        setup();
        let code = signal(String::new());
        assert!(otp_field(OtpFieldProps::new(0, code)).is_err());
    }

    #[test]
    fn test_mount_resyncs_preset_code() {
        setup();
        let code = signal("12".to_string());
        let field = otp_field(OtpFieldProps::new(4, code)).unwrap();

        assert_eq!(field.segments(), segs(&["1", "2", "", ""]));
        assert_eq!(field.focused(), Some(FocusPin(2)));
        field.cleanup();
    }

    #[test]
    fn test_auto_focus_off() {
        setup();
        let code = signal(String::new());
        let field = otp_field(OtpFieldProps {
            auto_focus: false,
            ..OtpFieldProps::new(3, code)
        })
        .unwrap();

        assert_eq!(field.focused(), None);
        assert!(!field.key_press(&KeyboardEvent::new("1")));
        assert!(field.activate());
        assert_eq!(field.focused(), Some(FocusPin(0)));
        field.cleanup();
    }

    #[test]
    fn test_typing_writes_host_code() {
        setup();
        let code = signal(String::new());
        let field = otp_field(OtpFieldProps::new(3, code.clone())).unwrap();

        assert!(field.key_press(&KeyboardEvent::new("4")));
        assert!(field.key_press(&KeyboardEvent::new("2")));
        assert_eq!(code.get(), "42");
        assert_eq!(field.focused(), Some(FocusPin(2)));
        field.cleanup();
    }

    #[test]
    fn test_effect_follows_host_writes() {
        setup();
        let code = signal(String::new());
        let field = otp_field(OtpFieldProps::new(3, code.clone())).unwrap();

        code.set("987".to_string());
        assert_eq!(field.segments(), segs(&["9", "8", "7"]));
        assert_eq!(field.focused(), None);

        code.set(String::new());
        assert_eq!(field.segments(), segs(&["", "", ""]));
        field.cleanup();
    }

    #[test]
    fn test_cleanup_stops_sync_and_handlers() {
        setup();
        let code = signal(String::new());
        let field = otp_field(OtpFieldProps::new(3, code.clone())).unwrap();
        let segments = field.segments_signal();
        field.cleanup();

        code.set("123".to_string());
        assert_eq!(segments.get(), segs(&["", "", ""]));
        assert!(!keyboard::dispatch(KeyboardEvent::new("5")));
        assert_eq!(code.get(), "123");
    }

    #[test]
    fn test_click_only_active_segment() {
        setup();
        let code = signal("1".to_string());
        let field = otp_field(OtpFieldProps {
            auto_focus: false,
            ..OtpFieldProps::new(4, code)
        })
        .unwrap();

        // Boxes at x = 0, 6, 12, 18 (width 5, gap 1)
        assert_eq!(field.hit_test(1, 1), None);
        assert_eq!(field.hit_test(13, 1), None);
        assert_eq!(field.hit_test(7, 1), Some(1));

        assert!(!mouse::dispatch(MouseEvent::down(MouseButton::Left, 13, 1)));
        assert_eq!(field.focused(), None);

        assert!(mouse::dispatch(MouseEvent::down(MouseButton::Left, 7, 1)));
        assert_eq!(field.focused(), Some(FocusPin(1)));
        field.cleanup();
    }

    #[test]
    fn test_origin_moves_layout() {
        setup();
        let code = signal(String::new());
        let field = otp_field(OtpFieldProps::new(2, code)).unwrap();
        field.set_origin(3, 2);

        let layout = field.layout().unwrap();
        assert_eq!(layout.boxes[0], Rect::new(3, 2, 5, 3));
        assert_eq!(field.hit_test(4, 3), Some(0));
        field.cleanup();
    }

    #[test]
    fn test_render_boxes() {
        setup();
        let code = signal("7".to_string());
        let field = otp_field(OtpFieldProps::new(2, code)).unwrap();

        let mut fb = FrameBuffer::new(11, 3);
        field.render(&mut fb).unwrap();
        assert_eq!(
            fb.to_lines(),
            vec!["╭───╮ ╭───╮", "│ 7 │ │ _ │", "╰───╯ ╰───╯"]
        );
        field.cleanup();
    }

    #[test]
    fn test_render_effect_reruns_on_change() {
        use std::cell::Cell;

        setup();
        let code = signal(String::new());
        let field = Rc::new(otp_field(OtpFieldProps::new(2, code.clone())).unwrap());

        let renders = Rc::new(Cell::new(0));
        let renders_fx = renders.clone();
        let field_fx = field.clone();
        let stop = effect(move || {
            let mut fb = FrameBuffer::new(11, 3);
            let _ = field_fx.render(&mut fb);
            renders_fx.set(renders_fx.get() + 1);
        });
        assert_eq!(renders.get(), 1);

        field.key_press(&KeyboardEvent::new("3"));
        assert!(renders.get() > 1);

        stop();
    }
}
