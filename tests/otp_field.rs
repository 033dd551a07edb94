//! End-to-end behavior of the OTP field through the public input registries.

use spark_otp::state::input::{route_event, InputEvent};
use spark_otp::state::keyboard::{self, reset_keyboard_state};
use spark_otp::state::mouse::reset_mouse_state;
use spark_otp::{otp_field, FocusPin, KeyboardEvent, Modifiers, OtpField, OtpFieldProps};
use spark_signals::{signal, Signal};

fn setup(digits: usize, initial: &str) -> (Signal<String>, OtpField) {
    reset_keyboard_state();
    reset_mouse_state();
    let code = signal(initial.to_string());
    let field = otp_field(OtpFieldProps::new(digits, code.clone())).expect("mount");
    (code, field)
}

fn segs(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn press(key: &str) -> bool {
    keyboard::dispatch(KeyboardEvent::new(key))
}

#[test]
fn typing_five_digits_completes_the_code() {
    let (code, field) = setup(5, "");

    for key in ["1", "2", "3", "4", "5"] {
        assert!(press(key));
    }

    assert_eq!(field.segments(), segs(&["1", "2", "3", "4", "5"]));
    assert_eq!(code.get(), "12345");
    assert_eq!(field.focused(), None);

    // Complete: further digits are not for the field
    assert!(!press("6"));
    assert_eq!(code.get(), "12345");
    field.cleanup();
}

#[test]
fn host_fill_resyncs_without_keystrokes() {
    let (code, field) = setup(5, "");

    code.set("12345".to_string());
    assert_eq!(field.segments(), segs(&["1", "2", "3", "4", "5"]));
    assert_eq!(field.focused(), None);
    field.cleanup();
}

#[test]
fn host_write_overrides_partial_input() {
    let (code, field) = setup(5, "");
    press("1");
    press("2");
    assert_eq!(field.focused(), Some(FocusPin(2)));

    code.set("98765".to_string());
    assert_eq!(field.segments(), segs(&["9", "8", "7", "6", "5"]));
    assert_eq!(field.focused(), None);

    code.set(String::new());
    assert_eq!(field.segments(), segs(&["", "", "", "", ""]));
    assert_eq!(field.focused(), None);

    // Nothing focused, so keystrokes are left to the host
    assert!(!press("4"));
    assert_eq!(code.get(), "");
    field.cleanup();
}

#[test]
fn partial_paste_leaves_focus_on_next_box() {
    let (code, field) = setup(5, "");

    assert!(route_event(InputEvent::Paste("12".to_string())));
    assert_eq!(code.get(), "12");
    assert_eq!(field.focused(), Some(FocusPin(2)));

    assert!(press("3"));
    assert_eq!(code.get(), "123");
    field.cleanup();
}

#[test]
fn host_clear_empties_every_segment() {
    let (code, field) = setup(5, "12345");
    assert_eq!(field.segments(), segs(&["1", "2", "3", "4", "5"]));

    code.set(String::new());
    assert_eq!(field.segments(), segs(&["", "", "", "", ""]));

    // Clear then activate: typing starts over from the first box
    assert!(field.activate());
    assert!(press("7"));
    assert_eq!(code.get(), "7");
    field.cleanup();
}

#[test]
fn autofill_into_first_box_fills_everything() {
    let (code, field) = setup(5, "");
    assert_eq!(field.focused(), Some(FocusPin(0)));

    assert!(route_event(InputEvent::Paste("98765".to_string())));

    assert_eq!(code.get(), "98765");
    assert_eq!(field.segments(), segs(&["9", "8", "7", "6", "5"]));
    assert_eq!(field.focused(), None);
    field.cleanup();
}

#[test]
fn over_long_value_in_one_box_becomes_the_code() {
    let (code, field) = setup(4, "");

    assert!(field.set_segment_value(2, "123456"));
    assert_eq!(code.get(), "123456");
    assert_eq!(field.segments(), segs(&["1", "2", "3", "4"]));
    assert_eq!(field.focused(), None);
    field.cleanup();
}

#[test]
fn field_length_value_in_one_box_is_clamped() {
    let (code, field) = setup(5, "");

    // Exactly N characters is still a single-box edit; whole codes go through paste
    assert!(field.set_segment_value(0, "98765"));
    assert_eq!(code.get(), "9");
    assert_eq!(field.segments(), segs(&["9", "", "", "", ""]));
    assert_eq!(field.focused(), Some(FocusPin(1)));

    assert!(field.paste("8765"));
    assert_eq!(code.get(), "8765");
    assert_eq!(field.focused(), Some(FocusPin(4)));
    field.cleanup();
}

#[test]
fn non_digits_are_swallowed() {
    let (code, field) = setup(4, "");

    assert!(press("x"));
    assert!(press("-"));
    assert_eq!(code.get(), "");
    assert_eq!(field.segments(), segs(&["", "", "", ""]));
    assert_eq!(field.focused(), Some(FocusPin(0)));

    // Modified keys are left to the host
    assert!(!keyboard::dispatch(KeyboardEvent::with_modifiers("c", Modifiers::ctrl())));
    field.cleanup();
}

#[test]
fn backspace_walks_back_and_clears() {
    let (code, field) = setup(4, "");
    press("1");
    press("2");
    press("3");
    assert_eq!(field.focused(), Some(FocusPin(3)));

    assert!(press("Backspace"));
    assert_eq!(field.focused(), Some(FocusPin(2)));
    assert_eq!(code.get(), "12");

    assert!(press("Backspace"));
    assert!(press("Backspace"));
    assert_eq!(field.focused(), Some(FocusPin(0)));
    assert_eq!(code.get(), "");

    // First box, already empty: focus stays put
    assert!(press("Backspace"));
    assert_eq!(field.focused(), Some(FocusPin(0)));
    assert_eq!(field.segments(), segs(&["", "", "", ""]));
    field.cleanup();
}

#[test]
fn only_first_empty_box_is_hit_testable() {
    let (code, field) = setup(5, "12");

    let testable: Vec<bool> = (0..5).map(|i| field.is_hit_testable(i)).collect();
    assert_eq!(testable, vec![false, false, true, false, false]);

    code.set("12345".to_string());
    assert!((0..5).all(|i| !field.is_hit_testable(i)));
    field.cleanup();
}

#[test]
fn partial_preset_code_renders_on_mount() {
    let (code, field) = setup(6, "314");
    assert_eq!(field.segments(), segs(&["3", "1", "4", "", "", ""]));
    assert_eq!(field.focused(), Some(FocusPin(3)));

    press("1");
    assert_eq!(code.get(), "3141");
    field.cleanup();
}
