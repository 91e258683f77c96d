//! Tests for display formatting and annunciators.

use rpn15c::{DisplayFormat, Engine};

use super::{display_of, press_all, run};

// ============================================================================
// Number formats
// ============================================================================

#[test]
fn default_is_fix_4() {
    assert_eq!(display_of("5 ENTER 3 +"), "8.0000");
    assert_eq!(display_of(""), "0.0000");
}

#[test]
fn fix_digits() {
    assert_eq!(display_of("f 7 2 1 . 2 3 4 ENTER"), "1.23");
    assert_eq!(display_of("f 7 0 2 ENTER"), "2.");
}

#[test]
fn sci_digits() {
    assert_eq!(display_of("f 8 3 1 2 3 4 6 ENTER"), "1.235 04");
}

#[test]
fn eng_digits() {
    assert_eq!(display_of("f 9 2 1 2 3 4 5 ENTER"), "12.3 03");
}

#[test]
fn negative_numbers() {
    assert_eq!(display_of("2 CHS ENTER"), "-2.0000");
}

#[test]
fn fix_rounding_carry_drops_a_decimal() {
    assert_eq!(display_of("f 7 9 1 0 ENTER EEX CHS 1 1 -"), "10.00000000");
}

#[test]
fn large_values_switch_to_sci() {
    assert_eq!(display_of("EEX 1 2 ENTER"), "1.0000 12");
}

#[test]
fn entry_is_shown_verbatim() {
    assert_eq!(display_of("1 . 5 0"), "1.50");
    assert_eq!(display_of("2 EEX CHS 5"), "2 -05");
}

#[test]
fn format_change_keeps_value() {
    let mut engine = Engine::new();
    press_all(&mut engine, "2 ENTER 3 /");
    let before = engine.stack().x();
    press_all(&mut engine, "f 8 2");
    assert_eq!(engine.modes().format, DisplayFormat::Sci(2));
    assert_eq!(engine.get_display().line(), "6.67 -01");
    assert_eq!(engine.stack().x(), before);
}

#[test]
fn round_to_display() {
    let engine = run("f 7 2 2 ENTER 3 / g x<>y");
    assert_eq!(engine.stack().x().value(), 0.67);
    assert_eq!(engine.stack().last_x().value(), 2.0 / 3.0);
}

// ============================================================================
// Annunciators
// ============================================================================

#[test]
fn shift_annunciators() {
    let engine = run("f");
    assert!(engine.get_display().status.f_shift);
    let engine = run("g");
    let status = engine.get_display().status;
    assert!(status.g_shift);
    assert!(!status.f_shift);
}

#[test]
fn angle_annunciators() {
    let status = run("g 8").get_display().status;
    assert!(status.rad && !status.grad);
    let status = run("g 9").get_display().status;
    assert!(status.grad && !status.rad);
    let status = run("g 8 g 7").get_display().status;
    assert!(!status.grad && !status.rad);
}

#[test]
fn unsupported_annunciators_stay_off() {
    let status = run("f RCL g 8 f 7 2 1 ENTER").get_display().status;
    assert!(!status.dmy);
    assert!(!status.complex);
    assert!(!status.prgm);
    assert_eq!(status.to_string(), "USER RAD");
}

#[test]
fn error_display() {
    let display = run("1 ENTER 0 /").get_display();
    assert_eq!(display.mantissa_text, "Error 0");
    assert!(display.status.error);
}

#[test]
fn get_display_is_idempotent() {
    let engine = run("1 2 ENTER 5 g 8 f");
    assert_eq!(engine.get_display(), engine.get_display());
}
