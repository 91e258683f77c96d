//! Tests for digit entry.

use super::{assert_stack, assert_x, run};

// ============================================================================
// Mantissa
// ============================================================================

#[test]
fn digits_accumulate() {
    assert_stack("1 2 3 ENTER", &[123.0, 123.0]);
}

#[test]
fn chs_while_entering() {
    let engine = run("4 CHS");
    assert_eq!(engine.entry_text().as_deref(), Some("-4"));
    let display = engine.get_display();
    assert_eq!(display.sign, '-');
    assert_eq!(display.mantissa_text, "4");

    assert_x("4 CHS ENTER", -4.0);
}

#[test]
fn leading_zero_before_point() {
    let engine = run("0 . 0 1");
    assert_eq!(engine.entry_text().as_deref(), Some("0.01"));
    assert_eq!(engine.get_display().mantissa_text, "0.01");
    assert_x("0 . 0 1 ENTER", 0.01);
}

#[test]
fn leading_zeros_suppressed() {
    assert_eq!(run("0 0 7").entry_text().as_deref(), Some("7"));
}

#[test]
fn point_first() {
    assert_eq!(run(". 5").entry_text().as_deref(), Some("0.5"));
}

#[test]
fn eleventh_digit_ignored() {
    let engine = run("1 2 3 4 5 6 7 8 9 0 1");
    assert_eq!(engine.entry_text().as_deref(), Some("1234567890"));
    assert_eq!(engine.stack().x().value(), 1_234_567_890.0);
}

#[test]
fn second_point_ignored() {
    assert_eq!(run("1 . 2 . 3").entry_text().as_deref(), Some("1.23"));
}

// ============================================================================
// Exponent
// ============================================================================

#[test]
fn exponent_entry() {
    let engine = run("1 . 5 EEX 3");
    let display = engine.get_display();
    assert_eq!(display.mantissa_text, "1.5");
    assert_eq!(display.exponent_text, " 03");
    assert_eq!(engine.stack().x().value(), 1500.0);
}

#[test]
fn negative_exponent() {
    assert_x("2 EEX CHS 3 ENTER", 2e-3);
}

#[test]
fn eex_alone_means_one() {
    assert_x("EEX 4 ENTER", 1e4);
}

// ============================================================================
// Backspace and stack lift
// ============================================================================

#[test]
fn backspace_edits_entry() {
    assert_eq!(run("1 2 3 BSP").entry_text().as_deref(), Some("12"));
}

#[test]
fn backspace_emptying_entry_disables_lift() {
    // 7 ENTER 5 ← leaves X = 0 with lift disabled, so 3 replaces it.
    assert_stack("7 ENTER 5 BSP 3", &[3.0, 7.0, 0.0]);
}

#[test]
fn digit_after_result_starts_new_number() {
    let engine = run("2 ENTER 3 + 4");
    assert_eq!(engine.entry_text().as_deref(), Some("4"));
    assert_stack("2 ENTER 3 + 4", &[4.0, 5.0]);
}

#[test]
fn digit_after_enter_overwrites_x() {
    assert_stack("6 ENTER 2", &[2.0, 6.0, 0.0]);
}
