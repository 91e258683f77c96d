//! Tests for trigonometric, logarithmic and conversion functions.

use super::{assert_approx, assert_x, run};

// ============================================================================
// Trigonometry
// ============================================================================

#[test]
fn sine_in_degrees() {
    assert_x("3 0 SIN", 0.5);
}

#[test]
fn quarter_turns_are_exact() {
    let engine = run("9 0 COS");
    assert_eq!(engine.stack().x().value(), 0.0);
    let engine = run("1 8 0 SIN");
    assert_eq!(engine.stack().x().value(), 0.0);
}

#[test]
fn radians() {
    // π/2 in RAD
    assert_x("g 8 g EEX 2 / SIN", 1.0);
}

#[test]
fn grads() {
    assert_x("g 9 1 0 0 SIN", 1.0);
}

#[test]
fn inverse_trig() {
    assert_x("1 g SIN", 90.0);
    assert_x("0 g COS", 90.0);
    assert_x("1 g TAN", 45.0);
}

#[test]
fn tangent_at_ninety_overflows() {
    let engine = run("9 0 TAN");
    assert!(engine.stack().x().is_saturated());
    assert!(engine.get_display().status.overflow);
}

#[test]
fn hyperbolic() {
    assert_x("1 f GTO SIN", 1.0_f64.sinh());
    assert_x("1 g GTO COS", 0.0);
    assert_x("0 f GTO TAN", 0.0);
}

// ============================================================================
// Logarithms and exponentials
// ============================================================================

#[test]
fn natural_log_and_exp() {
    assert_x("1 g e^x", 0.0);
    assert_x("1 e^x", std::f64::consts::E);
}

#[test]
fn common_log_and_power_of_ten() {
    assert_x("1 0 0 0 g 10^x", 3.0);
    assert_x("3 10^x", 1000.0);
}

#[test]
fn pi() {
    assert_x("g EEX", std::f64::consts::PI);
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn rect_to_polar() {
    let engine = run("4 ENTER 3 g 1");
    assert_approx(engine.stack().x().value(), 5.0);
    assert_approx(engine.stack().y().value(), 53.130_102_354_155_98);
    assert_eq!(engine.stack().last_x().value(), 3.0);
}

#[test]
fn polar_to_rect() {
    let engine = run("3 0 ENTER 2 f 1");
    assert_approx(engine.stack().x().value(), 3.0_f64.sqrt());
    assert_approx(engine.stack().y().value(), 1.0);
}

#[test]
fn hours_minutes_seconds() {
    assert_x("1 . 5 f 2", 1.3);
    assert_x("1 . 3 g 2", 1.5);
}

#[test]
fn degrees_and_radians() {
    assert_x("1 8 0 f 3", std::f64::consts::PI);
    assert_x("g EEX g 3", 180.0);
}
