//! Tests for Σ+ and the statistics functions.

use rpn15c::registers::RegisterAddr;
use rpn15c::{EngineError, Number};

use super::{assert_approx, run, stack_of};

/// Points on y = 2x + 1, entered as `y ENTER x Σ+`.
const LINE: &str = "1 ENTER 0 sum 3 ENTER 1 sum 5 ENTER 2 sum 7 ENTER 3 sum";

// ============================================================================
// Accumulation
// ============================================================================

#[test]
fn sigma_plus_fills_registers() {
    let engine = run(LINE);
    let sums: Vec<f64> = (2..8)
        .map(|r| engine.registers().recall(RegisterAddr::Data(r)).map(Number::value).unwrap())
        .collect();
    assert_eq!(sums, vec![4.0, 6.0, 14.0, 16.0, 84.0, 34.0]);
    assert_eq!(engine.stack().x().value(), 4.0);
    assert_eq!(engine.stack().last_x().value(), 3.0);
}

#[test]
fn sigma_plus_disables_lift() {
    let engine = run("1 ENTER 2 sum 9");
    assert_eq!(engine.stack().x().value(), 9.0);
    assert_eq!(engine.stack().y().value(), 1.0);
}

#[test]
fn sigma_minus_removes_point() {
    let engine = run(&format!("{} 7 ENTER 3 g sum", LINE));
    assert_eq!(engine.stack().x().value(), 3.0);
    let n = engine.registers().recall(RegisterAddr::Data(2)).unwrap();
    assert_eq!(n.value(), 3.0);
}

// ============================================================================
// Results
// ============================================================================

#[test]
fn mean() {
    let engine = run(&format!("{} g 0", LINE));
    assert_approx(engine.stack().x().value(), 1.5);
    assert_approx(engine.stack().y().value(), 4.0);
}

#[test]
fn standard_deviation() {
    let engine = run(&format!("{} f .", LINE));
    assert_approx(engine.stack().x().value(), (20.0_f64 / 12.0).sqrt());
    assert_approx(engine.stack().y().value(), (80.0_f64 / 12.0).sqrt());
}

#[test]
fn linear_regression() {
    let engine = run(&format!("{} f sum", LINE));
    assert_approx(engine.stack().x().value(), 1.0);
    assert_approx(engine.stack().y().value(), 2.0);
}

#[test]
fn estimate_and_correlation() {
    let engine = run(&format!("{} 1 0 g .", LINE));
    assert_approx(engine.stack().x().value(), 21.0);
    assert_approx(engine.stack().y().value(), 1.0);
    assert_eq!(engine.stack().last_x().value(), 10.0);
}

// ============================================================================
// Errors and clearing
// ============================================================================

#[test]
fn mean_without_data() {
    let engine = run("g 0");
    assert_eq!(engine.error(), Some(EngineError::Statistics));
    assert_eq!(engine.get_display().mantissa_text, "Error 2");
}

#[test]
fn std_dev_needs_two_points() {
    let engine = run("1 ENTER 2 sum f .");
    assert_eq!(engine.error(), Some(EngineError::Statistics));
}

#[test]
fn clear_sigma() {
    let engine = run(&format!("{} f GSB", LINE));
    for r in 2..8 {
        let value = engine.registers().recall(RegisterAddr::Data(r)).unwrap();
        assert_eq!(value.value(), 0.0);
    }
    assert_eq!(stack_of(&engine), [0.0; 4]);
}
