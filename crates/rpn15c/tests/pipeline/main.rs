//! End-to-end keystroke tests.
//!
//! These tests drive the engine the way a UI does: one key id or legend at
//! a time through `Engine::press`, then inspect the stack, registers and
//! display. Tests are organized into modules by functionality.

use rpn15c::{Engine, Number};

mod display;
mod entry;
mod persistence;
mod registers;
mod stack;
mod statistics;
mod transcendentals;

// ============================================================================
// Test Helpers
// ============================================================================

/// Press every whitespace separated key in `script`.
pub fn press_all(engine: &mut Engine, script: &str) {
    for key in script.split_whitespace() {
        engine.press(key, None);
    }
}

/// Run a script on a fresh engine.
pub fn run(script: &str) -> Engine {
    let mut engine = Engine::new();
    press_all(&mut engine, script);
    engine
}

/// X, Y, Z, T as plain floats.
pub fn stack_of(engine: &Engine) -> [f64; 4] {
    engine.stack().levels().map(Number::value)
}

/// Floating point comparison with a relative tolerance.
pub fn assert_approx(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {}, got {}",
        expected,
        actual
    );
}

/// Run `script` and check X.
pub fn assert_x(script: &str, expected: f64) {
    let engine = run(script);
    let x = engine.stack().x().value();
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (x - expected).abs() <= tolerance,
        "X after '{}': expected {}, got {}",
        script,
        expected,
        x
    );
}

/// Run `script` and check the lowest `expected.len()` stack levels, X first.
pub fn assert_stack(script: &str, expected: &[f64]) {
    let engine = run(script);
    let actual = stack_of(&engine);
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let tolerance = 1e-9 * e.abs().max(1.0);
        assert!(
            (a - e).abs() <= tolerance,
            "level {} after '{}': expected {:?}, got {:?}",
            i,
            script,
            expected,
            actual
        );
    }
}

/// Run `script` and return the display line.
pub fn display_of(script: &str) -> String {
    run(script).get_display().line()
}
