//! Tests for storage registers, I and RAN#.

use rpn15c::registers::RegisterAddr;
use rpn15c::{Engine, EngineError, Number};

use super::{assert_approx, assert_stack, assert_x, press_all, run};

fn register(engine: &Engine, addr: RegisterAddr) -> f64 {
    engine.registers().recall(addr).map(Number::value).unwrap()
}

// ============================================================================
// STO / RCL
// ============================================================================

#[test]
fn store_and_recall() {
    // RCL lifts the stack after a finished entry.
    assert_stack("1 2 STO 3 0 RCL 3", &[12.0, 0.0, 12.0]);
}

#[test]
fn store_does_not_touch_stack() {
    assert_stack("4 ENTER 5 STO 0", &[5.0, 4.0]);
}

#[test]
fn recall_after_enter_replaces_x() {
    assert_stack("8 STO 1 2 ENTER RCL 1", &[8.0, 2.0]);
}

#[test]
fn dot_registers() {
    let engine = run("7 STO . 5 RCL . 5");
    assert_eq!(register(&engine, RegisterAddr::Data(15)), 7.0);
    assert_eq!(engine.stack().x().value(), 7.0);
}

#[test]
fn store_arithmetic() {
    let engine = run("5 STO 1 3 STO + 1");
    assert_eq!(register(&engine, RegisterAddr::Data(1)), 8.0);
    let engine = run("5 STO 1 3 STO - 1");
    assert_eq!(register(&engine, RegisterAddr::Data(1)), 2.0);
    let engine = run("5 STO 1 3 STO * 1");
    assert_eq!(register(&engine, RegisterAddr::Data(1)), 15.0);
    let engine = run("6 STO 1 3 STO / 1");
    assert_eq!(register(&engine, RegisterAddr::Data(1)), 2.0);
}

#[test]
fn store_divide_by_zero_keeps_register() {
    let engine = run("5 STO 1 0 STO / 1");
    assert_eq!(engine.error(), Some(EngineError::DivideByZero));
    assert_eq!(register(&engine, RegisterAddr::Data(1)), 5.0);
}

#[test]
fn recall_arithmetic() {
    let engine = run("4 STO 0 1 0 RCL * 0");
    assert_eq!(engine.stack().x().value(), 40.0);
    assert_eq!(engine.stack().last_x().value(), 10.0);
}

#[test]
fn exchange() {
    let engine = run("5 STO 2 8 f 4 2");
    assert_eq!(engine.stack().x().value(), 5.0);
    assert_eq!(register(&engine, RegisterAddr::Data(2)), 8.0);
}

#[test]
fn clear_registers() {
    let engine = run("5 STO 4 STO . 9 f x<>y");
    assert_eq!(register(&engine, RegisterAddr::Data(4)), 0.0);
    assert_eq!(register(&engine, RegisterAddr::Data(19)), 0.0);
    assert_eq!(engine.stack().x().value(), 5.0);
}

// ============================================================================
// Index register
// ============================================================================

#[test]
fn indirect_through_i() {
    let engine = run("3 STO f TAN 9 STO f COS RCL f COS");
    assert_eq!(register(&engine, RegisterAddr::Index), 3.0);
    assert_eq!(register(&engine, RegisterAddr::Data(3)), 9.0);
    assert_eq!(engine.stack().x().value(), 9.0);
}

#[test]
fn indirect_out_of_range() {
    let engine = run("2 5 STO f TAN RCL f COS");
    assert_eq!(engine.error(), Some(EngineError::InvalidRegister));
    assert_eq!(engine.get_display().mantissa_text, "Error 3");
    assert_eq!(engine.stack().x().value(), 25.0);
}

#[test]
fn invalid_register_key_cancels_prefix() {
    let engine = run("5 STO SIN");
    assert_eq!(engine.prefix(), None);
    assert_eq!(engine.stack().x().value(), 5.0);
    assert_eq!(engine.error(), None);
}

// ============================================================================
// RAN#
// ============================================================================

#[test]
fn random_in_unit_interval() {
    let mut engine = Engine::new();
    for _ in 0..50 {
        press_all(&mut engine, "f ENTER");
        let x = engine.stack().x().value();
        assert!((0.0..1.0).contains(&x), "{}", x);
    }
}

#[test]
fn seeded_sequences_repeat() {
    let a = run(". 4 2 STO f ENTER f ENTER f ENTER");
    let b = run(". 4 2 STO f ENTER f ENTER f ENTER");
    assert_eq!(a.stack().levels(), b.stack().levels());
}

#[test]
fn recall_seed() {
    assert_x(". 5 STO f ENTER RCL f ENTER", 0.5);
}

#[test]
fn random_honors_stack_lift() {
    let engine = run("7 ENTER f ENTER");
    assert_eq!(engine.stack().y().value(), 7.0);
    assert_approx(engine.stack().z().value(), 0.0);
}
