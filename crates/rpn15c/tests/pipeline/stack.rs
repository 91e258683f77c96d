//! Tests for the four level stack.

use super::{assert_stack, run, stack_of};

// ============================================================================
// Push and drop
// ============================================================================

#[test]
fn enter_then_add() {
    // 5 ENTER 3 + → X = 8, Y = 0, LastX = 3
    let engine = run("5 ENTER 3 +");
    assert_eq!(stack_of(&engine), [8.0, 0.0, 0.0, 0.0]);
    assert_eq!(engine.stack().last_x().value(), 3.0);
}

#[test]
fn double_enter_on_fresh_stack() {
    let engine = run("ENTER ENTER");
    assert_eq!(stack_of(&engine), [0.0; 4]);
}

#[test]
fn double_enter_duplicates() {
    assert_stack("3 ENTER ENTER", &[3.0, 3.0, 3.0, 0.0]);
}

#[test]
fn drop_duplicates_t() {
    // 1 2 3 4 fill the stack; + drops once and T stays in T and Z.
    assert_stack("1 ENTER 2 ENTER 3 ENTER 4 +", &[7.0, 2.0, 1.0, 1.0]);
}

#[test]
fn push_loses_t() {
    assert_stack("1 ENTER 2 ENTER 3 ENTER 4 ENTER", &[4.0, 4.0, 3.0, 2.0]);
}

// ============================================================================
// Rearranging
// ============================================================================

#[test]
fn roll_down() {
    assert_stack("1 ENTER 2 ENTER 3 ENTER 4 R↓", &[3.0, 2.0, 1.0, 4.0]);
}

#[test]
fn roll_up() {
    assert_stack("1 ENTER 2 ENTER 3 ENTER 4 g R↓", &[1.0, 4.0, 3.0, 2.0]);
}

#[test]
fn four_rolls_are_identity() {
    assert_stack("1 ENTER 2 ENTER 3 ENTER 4 RDN RDN RDN RDN", &[4.0, 3.0, 2.0, 1.0]);
}

#[test]
fn swap_xy() {
    assert_stack("1 ENTER 2 x<>y", &[1.0, 2.0]);
}

// ============================================================================
// LastX and CLx
// ============================================================================

#[test]
fn last_x_recall() {
    assert_stack("5 ENTER 3 + g ENTER", &[3.0, 8.0]);
}

#[test]
fn last_x_untouched_by_entry() {
    let engine = run("5 ENTER 3 + 9 9");
    assert_eq!(engine.stack().last_x().value(), 3.0);
}

#[test]
fn clear_x_disables_lift() {
    assert_stack("5 ENTER 6 g BSP 7", &[7.0, 5.0]);
}

#[test]
fn chs_on_result_saves_last_x() {
    let engine = run("3 ENTER 4 + CHS");
    assert_eq!(engine.stack().x().value(), -7.0);
    assert_eq!(engine.stack().last_x().value(), 7.0);
}
