//! The four level operational stack.
//!
//! Unlike a language stack the calculator stack never grows or shrinks: it
//! always holds exactly X, Y, Z and T. Pushing loses the old T, dropping
//! copies T down into Z and leaves T in place.

use serde::{Deserialize, Serialize};

use crate::number::Number;

/// Stack levels, bottom first.
pub const LEVELS: usize = 4;

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;
const T: usize = 3;

/// The X/Y/Z/T stack plus the LastX register.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    levels: [Number; LEVELS],
    last_x: Number,
}

impl Stack {
    /// Create a zeroed stack.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(&self) -> Number {
        self.levels[X]
    }

    pub fn y(&self) -> Number {
        self.levels[Y]
    }

    pub fn z(&self) -> Number {
        self.levels[Z]
    }

    pub fn t(&self) -> Number {
        self.levels[T]
    }

    pub fn last_x(&self) -> Number {
        self.last_x
    }

    /// All four levels, X first.
    pub fn levels(&self) -> [Number; LEVELS] {
        self.levels
    }

    /// Overwrite X without moving the rest of the stack.
    pub fn set_x(&mut self, value: Number) {
        self.levels[X] = value;
    }

    /// Overwrite Y without moving the rest of the stack.
    pub fn set_y(&mut self, value: Number) {
        self.levels[Y] = value;
    }

    /// Copy X into LastX.
    pub fn save_last_x(&mut self) {
        self.last_x = self.levels[X];
    }

    /// Lift the stack and put `value` in X. The old T is lost.
    pub fn push(&mut self, value: Number) {
        self.levels[T] = self.levels[Z];
        self.levels[Z] = self.levels[Y];
        self.levels[Y] = self.levels[X];
        self.levels[X] = value;
    }

    /// Drop X and return it. T is duplicated into Z.
    pub fn drop(&mut self) -> Number {
        let x = self.levels[X];
        self.levels[X] = self.levels[Y];
        self.levels[Y] = self.levels[Z];
        self.levels[Z] = self.levels[T];
        x
    }

    /// R↓: X goes to T, everything else moves down.
    pub fn roll_down(&mut self) {
        self.levels.rotate_left(1);
    }

    /// R↑: T goes to X, everything else moves up.
    pub fn roll_up(&mut self) {
        self.levels.rotate_right(1);
    }

    /// x≷y.
    pub fn swap_xy(&mut self) {
        self.levels.swap(X, Y);
    }

    /// Replace X with the result of a one-operand function, saving LastX.
    pub fn apply_unary(&mut self, result: Number) {
        self.save_last_x();
        self.levels[X] = result;
    }

    /// Replace X and Y with the result of a two-operand function, saving
    /// LastX and dropping the stack once.
    pub fn apply_binary(&mut self, result: Number) {
        self.save_last_x();
        self.drop();
        self.levels[X] = result;
    }

    /// Zero all four levels. LastX is kept.
    pub fn clear(&mut self) {
        self.levels = [Number::ZERO; LEVELS];
    }

    /// Restore a full set of levels, X first.
    pub fn restore(&mut self, levels: [Number; LEVELS], last_x: Number) {
        self.levels = levels;
        self.last_x = last_x;
    }
}
