//! Persistent modes: angle unit, display format, USER, BEGIN and flags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest digit count accepted by FIX/SCI/ENG.
pub const MAX_FORMAT_DIGITS: u8 = 9;

/// Number of user flags (SF/CF 0–9).
pub const FLAG_COUNT: u8 = 10;

/// Flag 9 blinks the display after an overflow.
pub const OVERFLOW_FLAG: u8 = 9;

/// Unit used by the trigonometric functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Deg,
    Rad,
    Grad,
}

impl AngleUnit {
    /// Size of a full turn in this unit.
    pub fn full_turn(self) -> f64 {
        match self {
            AngleUnit::Deg => 360.0,
            AngleUnit::Rad => std::f64::consts::TAU,
            AngleUnit::Grad => 400.0,
        }
    }

    /// Convert an angle in this unit to radians.
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Rad => angle,
            _ => angle * std::f64::consts::TAU / self.full_turn(),
        }
    }

    /// Convert radians to an angle in this unit.
    pub fn radians_to_unit(self, radians: f64) -> f64 {
        match self {
            AngleUnit::Rad => radians,
            _ => radians * self.full_turn() / std::f64::consts::TAU,
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleUnit::Deg => write!(f, "DEG"),
            AngleUnit::Rad => write!(f, "RAD"),
            AngleUnit::Grad => write!(f, "GRAD"),
        }
    }
}

/// How a number is rendered on the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "digits", rename_all = "lowercase")]
pub enum DisplayFormat {
    /// Fixed number of decimals.
    Fix(u8),
    /// Scientific notation.
    Sci(u8),
    /// Engineering notation: exponent a multiple of three.
    Eng(u8),
}

impl DisplayFormat {
    /// The digit count, whatever the kind.
    pub fn digits(self) -> u8 {
        match self {
            DisplayFormat::Fix(n) | DisplayFormat::Sci(n) | DisplayFormat::Eng(n) => n,
        }
    }
}

impl Default for DisplayFormat {
    fn default() -> Self {
        DisplayFormat::Fix(4)
    }
}

impl fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayFormat::Fix(n) => write!(f, "FIX {}", n),
            DisplayFormat::Sci(n) => write!(f, "SCI {}", n),
            DisplayFormat::Eng(n) => write!(f, "ENG {}", n),
        }
    }
}

/// All persistent mode state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeState {
    pub angle: AngleUnit,
    pub format: DisplayFormat,
    /// USER keyboard: A–E row swaps with its f-shifted functions.
    pub user: bool,
    /// BEGIN annunciator (payment timing/date flag).
    pub begin: bool,
    /// User flags 0–9, bit n for flag n.
    flags: u16,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test flag `n`; out of range flags read as clear.
    pub fn flag(&self, n: u8) -> bool {
        n < FLAG_COUNT && self.flags & (1 << n) != 0
    }

    /// Set or clear flag `n`. Out of range flags are ignored.
    pub fn set_flag(&mut self, n: u8, on: bool) {
        if n >= FLAG_COUNT {
            return;
        }
        if on {
            self.flags |= 1 << n;
        } else {
            self.flags &= !(1 << n);
        }
    }
}
