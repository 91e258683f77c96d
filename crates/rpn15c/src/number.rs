//! Calculator numbers.
//!
//! A [`Number`] is a finite `f64` kept inside the display range of a
//! ten digit, two digit exponent display. Raw results from the math layer go
//! through [`Number::fit`], which rejects NaN, saturates overflow and flushes
//! underflow to zero.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest magnitude the display can show: 9.999999999 × 10⁹⁹.
const MAX_MAGNITUDE: f64 = 9.999_999_999e99;

/// Smallest non-zero magnitude; anything smaller underflows to zero.
const MIN_MAGNITUDE: f64 = 1e-99;

/// A register value.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Number(f64);

/// A raw result brought into range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fit {
    /// The value was representable as is (possibly flushed to zero).
    Exact(Number),
    /// The value overflowed and was clamped to `±Number::MAX`.
    Saturated(Number),
}

impl Fit {
    /// The resulting number, saturated or not.
    pub fn number(self) -> Number {
        match self {
            Fit::Exact(n) | Fit::Saturated(n) => n,
        }
    }

    /// Whether the raw value was out of range.
    pub fn overflowed(self) -> bool {
        matches!(self, Fit::Saturated(_))
    }
}

impl Number {
    pub const ZERO: Number = Number(0.0);
    pub const ONE: Number = Number(1.0);
    pub const MAX: Number = Number(MAX_MAGNITUDE);

    /// Wrap a value that is already known to be in range.
    ///
    /// Out of range input is clamped; NaN becomes zero. Use [`Number::fit`]
    /// for results that need error reporting.
    pub fn new(value: f64) -> Self {
        match Self::fit(value) {
            Ok(fit) => fit.number(),
            Err(_) => Number::ZERO,
        }
    }

    /// Bring a raw result into range.
    pub fn fit(value: f64) -> EngineResult<Fit> {
        if value.is_nan() {
            return Err(EngineError::InvalidOperand);
        }
        let magnitude = value.abs();
        if magnitude > MAX_MAGNITUDE {
            return Ok(Fit::Saturated(Number(MAX_MAGNITUDE.copysign(value))));
        }
        if magnitude < MIN_MAGNITUDE {
            return Ok(Fit::Exact(Number::ZERO));
        }
        Ok(Fit::Exact(Number(value)))
    }

    /// Check a value restored from outside the engine.
    pub fn is_representable(value: f64) -> bool {
        value.is_finite() && value.abs() <= MAX_MAGNITUDE
    }

    /// The underlying value.
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }

    /// Whether this is `±Number::MAX`, the overflow sentinel.
    pub fn is_saturated(self) -> bool {
        self.0.abs() == MAX_MAGNITUDE
    }

    /// Negation never leaves the range.
    pub fn negate(self) -> Self {
        if self.0 == 0.0 { self } else { Number(-self.0) }
    }

    /// Integer part, truncated toward zero.
    pub fn int_part(self) -> Self {
        Number(self.0.trunc())
    }

    /// Fractional part, keeping the sign.
    pub fn frac_part(self) -> Self {
        let frac = self.0.fract();
        if frac == 0.0 { Number::ZERO } else { Number(frac) }
    }

    /// Whether the value has no fractional part.
    pub fn is_integer(self) -> bool {
        self.0.fract() == 0.0
    }
}

impl From<Number> for f64 {
    fn from(n: Number) -> f64 {
        n.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
