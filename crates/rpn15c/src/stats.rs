//! Two-variable statistics.
//!
//! Σ+ and Σ− accumulate into the data registers R2–R7, so the sums can be
//! recalled, edited and cleared like any other register.

use crate::error::{EngineError, EngineResult};
use crate::number::Number;
use crate::registers::Registers;

/// First statistics register (n).
pub const FIRST_REGISTER: usize = 2;

/// Number of accumulated sums.
pub const SUM_COUNT: usize = 6;

/// The accumulated sums: n, Σx, Σx², Σy, Σy², Σxy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sums {
    pub n: f64,
    pub x: f64,
    pub x2: f64,
    pub y: f64,
    pub y2: f64,
    pub xy: f64,
}

impl Sums {
    /// Read R2–R7.
    pub fn read(registers: &Registers) -> Self {
        let r = |i: usize| registers.data(FIRST_REGISTER + i).value();
        Self {
            n: r(0),
            x: r(1),
            x2: r(2),
            y: r(3),
            y2: r(4),
            xy: r(5),
        }
    }

    /// Write fitted sums back to R2–R7.
    pub fn write(values: [Number; SUM_COUNT], registers: &mut Registers) {
        for (i, value) in values.into_iter().enumerate() {
            registers.set_data(FIRST_REGISTER + i, value);
        }
    }

    /// Zero R2–R7.
    pub fn clear(registers: &mut Registers) {
        Self::write([Number::ZERO; SUM_COUNT], registers);
    }

    /// Sums in register order.
    pub fn to_array(self) -> [f64; SUM_COUNT] {
        [self.n, self.x, self.x2, self.y, self.y2, self.xy]
    }

    /// Add (`weight = 1`) or remove (`weight = -1`) the point (x, y).
    pub fn accumulate(self, x: f64, y: f64, weight: f64) -> Self {
        Self {
            n: self.n + weight,
            x: self.x + weight * x,
            x2: self.x2 + weight * x * x,
            y: self.y + weight * y,
            y2: self.y2 + weight * y * y,
            xy: self.xy + weight * x * y,
        }
    }

    /// nΣx² − (Σx)².
    fn m(&self) -> f64 {
        self.n * self.x2 - self.x * self.x
    }

    /// nΣy² − (Σy)².
    fn nn(&self) -> f64 {
        self.n * self.y2 - self.y * self.y
    }

    /// nΣxy − ΣxΣy.
    fn p(&self) -> f64 {
        self.n * self.xy - self.x * self.y
    }

    /// x̄ and ȳ.
    pub fn mean(&self) -> EngineResult<(f64, f64)> {
        if self.n == 0.0 {
            return Err(EngineError::Statistics);
        }
        Ok((self.x / self.n, self.y / self.n))
    }

    /// Sample standard deviations s_x and s_y.
    pub fn std_dev(&self) -> EngineResult<(f64, f64)> {
        if self.n <= 1.0 {
            return Err(EngineError::Statistics);
        }
        let denominator = self.n * (self.n - 1.0);
        let (m, nn) = (self.m(), self.nn());
        if m < 0.0 || nn < 0.0 {
            return Err(EngineError::Statistics);
        }
        Ok(((m / denominator).sqrt(), (nn / denominator).sqrt()))
    }

    /// Least squares line y = A·x + B, returned as (A, B).
    pub fn linear_regression(&self) -> EngineResult<(f64, f64)> {
        let m = self.m();
        if self.n <= 1.0 || m == 0.0 {
            return Err(EngineError::Statistics);
        }
        let slope = self.p() / m;
        let intercept = (m * self.y - self.p() * self.x) / (self.n * m);
        Ok((slope, intercept))
    }

    /// ŷ for `x` on the regression line, and the correlation coefficient r.
    pub fn estimate(&self, x: f64) -> EngineResult<(f64, f64)> {
        let (slope, intercept) = self.linear_regression()?;
        let denominator = self.m() * self.nn();
        if denominator <= 0.0 {
            return Err(EngineError::Statistics);
        }
        Ok((slope * x + intercept, self.p() / denominator.sqrt()))
    }
}
