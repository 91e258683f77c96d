//! Numeric kernels behind the function keys.
//!
//! Everything here works on raw `f64` and returns the raw result; range
//! handling (saturation, overflow errors) happens when the engine fits the
//! result into a [`Number`](crate::number::Number).

use std::f64::consts::PI;

use crate::display::round_to_format;
use crate::error::{EngineError, EngineResult};
use crate::mode::{AngleUnit, ModeState};
use crate::ops::{BinaryFn, UnaryFn};

/// Largest argument for which x! is computed by exact multiplication.
const EXACT_FACTORIAL_LIMIT: f64 = 170.0;

impl UnaryFn {
    /// Apply the function to X.
    pub fn eval(self, x: f64, modes: &ModeState) -> EngineResult<f64> {
        let angle = modes.angle;
        let result = match self {
            UnaryFn::Sqrt => {
                if x < 0.0 {
                    return Err(EngineError::InvalidOperand);
                }
                x.sqrt()
            }
            UnaryFn::Square => x * x,
            UnaryFn::Inverse => {
                if x == 0.0 {
                    return Err(EngineError::DivideByZero);
                }
                1.0 / x
            }
            UnaryFn::Exp => x.exp(),
            UnaryFn::Ln => positive(x)?.ln(),
            UnaryFn::Exp10 => 10f64.powf(x),
            UnaryFn::Log => positive(x)?.log10(),
            UnaryFn::Abs => x.abs(),
            UnaryFn::Int => x.trunc(),
            UnaryFn::Frac => x.fract(),
            UnaryFn::Round => round_to_format(x, modes.format),
            UnaryFn::Factorial => factorial(x)?,

            UnaryFn::Sin => sin(x, angle),
            UnaryFn::Cos => cos(x, angle),
            UnaryFn::Tan => tan(x, angle),
            UnaryFn::Asin => angle.radians_to_unit(unit_interval(x)?.asin()),
            UnaryFn::Acos => angle.radians_to_unit(unit_interval(x)?.acos()),
            UnaryFn::Atan => angle.radians_to_unit(x.atan()),

            UnaryFn::Sinh => x.sinh(),
            UnaryFn::Cosh => x.cosh(),
            UnaryFn::Tanh => x.tanh(),
            UnaryFn::Asinh => x.asinh(),
            UnaryFn::Acosh => {
                if x < 1.0 {
                    return Err(EngineError::InvalidOperand);
                }
                x.acosh()
            }
            UnaryFn::Atanh => {
                if x.abs() >= 1.0 {
                    return Err(EngineError::InvalidOperand);
                }
                x.atanh()
            }

            UnaryFn::ToHms => to_hms(x),
            UnaryFn::ToHours => to_hours(x),
            UnaryFn::ToRad => x.to_radians(),
            UnaryFn::ToDeg => x.to_degrees(),
        };
        Ok(result)
    }
}

impl BinaryFn {
    /// Combine Y and X.
    pub fn eval(self, y: f64, x: f64) -> EngineResult<f64> {
        let result = match self {
            BinaryFn::Add => y + x,
            BinaryFn::Sub => y - x,
            BinaryFn::Mul => y * x,
            BinaryFn::Div => {
                if x == 0.0 {
                    return Err(EngineError::DivideByZero);
                }
                y / x
            }
            BinaryFn::Pow => power(y, x)?,
            BinaryFn::Permutations => {
                let (n, k) = counting_args(y, x)?;
                falling_product(n, k)
            }
            BinaryFn::Combinations => {
                let (n, k) = counting_args(y, x)?;
                binomial(n, k)
            }
        };
        Ok(result)
    }
}

/// `%`: the given percentage of Y.
pub fn percent(y: f64, x: f64) -> f64 {
    y * x / 100.0
}

/// `Δ%`: percent change from Y to X.
pub fn percent_change(y: f64, x: f64) -> EngineResult<f64> {
    if y == 0.0 {
        return Err(EngineError::DivideByZero);
    }
    Ok(100.0 * (x - y) / y)
}

/// →P: rectangular (x, y) to polar (r, θ).
pub fn to_polar(x: f64, y: f64, angle: AngleUnit) -> (f64, f64) {
    (x.hypot(y), angle.radians_to_unit(y.atan2(x)))
}

/// →R: polar (r, θ) to rectangular (x, y).
pub fn to_rect(r: f64, theta: f64, angle: AngleUnit) -> (f64, f64) {
    (r * cos(theta, angle), r * sin(theta, angle))
}

fn positive(x: f64) -> EngineResult<f64> {
    if x <= 0.0 {
        Err(EngineError::InvalidOperand)
    } else {
        Ok(x)
    }
}

fn unit_interval(x: f64) -> EngineResult<f64> {
    if !(-1.0..=1.0).contains(&x) {
        Err(EngineError::InvalidOperand)
    } else {
        Ok(x)
    }
}

fn power(y: f64, x: f64) -> EngineResult<f64> {
    if y == 0.0 && x <= 0.0 {
        return Err(EngineError::InvalidOperand);
    }
    if y < 0.0 && x.fract() != 0.0 {
        return Err(EngineError::InvalidOperand);
    }
    Ok(y.powf(x))
}

/// Arguments of Py,x and Cy,x: non-negative integers with x ≤ y.
fn counting_args(y: f64, x: f64) -> EngineResult<(f64, f64)> {
    let valid = y >= 0.0 && x >= 0.0 && y.fract() == 0.0 && x.fract() == 0.0 && x <= y;
    if !valid {
        return Err(EngineError::InvalidOperand);
    }
    Ok((y, x))
}

/// n · (n−1) · … · (n−k+1). Stops early once the product is infinite.
fn falling_product(n: f64, k: f64) -> f64 {
    let mut product: f64 = 1.0;
    let mut i = 0.0;
    while i < k && product.is_finite() {
        product *= n - i;
        i += 1.0;
    }
    product
}

/// C(n, k) as a running product of C(n−k+i, i), so only the final value
/// can overflow.
fn binomial(n: f64, k: f64) -> f64 {
    let k = k.min(n - k);
    let mut result: f64 = 1.0;
    let mut i = 1.0;
    while i <= k && result.is_finite() {
        result = result * (n - k + i) / i;
        i += 1.0;
    }
    if result < 1e15 { result.round() } else { result }
}

fn factorial(x: f64) -> EngineResult<f64> {
    if x < 0.0 && x.fract() == 0.0 {
        return Err(EngineError::InvalidOperand);
    }
    if x > EXACT_FACTORIAL_LIMIT {
        return Ok(f64::INFINITY);
    }
    if x.fract() == 0.0 {
        return Ok(falling_product(x, x));
    }
    Ok(gamma(x + 1.0))
}

/// Γ(x) by the Lanczos approximation (g = 7, n = 9).
fn gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFICIENTS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // Reflection: Γ(x)Γ(1−x) = π / sin(πx).
        return PI / ((PI * x).sin() * gamma(1.0 - x));
    }
    let x = x - 1.0;
    let mut sum = COEFFICIENTS[0];
    for (i, c) in COEFFICIENTS.iter().enumerate().skip(1) {
        sum += c / (x + i as f64);
    }
    let t = x + G + 0.5;
    (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * sum
}

/// Which quarter turn an angle lands on exactly, if any (0..4).
fn exact_quarter(x: f64, angle: AngleUnit) -> Option<u8> {
    if angle == AngleUnit::Rad {
        return None;
    }
    let quarter = angle.full_turn() / 4.0;
    let turns = x / quarter;
    if turns.fract() != 0.0 {
        return None;
    }
    Some(turns.rem_euclid(4.0) as u8)
}

fn sin(x: f64, angle: AngleUnit) -> f64 {
    match exact_quarter(x, angle) {
        Some(0) | Some(2) => 0.0,
        Some(1) => 1.0,
        Some(_) => -1.0,
        None => angle.to_radians(x).sin(),
    }
}

fn cos(x: f64, angle: AngleUnit) -> f64 {
    match exact_quarter(x, angle) {
        Some(1) | Some(3) => 0.0,
        Some(0) => 1.0,
        Some(_) => -1.0,
        None => angle.to_radians(x).cos(),
    }
}

fn tan(x: f64, angle: AngleUnit) -> f64 {
    match exact_quarter(x, angle) {
        Some(0) | Some(2) => 0.0,
        Some(1) => f64::INFINITY,
        Some(_) => f64::NEG_INFINITY,
        None => angle.to_radians(x).tan(),
    }
}

/// Decimal hours to H.MMSSss.
fn to_hms(x: f64) -> f64 {
    let total = (x.abs() * 3600.0 * 1e6).round() / 1e6;
    let hours = (total / 3600.0).trunc();
    let rest = total - hours * 3600.0;
    let minutes = (rest / 60.0).trunc();
    let seconds = rest - minutes * 60.0;
    (hours + minutes / 100.0 + seconds / 10_000.0).copysign(x)
}

/// H.MMSSss to decimal hours.
fn to_hours(x: f64) -> f64 {
    let magnitude = x.abs();
    let hours = magnitude.trunc();
    let mmss = ((magnitude - hours) * 100.0 * 1e8).round() / 1e8;
    let minutes = mmss.trunc();
    let seconds = (mmss - minutes) * 100.0;
    (hours + minutes / 60.0 + seconds / 3600.0).copysign(x)
}
