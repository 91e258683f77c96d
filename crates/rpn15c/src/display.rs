//! Rendering X for a ten digit display.
//!
//! The display has a sign column, ten digit positions and a two digit
//! exponent field. [`format_number`] splits a value into those parts
//! according to FIX, SCI or ENG; [`DisplayState`] adds the annunciators.

use std::fmt;

use serde::Serialize;

use crate::mode::DisplayFormat;
use crate::number::Number;

/// Digit positions on the display.
pub const DISPLAY_DIGITS: usize = 10;

/// Most decimals SCI and ENG can show next to the exponent field.
const MAX_EXPONENT_DECIMALS: usize = 6;

/// Values this large or larger cannot be shown in FIX.
const FIX_LIMIT: f64 = 1e10;

/// Annunciators shown under the digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusFlags {
    pub user: bool,
    pub f_shift: bool,
    pub g_shift: bool,
    pub begin: bool,
    pub rad: bool,
    pub grad: bool,
    /// D.MY date order. Date functions are not part of this engine, so
    /// this stays off.
    pub dmy: bool,
    /// Complex mode. Always off.
    pub complex: bool,
    pub error: bool,
    pub prgm: bool,
    /// Flag 9: the display blinks after an overflow.
    pub overflow: bool,
}

impl fmt::Display for StatusFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = [
            (self.user, "USER"),
            (self.f_shift, "f"),
            (self.g_shift, "g"),
            (self.begin, "BEGIN"),
            (self.rad, "RAD"),
            (self.grad, "GRAD"),
            (self.dmy, "D.MY"),
            (self.complex, "C"),
            (self.prgm, "PRGM"),
            (self.overflow, "*"),
        ];
        let mut first = true;
        for (_, label) in labels.iter().filter(|(on, _)| *on) {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(label)?;
            first = false;
        }
        Ok(())
    }
}

/// Everything the UI needs to draw the display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    /// Digits and decimal point, without sign (`8.0000`, `Error 0`).
    pub mantissa_text: String,
    /// Exponent field: sign column plus two digits, or empty.
    pub exponent_text: String,
    /// `-` or a blank.
    pub sign: char,
    pub status: StatusFlags,
}

impl DisplayState {
    /// A rendered number.
    pub fn number(value: Number, format: DisplayFormat, status: StatusFlags) -> Self {
        let (sign, mantissa_text, exponent_text) = format_number(value, format);
        Self {
            mantissa_text,
            exponent_text,
            sign,
            status,
        }
    }

    /// An `Error n` display.
    pub fn error(text: String, status: StatusFlags) -> Self {
        Self {
            mantissa_text: text,
            exponent_text: String::new(),
            sign: ' ',
            status,
        }
    }

    /// The digit line without annunciators, e.g. `-1.2340 -05`.
    pub fn line(&self) -> String {
        let sign = if self.sign == '-' { "-" } else { "" };
        if self.exponent_text.is_empty() {
            format!("{}{}", sign, self.mantissa_text)
        } else {
            format!("{}{} {}", sign, self.mantissa_text, self.exponent_text.trim_start())
        }
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status.to_string();
        if status.is_empty() {
            write!(f, "{}", self.line())
        } else {
            write!(f, "{}    [{}]", self.line(), status)
        }
    }
}

/// Split a value into sign, mantissa and exponent text.
pub fn format_number(value: Number, format: DisplayFormat) -> (char, String, String) {
    let v = value.value();
    let sign = if v < 0.0 { '-' } else { ' ' };
    let magnitude = v.abs();
    let digits = usize::from(format.digits());

    let (mantissa, exponent) = match format {
        DisplayFormat::Fix(_) => match fixed(magnitude, digits) {
            Some(text) => (text, None),
            None => scientific(magnitude, digits),
        },
        DisplayFormat::Sci(_) => scientific(magnitude, digits),
        DisplayFormat::Eng(_) => engineering(magnitude, digits),
    };
    let exponent_text = match exponent {
        Some(e) => format!("{}{:02}", if e < 0 { '-' } else { ' ' }, e.abs()),
        None => String::new(),
    };
    // A value that rounds to zero shows no sign.
    let sign = if is_zero_text(&mantissa) { ' ' } else { sign };
    (sign, mantissa, exponent_text)
}

/// Round a value to the precision currently on the display (RND).
pub fn round_to_format(value: f64, format: DisplayFormat) -> f64 {
    let digits = usize::from(format.digits());
    let text = match format {
        DisplayFormat::Fix(_) if fixed(value.abs(), digits).is_some() => {
            format!("{:.*}", fixed_decimals(value.abs(), digits), value)
        }
        _ => format!("{:.*e}", digits.min(MAX_EXPONENT_DECIMALS), value),
    };
    text.parse().unwrap_or(value)
}

/// Decimals FIX can show for `magnitude` without exceeding the display.
fn fixed_decimals(magnitude: f64, digits: usize) -> usize {
    let integer_digits = if magnitude < 1.0 {
        1
    } else {
        magnitude.log10().floor() as usize + 1
    };
    digits.min(DISPLAY_DIGITS.saturating_sub(integer_digits))
}

/// FIX rendering, or `None` when the value needs scientific notation.
fn fixed(magnitude: f64, digits: usize) -> Option<String> {
    if magnitude >= FIX_LIMIT {
        return None;
    }
    let decimals = fixed_decimals(magnitude, digits);
    let mut text = format!("{:.*}", decimals, magnitude);
    if magnitude != 0.0 && is_zero_text(&text) {
        return None;
    }
    if digit_count(&text) > DISPLAY_DIGITS {
        // Rounding carried into a new integer digit: 9.99999999999 is
        // shown as 10.00000000, one decimal fewer.
        let rounded: f64 = text.parse().unwrap_or(magnitude);
        if rounded >= FIX_LIMIT {
            return None;
        }
        text = format!("{:.*}", fixed_decimals(rounded, digits), rounded);
        if digit_count(&text) > DISPLAY_DIGITS {
            return None;
        }
    }
    Some(with_point(text))
}

/// SCI rendering: one integer digit and an exponent.
fn scientific(magnitude: f64, digits: usize) -> (String, Option<i32>) {
    let decimals = digits.min(MAX_EXPONENT_DECIMALS);
    let (mantissa, exponent) = split_exponential(magnitude, decimals);
    if exponent > 99 {
        return saturated(decimals);
    }
    (with_point(mantissa), Some(exponent))
}

/// ENG rendering: exponent a multiple of three.
fn engineering(magnitude: f64, digits: usize) -> (String, Option<i32>) {
    let decimals = digits.min(MAX_EXPONENT_DECIMALS);
    let (mantissa, exponent) = split_exponential(magnitude, decimals);
    if exponent > 99 {
        return saturated(decimals);
    }
    let shift = exponent.rem_euclid(3) as usize;
    let mut significant: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    while significant.len() < shift + 1 {
        significant.push('0');
    }
    let (integer, fraction) = significant.split_at(shift + 1);
    (
        format!("{}.{}", integer, fraction),
        Some(exponent - shift as i32),
    )
}

/// The largest displayable mantissa, for values that round past 10¹⁰⁰.
fn saturated(decimals: usize) -> (String, Option<i32>) {
    (format!("9.{}", "9".repeat(decimals)), Some(99))
}

/// `1.2345e3` → (`1.2345`, 3).
fn split_exponential(magnitude: f64, decimals: usize) -> (String, i32) {
    let text = format!("{:.*e}", decimals, magnitude);
    match text.split_once('e') {
        Some((mantissa, exponent)) => (mantissa.to_string(), exponent.parse().unwrap_or(0)),
        None => (text, 0),
    }
}

fn with_point(mut text: String) -> String {
    if !text.contains('.') {
        text.push('.');
    }
    text
}

fn digit_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

fn is_zero_text(text: &str) -> bool {
    text.chars().all(|c| c == '0' || c == '.')
}
