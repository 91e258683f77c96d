//! Digit entry.
//!
//! While a number is being keyed the engine holds an [`EntryBuffer`]; when no
//! buffer exists the engine is idle and X holds a finished value. The buffer
//! keeps the keyed text exactly as typed (mantissa, sign, optional two digit
//! exponent) and can produce its numeric value at any time.

use crate::number::Number;

/// Most mantissa digits the display can hold.
pub const MAX_MANTISSA_DIGITS: usize = 10;

/// Digits in the exponent field.
pub const EXPONENT_DIGITS: usize = 2;

/// Result of a backspace inside the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Erase {
    /// A character was removed; the buffer is still active.
    Edited,
    /// The last mantissa digit was removed; the buffer is gone.
    Emptied,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct ExponentField {
    digits: String,
    negative: bool,
}

/// The number currently being keyed into X.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryBuffer {
    /// Digits and at most one decimal point. Never empty.
    mantissa: String,
    negative: bool,
    exponent: Option<ExponentField>,
}

impl EntryBuffer {
    /// Start a new entry with a digit.
    pub fn with_digit(digit: u8) -> Self {
        Self {
            mantissa: char::from(b'0' + digit.min(9)).to_string(),
            negative: false,
            exponent: None,
        }
    }

    /// Start a new entry with the decimal point: `0.`.
    pub fn with_point() -> Self {
        Self {
            mantissa: "0.".to_string(),
            negative: false,
            exponent: None,
        }
    }

    /// Start a new entry with EEX: the mantissa defaults to 1.
    pub fn with_exponent() -> Self {
        Self {
            mantissa: "1".to_string(),
            negative: false,
            exponent: Some(ExponentField::default()),
        }
    }

    /// Append a digit to the open field.
    ///
    /// Returns false when the key has no effect (mantissa full).
    pub fn push_digit(&mut self, digit: u8) -> bool {
        let ch = char::from(b'0' + digit.min(9));
        if let Some(exp) = &mut self.exponent {
            // New digits scroll through the two digit field.
            if exp.digits.len() == EXPONENT_DIGITS {
                exp.digits.remove(0);
            }
            exp.digits.push(ch);
            return true;
        }
        if self.mantissa == "0" {
            self.mantissa.clear();
            self.mantissa.push(ch);
            return true;
        }
        if self.mantissa_digits() >= MAX_MANTISSA_DIGITS {
            return false;
        }
        self.mantissa.push(ch);
        true
    }

    /// Insert the decimal point, once, and only in the mantissa.
    pub fn push_point(&mut self) -> bool {
        if self.exponent.is_some() || self.mantissa.contains('.') {
            return false;
        }
        self.mantissa.push('.');
        true
    }

    /// Open the exponent field. A second EEX does nothing.
    pub fn open_exponent(&mut self) -> bool {
        if self.exponent.is_some() {
            return false;
        }
        self.exponent = Some(ExponentField::default());
        true
    }

    /// CHS while entering: flips the exponent sign if the exponent is open,
    /// otherwise the mantissa sign.
    pub fn toggle_sign(&mut self) {
        match &mut self.exponent {
            Some(exp) => exp.negative = !exp.negative,
            None => self.negative = !self.negative,
        }
    }

    /// Remove the last keyed character.
    pub fn backspace(&mut self) -> Erase {
        if let Some(exp) = &mut self.exponent {
            if exp.digits.pop().is_none() {
                self.exponent = None;
            }
            return Erase::Edited;
        }
        self.mantissa.pop();
        if self.mantissa.is_empty() {
            Erase::Emptied
        } else {
            Erase::Edited
        }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn has_exponent(&self) -> bool {
        self.exponent.is_some()
    }

    /// Number of digits keyed into the mantissa.
    pub fn mantissa_digits(&self) -> usize {
        self.mantissa.chars().filter(char::is_ascii_digit).count()
    }

    /// Mantissa as keyed, without sign.
    pub fn mantissa_text(&self) -> &str {
        &self.mantissa
    }

    /// Exponent field as shown: sign column plus two digits, or empty.
    pub fn exponent_text(&self) -> String {
        match &self.exponent {
            Some(exp) => format!(
                "{}{:0>2}",
                if exp.negative { '-' } else { ' ' },
                exp.digits
            ),
            None => String::new(),
        }
    }

    /// The whole buffer as one string, e.g. `-1.5` or `2 -03`.
    pub fn text(&self) -> String {
        let sign = if self.negative { "-" } else { "" };
        match &self.exponent {
            Some(_) => format!("{}{}{}", sign, self.mantissa, self.exponent_text()),
            None => format!("{}{}", sign, self.mantissa),
        }
    }

    /// The value of the buffer, saturated to the display range.
    pub fn value(&self) -> Number {
        Number::new(self.raw_value())
    }

    /// The keyed value before range checks; `50 EEX 99` is above the display
    /// range.
    pub fn raw_value(&self) -> f64 {
        let mantissa = self.mantissa.trim_end_matches('.');
        let exponent: i32 = match &self.exponent {
            Some(exp) => {
                let magnitude: i32 = exp.digits.parse().unwrap_or(0);
                if exp.negative { -magnitude } else { magnitude }
            }
            None => 0,
        };
        let text = format!(
            "{}{}e{}",
            if self.negative { "-" } else { "" },
            if mantissa.is_empty() { "0" } else { mantissa },
            exponent
        );
        text.parse::<f64>().unwrap_or(0.0)
    }
}
