//! Engine error taxonomy.
//!
//! Errors are values returned from a single dispatch. None of them are fatal:
//! the engine state is left as it was before the failed operation and the
//! display shows `Error n` until the next key press.

use thiserror::Error;

/// Errors raised by an operation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Error)]
pub enum EngineError {
    /// Division (or STO ÷) by zero.
    #[error("division by zero")]
    DivideByZero,
    /// Argument outside the domain of the function (√ of a negative, LN 0, ...).
    #[error("invalid operand")]
    InvalidOperand,
    /// Result magnitude beyond the display range, when overflow is not saturated.
    #[error("overflow")]
    Overflow,
    /// Register address that does not exist, usually from an out of range `(i)`.
    #[error("improper register number")]
    InvalidRegister,
    /// Statistics requested with too few accumulated points.
    #[error("improper statistics operation")]
    Statistics,
}

impl EngineError {
    /// HP error number shown on the display.
    pub fn code(self) -> u8 {
        match self {
            EngineError::DivideByZero | EngineError::InvalidOperand | EngineError::Overflow => 0,
            EngineError::Statistics => 2,
            EngineError::InvalidRegister => 3,
        }
    }

    /// Display text, e.g. `Error 0`.
    pub fn display_text(self) -> String {
        format!("Error {}", self.code())
    }
}

/// Result of a single operation.
pub type EngineResult<T> = Result<T, EngineError>;
