//! Storage registers.
//!
//! Twenty data registers (R0–R9 and R.0–R.9) plus the index register I.
//! They live independently of the stack; only STO/RCL and friends touch them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::number::{Fit, Number};

/// Number of data registers (R0–R9, R.0–R.9).
pub const DATA_REGISTERS: usize = 20;

const I_SLOT: usize = DATA_REGISTERS;

/// Address of a storage register, as keyed after STO/RCL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegisterAddr {
    /// R0–R9 (0–9) and R.0–R.9 (10–19).
    Data(u8),
    /// The index register I.
    Index,
    /// Indirect through I: `(i)`.
    Indirect,
}

impl RegisterAddr {
    /// R0–R9.
    pub fn digit(d: u8) -> Option<Self> {
        (d < 10).then_some(RegisterAddr::Data(d))
    }

    /// R.0–R.9.
    pub fn dot_digit(d: u8) -> Option<Self> {
        (d < 10).then_some(RegisterAddr::Data(10 + d))
    }
}

impl fmt::Display for RegisterAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterAddr::Data(n) if *n < 10 => write!(f, "R{}", n),
            RegisterAddr::Data(n) => write!(f, "R.{}", n - 10),
            RegisterAddr::Index => write!(f, "I"),
            RegisterAddr::Indirect => write!(f, "(i)"),
        }
    }
}

/// Storage register arithmetic (STO + n, RCL × n, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegisterOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl RegisterOp {
    /// Combine `lhs op rhs`.
    pub fn apply(self, lhs: Number, rhs: Number) -> EngineResult<Fit> {
        let (a, b) = (lhs.value(), rhs.value());
        let raw = match self {
            RegisterOp::Add => a + b,
            RegisterOp::Sub => a - b,
            RegisterOp::Mul => a * b,
            RegisterOp::Div => {
                if b == 0.0 {
                    return Err(EngineError::DivideByZero);
                }
                a / b
            }
        };
        Number::fit(raw)
    }
}

/// The register file outside the stack.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Registers {
    slots: [Number; DATA_REGISTERS + 1],
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve an address to a slot, following `(i)` through I.
    pub fn resolve(&self, addr: RegisterAddr) -> EngineResult<usize> {
        match addr {
            RegisterAddr::Data(n) if (n as usize) < DATA_REGISTERS => Ok(n as usize),
            RegisterAddr::Data(_) => Err(EngineError::InvalidRegister),
            RegisterAddr::Index => Ok(I_SLOT),
            RegisterAddr::Indirect => {
                let index = self.slots[I_SLOT].value().abs().trunc();
                if index < DATA_REGISTERS as f64 {
                    Ok(index as usize)
                } else {
                    Err(EngineError::InvalidRegister)
                }
            }
        }
    }

    /// RCL.
    pub fn recall(&self, addr: RegisterAddr) -> EngineResult<Number> {
        Ok(self.slots[self.resolve(addr)?])
    }

    /// STO.
    pub fn store(&mut self, addr: RegisterAddr, value: Number) -> EngineResult<()> {
        let slot = self.resolve(addr)?;
        self.slots[slot] = value;
        Ok(())
    }

    /// STO with arithmetic: register ← register op x.
    ///
    /// Nothing is written if the operation fails.
    pub fn store_op(&mut self, addr: RegisterAddr, op: RegisterOp, x: Number) -> EngineResult<Fit> {
        let slot = self.resolve(addr)?;
        let fit = op.apply(self.slots[slot], x)?;
        self.slots[slot] = fit.number();
        Ok(fit)
    }

    /// x≷ n: store `x` and return the previous register content.
    pub fn exchange(&mut self, addr: RegisterAddr, x: Number) -> EngineResult<Number> {
        let slot = self.resolve(addr)?;
        Ok(std::mem::replace(&mut self.slots[slot], x))
    }

    /// Direct access by data register number, for the statistics registers.
    pub(crate) fn data(&self, n: usize) -> Number {
        self.slots[n]
    }

    pub(crate) fn set_data(&mut self, n: usize, value: Number) {
        self.slots[n] = value;
    }

    /// The index register.
    pub fn index(&self) -> Number {
        self.slots[I_SLOT]
    }

    /// CLEAR REG: zero every register, I included.
    pub fn clear(&mut self) {
        self.slots = [Number::ZERO; DATA_REGISTERS + 1];
    }

    /// All slots in address order (R0–R.9, then I).
    pub fn as_slice(&self) -> &[Number] {
        &self.slots
    }

    /// Load slots in address order; fails on a length mismatch.
    pub fn load(&mut self, values: &[Number]) -> Result<(), usize> {
        if values.len() != self.slots.len() {
            return Err(values.len());
        }
        self.slots.copy_from_slice(values);
        Ok(())
    }
}
