//! Shift and prefix state.
//!
//! `f` and `g` select the gold and blue functions of the next key. A shift
//! lasts for exactly one key press. Prefix keys (STO, RCL, FIX, HYP, ...)
//! are different: they wait for an argument key and then complete into a
//! single operation.

use serde::{Deserialize, Serialize};

use crate::keys::Key;
use crate::mode::DisplayFormat;
use crate::ops::{Op, UnaryFn};
use crate::registers::{RegisterAddr, RegisterOp};

/// Transient shift state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    #[default]
    None,
    F,
    G,
}

impl Shift {
    /// State after pressing the shift key `pressed`: the same shift again
    /// cancels, the other shift replaces.
    pub fn toggle(self, pressed: Shift) -> Shift {
        if self == pressed { Shift::None } else { pressed }
    }

    /// The shift selected by a shift key.
    pub fn of_key(key: Key) -> Option<Shift> {
        match key {
            Key::ShiftF => Some(Shift::F),
            Key::ShiftG => Some(Shift::G),
            _ => None,
        }
    }
}

/// What a register prefix does with its address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegisterAction {
    Store,
    Recall,
    Exchange,
}

/// Display format awaiting its digit count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Fix,
    Sci,
    Eng,
}

impl FormatKind {
    fn with_digits(self, digits: u8) -> DisplayFormat {
        match self {
            FormatKind::Fix => DisplayFormat::Fix(digits),
            FormatKind::Sci => DisplayFormat::Sci(digits),
            FormatKind::Eng => DisplayFormat::Eng(digits),
        }
    }
}

/// A pending multi-key command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// STO, RCL or x≷ waiting for a register; `op` is set by STO +/−/×/÷,
    /// `dot` once `.` has been keyed for R.0–R.9.
    Register {
        action: RegisterAction,
        op: Option<RegisterOp>,
        dot: bool,
    },
    /// FIX/SCI/ENG waiting for a digit.
    Format(FormatKind),
    /// SF or CF waiting for a flag number.
    Flag { set: bool },
    /// HYP or HYP⁻¹ waiting for SIN, COS or TAN.
    Hyp { inverse: bool },
}

/// Result of feeding a key to a pending prefix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrefixStep {
    /// Still waiting for more keys.
    Pending(Prefix),
    /// The command is complete.
    Complete(Op),
    /// The key is not a valid argument; the prefix is abandoned.
    Cancel,
}

impl Prefix {
    pub fn register(action: RegisterAction) -> Self {
        Prefix::Register {
            action,
            op: None,
            dot: false,
        }
    }

    /// Feed the next (non-shift) key.
    pub fn feed(self, key: Key, shift: Shift) -> PrefixStep {
        match self {
            Prefix::Register { action, op, dot } => feed_register(action, op, dot, key, shift),
            Prefix::Format(kind) => match (shift, key.digit()) {
                (Shift::None, Some(d)) => PrefixStep::Complete(Op::SetFormat(kind.with_digits(d))),
                _ => PrefixStep::Cancel,
            },
            Prefix::Flag { set } => match (shift, key.digit()) {
                (Shift::None, Some(d)) if set => PrefixStep::Complete(Op::SetFlag(d)),
                (Shift::None, Some(d)) => PrefixStep::Complete(Op::ClearFlag(d)),
                _ => PrefixStep::Cancel,
            },
            Prefix::Hyp { inverse } => {
                let func = match (shift, key, inverse) {
                    (Shift::None, Key::Sin, false) => UnaryFn::Sinh,
                    (Shift::None, Key::Cos, false) => UnaryFn::Cosh,
                    (Shift::None, Key::Tan, false) => UnaryFn::Tanh,
                    (Shift::None, Key::Sin, true) => UnaryFn::Asinh,
                    (Shift::None, Key::Cos, true) => UnaryFn::Acosh,
                    (Shift::None, Key::Tan, true) => UnaryFn::Atanh,
                    _ => return PrefixStep::Cancel,
                };
                PrefixStep::Complete(Op::Unary(func))
            }
        }
    }
}

fn feed_register(
    action: RegisterAction,
    op: Option<RegisterOp>,
    dot: bool,
    key: Key,
    shift: Shift,
) -> PrefixStep {
    let addr = match (shift, key) {
        (Shift::None, k) if k.digit().is_some() => {
            let d = k.digit().unwrap_or(0);
            if dot {
                RegisterAddr::dot_digit(d)
            } else {
                RegisterAddr::digit(d)
            }
        }
        (Shift::None, Key::Decimal) if !dot => {
            return PrefixStep::Pending(Prefix::Register {
                action,
                op,
                dot: true,
            });
        }
        (Shift::F, Key::Tan) if !dot => Some(RegisterAddr::Index),
        (Shift::F, Key::Cos) if !dot => Some(RegisterAddr::Indirect),
        (Shift::F, Key::Enter) if !dot && op.is_none() => {
            return match action {
                RegisterAction::Store => PrefixStep::Complete(Op::StoreSeed),
                RegisterAction::Recall => PrefixStep::Complete(Op::RecallSeed),
                RegisterAction::Exchange => PrefixStep::Cancel,
            };
        }
        (Shift::None, k) if !dot && op.is_none() && action != RegisterAction::Exchange => {
            let Some(reg_op) = register_op_of(k) else {
                return PrefixStep::Cancel;
            };
            return PrefixStep::Pending(Prefix::Register {
                action,
                op: Some(reg_op),
                dot,
            });
        }
        _ => None,
    };

    let Some(addr) = addr else {
        return PrefixStep::Cancel;
    };

    let op = match (action, op) {
        (RegisterAction::Store, None) => Op::Store(addr),
        (RegisterAction::Store, Some(reg_op)) => Op::StoreOp(reg_op, addr),
        (RegisterAction::Recall, None) => Op::Recall(addr),
        (RegisterAction::Recall, Some(reg_op)) => Op::RecallOp(reg_op, addr),
        (RegisterAction::Exchange, _) => Op::Exchange(addr),
    };
    PrefixStep::Complete(op)
}

fn register_op_of(key: Key) -> Option<RegisterOp> {
    match key {
        Key::Addition => Some(RegisterOp::Add),
        Key::Subtraction => Some(RegisterOp::Sub),
        Key::Multiplication => Some(RegisterOp::Mul),
        Key::Division => Some(RegisterOp::Div),
        _ => None,
    }
}
