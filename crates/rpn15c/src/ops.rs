//! Operations and the key table.
//!
//! [`lookup`] maps `(key, shift, user)` to an [`Op`]. The engine executes
//! the operation; this module only decides what a key means.
//!
//! # Keyboard
//!
//! ```text
//! key        unshifted  f           g
//! √x         √x         A           x²
//! eˣ         eˣ         B           LN
//! 10ˣ        10ˣ        C           LOG
//! yˣ         yˣ         D           %
//! 1/x        1/x        E           Δ%
//! CHS        CHS        MATRIX      ABS
//! 7 8 9      digits     FIX SCI ENG DEG RAD GRD
//! GTO        GTO        HYP         HYP⁻¹
//! SIN..TAN   SIN..TAN   DIM (i) I   SIN⁻¹..TAN⁻¹
//! EEX        EEX        RESULT      π
//! 4 5        digits     x≷ DSE      SF CF
//! GSB        GSB        CLEAR Σ     RTN
//! R↓         R↓         CLEAR PRGM  R↑
//! x≷y        x≷y        CLEAR REG   RND
//! ←          ←          CLEAR PREF  CLx
//! ENTER      ENTER      RAN#        LSTx
//! 1 2 3      digits     →R →H.MS →RAD   →P →H →DEG
//! STO        STO        FRAC        INT
//! RCL        RCL        USER        MEM
//! 0 .        digits     x! s        x̄ ŷ,r
//! Σ+         Σ+         L.R.        Σ−
//! +          +          Py,x        Cy,x
//! ```
//!
//! Programming, matrix, complex, SOLVE and ∫ functions have no operation and
//! dispatch as no-ops. In USER mode the unshifted and f-shifted meanings of
//! the top-left five keys trade places.

use crate::keys::Key;
use crate::mode::{AngleUnit, DisplayFormat};
use crate::registers::{RegisterAddr, RegisterOp};
use crate::shift::{FormatKind, Prefix, RegisterAction, Shift};

/// One-operand functions: X → f(X).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryFn {
    Sqrt,
    Square,
    Inverse,
    Exp,
    Ln,
    Exp10,
    Log,
    Abs,
    Int,
    Frac,
    Round,
    Factorial,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    ToHms,
    ToHours,
    ToRad,
    ToDeg,
}

/// Two-operand functions: (Y, X) → f(Y, X), dropping the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryFn {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Permutations,
    Combinations,
}

/// Everything a key press can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    // Digit entry
    Digit(u8),
    Point,
    Eex,
    Chs,
    Enter,
    Backspace,

    // Control
    BeginPrefix(Prefix),
    ClearPrefix,
    On,

    // Stack
    RollDown,
    RollUp,
    SwapXY,
    ClearX,
    LastX,

    // Arithmetic and functions
    Unary(UnaryFn),
    Binary(BinaryFn),
    Percent,
    PercentChange,
    ToPolar,
    ToRect,
    Pi,
    Random,

    // Storage registers
    Store(RegisterAddr),
    StoreOp(RegisterOp, RegisterAddr),
    Recall(RegisterAddr),
    RecallOp(RegisterOp, RegisterAddr),
    Exchange(RegisterAddr),
    StoreSeed,
    RecallSeed,
    ClearRegisters,

    // Modes
    SetFormat(DisplayFormat),
    SetAngle(AngleUnit),
    ToggleUser,
    SetFlag(u8),
    ClearFlag(u8),

    // Statistics
    SigmaPlus,
    SigmaMinus,
    Mean,
    StdDev,
    LinearRegression,
    Estimate,
    ClearSigma,
}

/// Effect of an operation on the stack-lift flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lift {
    Enable,
    Disable,
    Neutral,
}

impl Op {
    /// Stack-lift effect once the operation succeeds.
    pub fn lift(self) -> Lift {
        match self {
            Op::Enter | Op::ClearX | Op::SigmaPlus | Op::SigmaMinus => Lift::Disable,
            Op::BeginPrefix(_)
            | Op::Backspace
            | Op::ClearRegisters
            | Op::ClearPrefix
            | Op::On
            | Op::Chs
            | Op::SetFormat(_)
            | Op::SetAngle(_)
            | Op::ToggleUser
            | Op::SetFlag(_)
            | Op::ClearFlag(_) => Lift::Neutral,
            _ => Lift::Enable,
        }
    }

    /// Whether the operation works on the entry buffer rather than on a
    /// committed X.
    pub fn is_entry(self) -> bool {
        matches!(
            self,
            Op::Digit(_) | Op::Point | Op::Eex | Op::Chs | Op::Backspace
        )
    }
}

/// The top-left row whose meanings USER mode swaps.
fn is_user_row(key: Key) -> bool {
    matches!(
        key,
        Key::SqrtX | Key::ExpX | Key::TenX | Key::WyeX | Key::InverseX
    )
}

/// Map a key press to its operation. `None` means the combination does
/// nothing in this engine.
pub fn lookup(key: Key, shift: Shift, user: bool) -> Option<Op> {
    use BinaryFn as B;
    use Shift::{F, G};
    use UnaryFn as U;

    let shift = match (user && is_user_row(key), shift) {
        (true, Shift::None) => F,
        (true, F) => Shift::None,
        (_, s) => s,
    };

    if let (Shift::None, Some(d)) = (shift, key.digit()) {
        return Some(Op::Digit(d));
    }

    let op = match (key, shift) {
        (Key::SqrtX, Shift::None) => Op::Unary(U::Sqrt),
        (Key::SqrtX, G) => Op::Unary(U::Square),
        (Key::ExpX, Shift::None) => Op::Unary(U::Exp),
        (Key::ExpX, G) => Op::Unary(U::Ln),
        (Key::TenX, Shift::None) => Op::Unary(U::Exp10),
        (Key::TenX, G) => Op::Unary(U::Log),
        (Key::WyeX, Shift::None) => Op::Binary(B::Pow),
        (Key::WyeX, G) => Op::Percent,
        (Key::InverseX, Shift::None) => Op::Unary(U::Inverse),
        (Key::InverseX, G) => Op::PercentChange,

        (Key::Chs, Shift::None) => Op::Chs,
        (Key::Chs, G) => Op::Unary(U::Abs),
        (Key::Digit7, F) => Op::BeginPrefix(Prefix::Format(FormatKind::Fix)),
        (Key::Digit8, F) => Op::BeginPrefix(Prefix::Format(FormatKind::Sci)),
        (Key::Digit9, F) => Op::BeginPrefix(Prefix::Format(FormatKind::Eng)),
        (Key::Digit7, G) => Op::SetAngle(AngleUnit::Deg),
        (Key::Digit8, G) => Op::SetAngle(AngleUnit::Rad),
        (Key::Digit9, G) => Op::SetAngle(AngleUnit::Grad),
        (Key::Division, Shift::None) => Op::Binary(B::Div),

        (Key::Gto, F) => Op::BeginPrefix(Prefix::Hyp { inverse: false }),
        (Key::Gto, G) => Op::BeginPrefix(Prefix::Hyp { inverse: true }),
        (Key::Sin, Shift::None) => Op::Unary(U::Sin),
        (Key::Sin, G) => Op::Unary(U::Asin),
        (Key::Cos, Shift::None) => Op::Unary(U::Cos),
        (Key::Cos, G) => Op::Unary(U::Acos),
        (Key::Tan, Shift::None) => Op::Unary(U::Tan),
        (Key::Tan, G) => Op::Unary(U::Atan),
        (Key::Eex, Shift::None) => Op::Eex,
        (Key::Eex, G) => Op::Pi,

        (Key::Digit4, F) => Op::BeginPrefix(Prefix::register(RegisterAction::Exchange)),
        (Key::Digit4, G) => Op::BeginPrefix(Prefix::Flag { set: true }),
        (Key::Digit5, G) => Op::BeginPrefix(Prefix::Flag { set: false }),
        (Key::Multiplication, Shift::None) => Op::Binary(B::Mul),

        (Key::Gsb, F) => Op::ClearSigma,
        (Key::RollDown, Shift::None) => Op::RollDown,
        (Key::RollDown, G) => Op::RollUp,
        (Key::XSwapY, Shift::None) => Op::SwapXY,
        (Key::XSwapY, F) => Op::ClearRegisters,
        (Key::XSwapY, G) => Op::Unary(U::Round),
        (Key::Backspace, Shift::None) => Op::Backspace,
        (Key::Backspace, F) => Op::ClearPrefix,
        (Key::Backspace, G) => Op::ClearX,

        (Key::Enter, Shift::None) => Op::Enter,
        (Key::Enter, F) => Op::Random,
        (Key::Enter, G) => Op::LastX,
        (Key::Digit1, F) => Op::ToRect,
        (Key::Digit1, G) => Op::ToPolar,
        (Key::Digit2, F) => Op::Unary(U::ToHms),
        (Key::Digit2, G) => Op::Unary(U::ToHours),
        (Key::Digit3, F) => Op::Unary(U::ToRad),
        (Key::Digit3, G) => Op::Unary(U::ToDeg),
        (Key::Subtraction, Shift::None) => Op::Binary(B::Sub),

        (Key::On, _) => Op::On,
        (Key::Sto, Shift::None) => Op::BeginPrefix(Prefix::register(RegisterAction::Store)),
        (Key::Sto, F) => Op::Unary(U::Frac),
        (Key::Sto, G) => Op::Unary(U::Int),
        (Key::Rcl, Shift::None) => Op::BeginPrefix(Prefix::register(RegisterAction::Recall)),
        (Key::Rcl, F) => Op::ToggleUser,
        (Key::Digit0, F) => Op::Unary(U::Factorial),
        (Key::Digit0, G) => Op::Mean,
        (Key::Decimal, Shift::None) => Op::Point,
        (Key::Decimal, F) => Op::StdDev,
        (Key::Decimal, G) => Op::Estimate,
        (Key::SigmaPlus, Shift::None) => Op::SigmaPlus,
        (Key::SigmaPlus, F) => Op::LinearRegression,
        (Key::SigmaPlus, G) => Op::SigmaMinus,
        (Key::Addition, Shift::None) => Op::Binary(B::Add),
        (Key::Addition, F) => Op::Binary(B::Permutations),
        (Key::Addition, G) => Op::Binary(B::Combinations),

        _ => return None,
    };
    Some(op)
}
