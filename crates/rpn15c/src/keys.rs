//! Physical keys.
//!
//! Every key has a stable identifier used by the UI layer (`digit-7`,
//! `shift-f`, ...) that does not change with its printed caption. For
//! scripting, [`Key::parse`] also accepts the primary legend (`7`, `f`,
//! `ENTER`, `+`).

use std::fmt;

/// The 39 keys of the keyboard, in layout order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    SqrtX,
    ExpX,
    TenX,
    WyeX,
    InverseX,
    Chs,
    Digit7,
    Digit8,
    Digit9,
    Division,
    Sst,
    Gto,
    Sin,
    Cos,
    Tan,
    Eex,
    Digit4,
    Digit5,
    Digit6,
    Multiplication,
    RunStop,
    Gsb,
    RollDown,
    XSwapY,
    Backspace,
    Enter,
    Digit1,
    Digit2,
    Digit3,
    Subtraction,
    On,
    ShiftF,
    ShiftG,
    Sto,
    Rcl,
    Digit0,
    Decimal,
    SigmaPlus,
    Addition,
}

/// Key, identifier and accepted legends.
const KEY_TABLE: [(Key, &str, &[&str]); 39] = [
    (Key::SqrtX, "sqrt-x", &["√X", "SQRT"]),
    (Key::ExpX, "exp-x", &["E^X", "EXP"]),
    (Key::TenX, "ten-x", &["10^X"]),
    (Key::WyeX, "wye-x", &["Y^X"]),
    (Key::InverseX, "inverse-x", &["1/X"]),
    (Key::Chs, "chs", &["CHS"]),
    (Key::Digit7, "digit-7", &["7"]),
    (Key::Digit8, "digit-8", &["8"]),
    (Key::Digit9, "digit-9", &["9"]),
    (Key::Division, "division", &["÷", "/"]),
    (Key::Sst, "sst", &["SST"]),
    (Key::Gto, "gto", &["GTO"]),
    (Key::Sin, "sin", &["SIN"]),
    (Key::Cos, "cos", &["COS"]),
    (Key::Tan, "tan", &["TAN"]),
    (Key::Eex, "eex", &["EEX"]),
    (Key::Digit4, "digit-4", &["4"]),
    (Key::Digit5, "digit-5", &["5"]),
    (Key::Digit6, "digit-6", &["6"]),
    (Key::Multiplication, "multiplication", &["×", "*"]),
    (Key::RunStop, "rtos", &["R/S"]),
    (Key::Gsb, "gsb", &["GSB"]),
    (Key::RollDown, "r-down", &["R↓", "RDN"]),
    (Key::XSwapY, "x-swap-y", &["X≷Y", "X<>Y", "SWAP"]),
    (Key::Backspace, "backspace", &["←", "BSP"]),
    (Key::Enter, "enter", &["ENTER"]),
    (Key::Digit1, "digit-1", &["1"]),
    (Key::Digit2, "digit-2", &["2"]),
    (Key::Digit3, "digit-3", &["3"]),
    (Key::Subtraction, "subtraction", &["−", "-"]),
    (Key::On, "on", &["ON"]),
    (Key::ShiftF, "shift-f", &["F"]),
    (Key::ShiftG, "shift-g", &["G"]),
    (Key::Sto, "sto", &["STO"]),
    (Key::Rcl, "rcl", &["RCL"]),
    (Key::Digit0, "digit-0", &["0"]),
    (Key::Decimal, "decimal", &[".", "•"]),
    (Key::SigmaPlus, "sum", &["Σ+", "S+"]),
    (Key::Addition, "addition", &["+"]),
];

impl Key {
    /// All keys in layout order.
    pub fn all() -> impl Iterator<Item = Key> {
        KEY_TABLE.iter().map(|(key, _, _)| *key)
    }

    /// Stable identifier.
    pub fn id(self) -> &'static str {
        KEY_TABLE
            .iter()
            .find(|(key, _, _)| *key == self)
            .map(|(_, id, _)| *id)
            .unwrap_or("")
    }

    /// Look a key up by its stable identifier.
    pub fn from_id(id: &str) -> Option<Key> {
        KEY_TABLE
            .iter()
            .find(|(_, key_id, _)| *key_id == id)
            .map(|(key, _, _)| *key)
    }

    /// Look a key up by identifier or by legend (case-insensitive).
    pub fn parse(token: &str) -> Option<Key> {
        if let Some(key) = Key::from_id(token) {
            return Some(key);
        }
        let upper = token.to_uppercase();
        KEY_TABLE
            .iter()
            .find(|(_, _, legends)| legends.contains(&upper.as_str()))
            .map(|(key, _, _)| *key)
    }

    /// The digit this key enters, if any.
    pub fn digit(self) -> Option<u8> {
        match self {
            Key::Digit0 => Some(0),
            Key::Digit1 => Some(1),
            Key::Digit2 => Some(2),
            Key::Digit3 => Some(3),
            Key::Digit4 => Some(4),
            Key::Digit5 => Some(5),
            Key::Digit6 => Some(6),
            Key::Digit7 => Some(7),
            Key::Digit8 => Some(8),
            Key::Digit9 => Some(9),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
