//! rpn15c: an HP-15C style RPN calculator engine.
//!
//! The engine is the part of a calculator behind the keyboard: a four level
//! stack with LastX, twenty storage registers plus I, digit entry, the f/g
//! shifts, prefix keys and the display formatter. A UI presses keys and
//! draws the returned display.
//!
//! # Architecture
//!
//! ```text
//! key id → Key → (Key, Shift, USER) → Op → Engine state → DisplayState
//!          keys        shift/ops        engine             display
//! ```
//!
//! # Example
//!
//! ```
//! use rpn15c::Engine;
//!
//! let mut engine = Engine::new();
//! for key in ["5", "ENTER", "3", "+"] {
//!     engine.press(key, None);
//! }
//! assert_eq!(engine.get_display().line(), "8.0000");
//! ```

pub mod config;
pub mod display;
pub mod engine;
pub mod entry;
pub mod error;
pub mod keys;
pub mod math;
pub mod mode;
pub mod number;
pub mod ops;
pub mod random;
pub mod registers;
pub mod shift;
pub mod snapshot;
pub mod stack;
pub mod stats;

pub use config::{Config, ConfigError, OverflowPolicy};
pub use display::{DisplayState, StatusFlags};
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use keys::Key;
pub use mode::{AngleUnit, DisplayFormat, ModeState};
pub use number::Number;
pub use shift::Shift;
pub use snapshot::{Snapshot, SnapshotError};
