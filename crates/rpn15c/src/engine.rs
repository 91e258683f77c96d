//! The calculator engine.
//!
//! [`Engine`] owns every piece of state: the stack, the storage registers,
//! the modes, the entry buffer, the shift and any pending prefix. The UI
//! feeds it one key at a time through [`Engine::press`] or
//! [`Engine::dispatch`] and redraws from the returned [`DisplayState`].
//!
//! Each operation runs against a checkpoint. If it fails the engine rolls
//! back to the checkpoint, so a failed operation never leaves partial
//! results behind, and shows `Error n` until the next key.

use log::{debug, trace, warn};

use crate::config::{Config, OverflowPolicy};
use crate::display::{DisplayState, StatusFlags};
use crate::entry::{EntryBuffer, Erase};
use crate::error::{EngineError, EngineResult};
use crate::keys::Key;
use crate::math;
use crate::mode::{AngleUnit, MAX_FORMAT_DIGITS, ModeState, OVERFLOW_FLAG};
use crate::number::{Fit, Number};
use crate::ops::{self, Lift, Op};
use crate::random::Random;
use crate::registers::Registers;
use crate::shift::{Prefix, PrefixStep, Shift};
use crate::snapshot::{SNAPSHOT_VERSION, Snapshot, SnapshotError};
use crate::stack::Stack;
use crate::stats::{SUM_COUNT, Sums};

/// An HP-15C style RPN engine.
#[derive(Clone, Debug)]
pub struct Engine {
    stack: Stack,
    registers: Registers,
    modes: ModeState,
    random: Random,
    /// Digits being keyed into X; `None` when idle.
    entry: Option<EntryBuffer>,
    shift: Shift,
    prefix: Option<Prefix>,
    stack_lift: bool,
    /// Error shown until the next key.
    error: Option<EngineError>,
    overflow: OverflowPolicy,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// A fresh engine: zeroed stack and registers, FIX 4, DEG.
    pub fn new() -> Self {
        Self {
            stack: Stack::new(),
            registers: Registers::new(),
            modes: ModeState::new(),
            random: Random::default(),
            entry: None,
            shift: Shift::None,
            prefix: None,
            stack_lift: true,
            error: None,
            overflow: OverflowPolicy::default(),
        }
    }

    /// A fresh engine set up from a configuration file.
    pub fn with_config(config: &Config) -> Self {
        let mut engine = Self::new();
        engine.modes.format = config.display_format();
        engine.modes.angle = config.angle.unit;
        engine.modes.begin = config.engine.begin;
        engine.random = Random::new(config.engine.seed);
        engine.overflow = config.engine.overflow;
        engine
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn modes(&self) -> &ModeState {
        &self.modes
    }

    pub fn shift(&self) -> Shift {
        self.shift
    }

    pub fn prefix(&self) -> Option<Prefix> {
        self.prefix
    }

    pub fn stack_lift(&self) -> bool {
        self.stack_lift
    }

    pub fn error(&self) -> Option<EngineError> {
        self.error
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow
    }

    pub fn set_overflow_policy(&mut self, policy: OverflowPolicy) {
        self.overflow = policy;
    }

    /// Whether a number is being keyed.
    pub fn is_entering(&self) -> bool {
        self.entry.is_some()
    }

    /// The entry buffer as typed, while entering.
    pub fn entry_text(&self) -> Option<String> {
        self.entry.as_ref().map(EntryBuffer::text)
    }

    /// Press a key by identifier (or legend).
    ///
    /// `hint` overrides the current shift for this press. Unknown keys are
    /// ignored. Errors are reported through the display, never returned.
    pub fn press(&mut self, key_id: &str, hint: Option<Shift>) -> DisplayState {
        let Some(key) = Key::parse(key_id) else {
            warn!("ignoring unknown key '{}'", key_id);
            return self.get_display();
        };
        let shift = hint.unwrap_or(self.shift);
        let user = self.modes.user;
        match self.dispatch(key, shift, user) {
            Ok(display) => display,
            Err(_) => self.get_display(),
        }
    }

    /// Process one key with an explicit shift and keyboard mode.
    pub fn dispatch(&mut self, key: Key, shift: Shift, user: bool) -> EngineResult<DisplayState> {
        // An error display swallows the next key.
        if self.error.take().is_some() {
            self.shift = Shift::None;
            return Ok(self.get_display());
        }

        if let Some(pressed) = Shift::of_key(key) {
            self.shift = shift.toggle(pressed);
            return Ok(self.get_display());
        }
        self.shift = Shift::None;

        let op = if let Some(prefix) = self.prefix.take() {
            match prefix.feed(key, shift) {
                PrefixStep::Pending(next) => {
                    self.prefix = Some(next);
                    return Ok(self.get_display());
                }
                PrefixStep::Complete(op) => op,
                PrefixStep::Cancel => {
                    debug!("{:?} cancelled by {} ({:?})", prefix, key, shift);
                    return Ok(self.get_display());
                }
            }
        } else {
            match ops::lookup(key, shift, user) {
                Some(op) => op,
                None => {
                    debug!("{} has no function with shift {:?}", key, shift);
                    return Ok(self.get_display());
                }
            }
        };

        trace!("{} {:?} -> {:?}", key, shift, op);
        self.execute(op)
    }

    /// Run one operation, rolling back on failure.
    pub fn execute(&mut self, op: Op) -> EngineResult<DisplayState> {
        let checkpoint = self.clone();
        match self.terminate_and_apply(op) {
            Ok(()) => {
                match op.lift() {
                    Lift::Enable => self.stack_lift = true,
                    Lift::Disable => self.stack_lift = false,
                    Lift::Neutral => {}
                }
                Ok(self.get_display())
            }
            Err(err) => {
                debug!("{:?} failed: {}", op, err);
                *self = checkpoint;
                // The keyed number stays in X as a finished value.
                if self.entry.take().is_some() {
                    self.stack_lift = true;
                }
                self.prefix = None;
                self.shift = Shift::None;
                self.error = Some(err);
                Err(err)
            }
        }
    }

    fn terminate_and_apply(&mut self, op: Op) -> EngineResult<()> {
        if !op.is_entry() {
            self.finish_entry()?;
        }
        self.apply(op)
    }

    /// The current display. Does not change any state.
    pub fn get_display(&self) -> DisplayState {
        let status = self.status();
        if let Some(err) = self.error {
            return DisplayState::error(err.display_text(), status);
        }
        match &self.entry {
            Some(buffer) => DisplayState {
                mantissa_text: buffer.mantissa_text().to_string(),
                exponent_text: buffer.exponent_text(),
                sign: if buffer.is_negative() { '-' } else { ' ' },
                status,
            },
            None => DisplayState::number(self.stack.x(), self.modes.format, status),
        }
    }

    fn status(&self) -> StatusFlags {
        StatusFlags {
            user: self.modes.user,
            f_shift: self.shift == Shift::F,
            g_shift: self.shift == Shift::G,
            begin: self.modes.begin,
            rad: self.modes.angle == AngleUnit::Rad,
            grad: self.modes.angle == AngleUnit::Grad,
            dmy: false,
            complex: false,
            error: self.error.is_some(),
            prgm: false,
            overflow: self.modes.flag(OVERFLOW_FLAG),
        }
    }

    /// Copy the persistent state.
    pub fn serialize_state(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            stack: self.stack.levels(),
            last_x: self.stack.last_x(),
            registers: self.registers.as_slice().to_vec(),
            modes: self.modes.clone(),
            random: self.random.state(),
        }
    }

    /// Replace the persistent state. Transient state is reset; nothing is
    /// changed if the snapshot is invalid.
    pub fn restore_state(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if let Err(err) = snapshot.validate() {
            warn!("rejecting state snapshot: {}", err);
            return Err(err);
        }
        let mut registers = Registers::new();
        if let Err(found) = registers.load(&snapshot.registers) {
            return Err(SnapshotError::Registers {
                found,
                expected: registers.as_slice().len(),
            });
        }
        self.stack.restore(snapshot.stack, snapshot.last_x);
        self.registers = registers;
        self.modes = snapshot.modes.clone();
        self.random.set_state(snapshot.random);
        self.entry = None;
        self.shift = Shift::None;
        self.prefix = None;
        self.error = None;
        self.stack_lift = true;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    fn apply(&mut self, op: Op) -> EngineResult<()> {
        match op {
            Op::Digit(d) => self.key_digit(d),
            Op::Point => self.key_point(),
            Op::Eex => self.key_eex(),
            Op::Chs => self.key_chs(),
            Op::Backspace => self.key_backspace(),
            Op::Enter => {
                let x = self.stack.x();
                self.stack.push(x);
            }

            Op::BeginPrefix(prefix) => self.prefix = Some(prefix),
            Op::ClearPrefix => self.prefix = None,
            Op::On => {
                self.prefix = None;
                self.modes.set_flag(OVERFLOW_FLAG, false);
            }

            Op::RollDown => self.stack.roll_down(),
            Op::RollUp => self.stack.roll_up(),
            Op::SwapXY => self.stack.swap_xy(),
            Op::ClearX => self.stack.set_x(Number::ZERO),
            Op::LastX => self.push_value(self.stack.last_x()),

            Op::Unary(func) => {
                let raw = func.eval(self.stack.x().value(), &self.modes)?;
                let result = self.fit(raw)?;
                self.stack.apply_unary(result);
            }
            Op::Binary(func) => {
                let raw = func.eval(self.stack.y().value(), self.stack.x().value())?;
                let result = self.fit(raw)?;
                self.stack.apply_binary(result);
            }
            Op::Percent => {
                let raw = math::percent(self.stack.y().value(), self.stack.x().value());
                let result = self.fit(raw)?;
                self.stack.apply_unary(result);
            }
            Op::PercentChange => {
                let raw = math::percent_change(self.stack.y().value(), self.stack.x().value())?;
                let result = self.fit(raw)?;
                self.stack.apply_unary(result);
            }
            Op::ToPolar => {
                let (x, y) = (self.stack.x().value(), self.stack.y().value());
                let (r, theta) = math::to_polar(x, y, self.modes.angle);
                self.set_pair(r, theta)?;
            }
            Op::ToRect => {
                let (r, theta) = (self.stack.x().value(), self.stack.y().value());
                let (x, y) = math::to_rect(r, theta, self.modes.angle);
                self.set_pair(x, y)?;
            }
            Op::Pi => self.push_value(Number::new(std::f64::consts::PI)),
            Op::Random => {
                let value = Number::new(self.random.next_value());
                self.push_value(value);
            }

            Op::Store(addr) => self.registers.store(addr, self.stack.x())?,
            Op::StoreOp(reg_op, addr) => {
                let fit = self.registers.store_op(addr, reg_op, self.stack.x())?;
                self.settle(fit)?;
            }
            Op::Recall(addr) => {
                let value = self.registers.recall(addr)?;
                self.push_value(value);
            }
            Op::RecallOp(reg_op, addr) => {
                let value = self.registers.recall(addr)?;
                let fit = reg_op.apply(self.stack.x(), value)?;
                let result = self.settle(fit)?;
                self.stack.apply_unary(result);
            }
            Op::Exchange(addr) => {
                let old = self.registers.exchange(addr, self.stack.x())?;
                self.stack.set_x(old);
            }
            Op::StoreSeed => self.random.seed(self.stack.x().value()),
            Op::RecallSeed => self.push_value(Number::new(self.random.current())),
            Op::ClearRegisters => self.registers.clear(),

            Op::SetFormat(format) => {
                if format.digits() <= MAX_FORMAT_DIGITS {
                    self.modes.format = format;
                }
            }
            Op::SetAngle(unit) => self.modes.angle = unit,
            Op::ToggleUser => self.modes.user = !self.modes.user,
            Op::SetFlag(n) => self.modes.set_flag(n, true),
            Op::ClearFlag(n) => self.modes.set_flag(n, false),

            Op::SigmaPlus => self.accumulate(1.0)?,
            Op::SigmaMinus => self.accumulate(-1.0)?,
            Op::Mean => {
                let (x_mean, y_mean) = Sums::read(&self.registers).mean()?;
                self.push_pair(x_mean, y_mean)?;
            }
            Op::StdDev => {
                let (sx, sy) = Sums::read(&self.registers).std_dev()?;
                self.push_pair(sx, sy)?;
            }
            Op::LinearRegression => {
                let (slope, intercept) = Sums::read(&self.registers).linear_regression()?;
                self.push_pair(intercept, slope)?;
            }
            Op::Estimate => {
                let sums = Sums::read(&self.registers);
                let (estimate, r) = sums.estimate(self.stack.x().value())?;
                let estimate = self.fit(estimate)?;
                let r = self.fit(r)?;
                self.stack.save_last_x();
                self.stack.set_x(r);
                self.stack.push(estimate);
            }
            Op::ClearSigma => {
                Sums::clear(&mut self.registers);
                self.stack.clear();
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Digit entry
    // ------------------------------------------------------------------

    /// Start a new entry, lifting the stack if lift is enabled.
    fn begin_entry(&mut self, buffer: EntryBuffer) {
        if self.stack_lift {
            self.stack.push(Number::ZERO);
        }
        self.entry = Some(buffer);
    }

    /// Mirror the entry buffer into X.
    fn sync_entry(&mut self) {
        if let Some(buffer) = &self.entry {
            self.stack.set_x(buffer.value());
        }
    }

    /// Terminate digit entry. A keyed value beyond the display range is an
    /// overflow like any other result.
    fn finish_entry(&mut self) -> EngineResult<()> {
        if let Some(buffer) = self.entry.take() {
            let value = self.fit(buffer.raw_value())?;
            self.stack.set_x(value);
            self.stack_lift = true;
        }
        Ok(())
    }

    fn key_digit(&mut self, digit: u8) {
        match &mut self.entry {
            Some(buffer) => {
                buffer.push_digit(digit);
            }
            None => self.begin_entry(EntryBuffer::with_digit(digit)),
        }
        self.sync_entry();
    }

    fn key_point(&mut self) {
        match &mut self.entry {
            Some(buffer) => {
                buffer.push_point();
            }
            None => self.begin_entry(EntryBuffer::with_point()),
        }
        self.sync_entry();
    }

    fn key_eex(&mut self) {
        match &mut self.entry {
            Some(buffer) => {
                buffer.open_exponent();
            }
            None => self.begin_entry(EntryBuffer::with_exponent()),
        }
        self.sync_entry();
    }

    fn key_chs(&mut self) {
        match &mut self.entry {
            Some(buffer) => {
                buffer.toggle_sign();
                self.sync_entry();
            }
            None => {
                let negated = self.stack.x().negate();
                self.stack.apply_unary(negated);
            }
        }
    }

    fn key_backspace(&mut self) {
        match &mut self.entry {
            Some(buffer) => match buffer.backspace() {
                Erase::Edited => self.sync_entry(),
                Erase::Emptied => {
                    self.entry = None;
                    self.stack.set_x(Number::ZERO);
                    self.stack_lift = false;
                }
            },
            // The first ← after an overflow only stops the blinking.
            None if self.modes.flag(OVERFLOW_FLAG) => {
                self.modes.set_flag(OVERFLOW_FLAG, false);
            }
            None => {
                self.stack.set_x(Number::ZERO);
                self.stack_lift = false;
            }
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Bring a raw result into range under the overflow policy.
    fn fit(&mut self, raw: f64) -> EngineResult<Number> {
        let fit = Number::fit(raw)?;
        self.settle(fit)
    }

    fn settle(&mut self, fit: Fit) -> EngineResult<Number> {
        if fit.overflowed() {
            match self.overflow {
                OverflowPolicy::Error => return Err(EngineError::Overflow),
                OverflowPolicy::Saturate => self.modes.set_flag(OVERFLOW_FLAG, true),
            }
        }
        Ok(fit.number())
    }

    /// Put a value in X, lifting the stack first if lift is enabled.
    fn push_value(&mut self, value: Number) {
        if self.stack_lift {
            self.stack.push(value);
        } else {
            self.stack.set_x(value);
        }
        // A second value pushed by the same operation always lifts.
        self.stack_lift = true;
    }

    /// Push two results: `y` ends up in Y and `x` in X.
    fn push_pair(&mut self, x: f64, y: f64) -> EngineResult<()> {
        let (x, y) = (self.fit(x)?, self.fit(y)?);
        self.push_value(y);
        self.stack.push(x);
        Ok(())
    }

    /// Replace X and Y with two results, saving LastX.
    fn set_pair(&mut self, x: f64, y: f64) -> EngineResult<()> {
        let (x, y) = (self.fit(x)?, self.fit(y)?);
        self.stack.save_last_x();
        self.stack.set_x(x);
        self.stack.set_y(y);
        Ok(())
    }

    /// Σ+ (`weight = 1`) or Σ− (`weight = -1`).
    fn accumulate(&mut self, weight: f64) -> EngineResult<()> {
        let (x, y) = (self.stack.x().value(), self.stack.y().value());
        let sums = Sums::read(&self.registers).accumulate(x, y, weight);
        let mut fitted = [Number::ZERO; SUM_COUNT];
        for (slot, raw) in fitted.iter_mut().zip(sums.to_array()) {
            *slot = self.fit(raw)?;
        }
        Sums::write(fitted, &mut self.registers);
        self.stack.save_last_x();
        self.stack.set_x(fitted[0]);
        Ok(())
    }
}
