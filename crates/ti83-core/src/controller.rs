//! Calculator controller
//!
//! The controller owns all mutable calculator state and is the single entry
//! point for key presses. It is constructed explicitly with its output sink,
//! haptic channel and clock, so each instance can be driven in isolation.
//!
//! Every key handler runs to completion before the next key is accepted. The
//! only deferred work is the display restore after a mode message, which the
//! controller fires from [`KeypadController::tick`] once its deadline passes.

use crate::clock::{Clock, SystemClock};
use crate::config::{CalculatorConfig, RestorePolicy};
use crate::core::evaluator::Evaluator;
use crate::core::{
    format_result, AngleMode, CalcError, CalcResult, Calculator, Operation, UnaryFunction,
    ERROR_SENTINEL,
};
use crate::display::DisplaySink;
use crate::haptics::{Haptics, NoHaptics};
use crate::keys::Key;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Initial and reset value of the entry line
pub const ZERO: &str = "0";

/// Calculation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    current_input: String,
    previous_input: String,
    operation: Option<Operation>,
    memory: f64,
    degree_mode: bool,
    second_mode: bool,
    alpha_mode: bool,
    history: String,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CalculatorState {
    /// Creates a cleared state
    #[must_use]
    pub fn new(degree_mode: bool) -> Self {
        Self {
            current_input: ZERO.to_string(),
            previous_input: String::new(),
            operation: None,
            memory: 0.0,
            degree_mode,
            second_mode: false,
            alpha_mode: false,
            history: String::new(),
        }
    }

    /// Value being entered or just computed
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    /// Left operand, empty when no operator is pending
    #[must_use]
    pub fn previous_input(&self) -> &str {
        &self.previous_input
    }

    /// Pending operator
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Scratch memory. No key reads or writes it.
    #[must_use]
    pub const fn memory(&self) -> f64 {
        self.memory
    }

    /// Trig functions take degrees
    #[must_use]
    pub const fn degree_mode(&self) -> bool {
        self.degree_mode
    }

    /// Angle convention derived from `degree_mode`
    #[must_use]
    pub const fn angle_mode(&self) -> AngleMode {
        AngleMode::from_degree_flag(self.degree_mode)
    }

    /// `2nd` shift flag
    #[must_use]
    pub const fn second_mode(&self) -> bool {
        self.second_mode
    }

    /// `alpha` shift flag
    #[must_use]
    pub const fn alpha_mode(&self) -> bool {
        self.alpha_mode
    }

    /// History trace
    #[must_use]
    pub fn history(&self) -> &str {
        &self.history
    }

    /// True when the entry line holds the error sentinel
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.current_input == ERROR_SENTINEL
    }
}

/// A display restore scheduled by a mode message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRestore {
    /// Text written back when the restore fires
    pub restore_text: String,
    /// Clock time at which it fires
    pub due_at_ms: u64,
    /// Key-press generation that scheduled it
    pub generation: u64,
}

/// Serializable view of a controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    /// Text currently on the primary display
    pub display: String,
    /// Text currently on the history strip
    pub history: String,
    /// Calculation state
    pub state: CalculatorState,
    /// Deadline of the next live restore
    pub pending_restore_ms: Option<u64>,
}

/// Keypad controller
#[derive(Debug)]
pub struct KeypadController<D, H = NoHaptics, C = SystemClock> {
    state: CalculatorState,
    config: CalculatorConfig,
    evaluator: Evaluator,
    display: D,
    haptics: H,
    clock: C,
    screen: String,
    generation: u64,
    pending: Vec<PendingRestore>,
}

impl<D: DisplaySink> KeypadController<D> {
    /// Creates a controller with no haptics and the system clock
    #[must_use]
    pub fn with_display(display: D) -> Self {
        Self::new(display, NoHaptics, SystemClock::new())
    }
}

impl<D, H, C> KeypadController<D, H, C>
where
    D: DisplaySink,
    H: Haptics,
    C: Clock,
{
    /// Creates a controller with the default configuration
    #[must_use]
    pub fn new(display: D, haptics: H, clock: C) -> Self {
        Self::with_config(display, haptics, clock, CalculatorConfig::default())
    }

    /// Creates a controller and renders the initial `0`
    #[must_use]
    pub fn with_config(display: D, haptics: H, clock: C, config: CalculatorConfig) -> Self {
        let mut controller = Self {
            state: CalculatorState::new(config.degree_mode),
            config,
            evaluator: Evaluator::new(),
            display,
            haptics,
            clock,
            screen: String::new(),
            generation: 0,
            pending: Vec::new(),
        };
        controller.render();
        controller
    }

    // ===== Accessors =====

    /// Calculation state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Current entry line
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.state.current_input
    }

    /// History trace
    #[must_use]
    pub fn history(&self) -> &str {
        &self.state.history
    }

    /// Text last written to the primary display
    ///
    /// Differs from [`current_input`](Self::current_input) while a mode
    /// message is showing.
    #[must_use]
    pub fn screen(&self) -> &str {
        &self.screen
    }

    /// The display sink
    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The display sink, mutably
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// The haptic channel
    #[must_use]
    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    /// The clock
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Serializable view of the controller
    #[must_use]
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            display: self.screen.clone(),
            history: self.state.history.clone(),
            state: self.state.clone(),
            pending_restore_ms: self.pending_restore_due(),
        }
    }

    /// Deadline of the next restore that would still write to the display
    #[must_use]
    pub fn pending_restore_due(&self) -> Option<u64> {
        self.pending
            .iter()
            .filter(|p| self.is_live(p))
            .map(|p| p.due_at_ms)
            .min()
    }

    /// Consumes the controller, returning its collaborators
    pub fn into_parts(self) -> (D, H, C) {
        (self.display, self.haptics, self.clock)
    }

    // ===== Input =====

    /// Handles a raw key identifier
    ///
    /// Pulses the haptic channel, then dispatches. Tokens that are neither a
    /// keypad key nor a numeric literal are dropped.
    pub fn handle_key_press(&mut self, key_id: &str) {
        self.pulse();
        match Key::parse(key_id) {
            Some(key) => self.dispatch(key),
            None => trace!(key_id, "ignoring unknown key"),
        }
    }

    /// Handles a typed key
    pub fn handle_key(&mut self, key: Key) {
        self.pulse();
        self.dispatch(key);
    }

    /// Handles a whitespace-separated key script, ignoring unknown tokens
    pub fn handle_script(&mut self, script: &str) {
        for token in script.split_whitespace() {
            self.handle_key_press(token);
        }
    }

    /// Fires every restore that is due
    ///
    /// Returns true if the display was written.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.due_at_ms <= now);
        self.pending = waiting;

        let mut wrote = false;
        for restore in due {
            if self.is_live(&restore) {
                trace!(text = %restore.restore_text, "restoring display");
                self.write_primary(&restore.restore_text);
                wrote = true;
            } else {
                trace!(generation = restore.generation, "discarding stale restore");
            }
        }
        wrote
    }

    fn pulse(&mut self) {
        let pulse = self.config.haptic_pulse();
        if !pulse.is_zero() {
            self.haptics.pulse(pulse);
        }
    }

    fn dispatch(&mut self, key: Key) {
        debug!(key = %key, "key press");
        self.settle_transient();
        self.generation = self.generation.wrapping_add(1);

        match key {
            Key::Number(n) => self.append(&n),
            Key::OpenParen => self.append("("),
            Key::CloseParen => self.append(")"),
            Key::Decimal => self.append("."),
            Key::Clear | Key::On => self.clear(),
            Key::Delete => self.delete(),
            Key::Enter => self.calculate(),
            Key::Negate => self.negate(),
            Key::Operator(op) => self.set_operation(op),
            Key::Function(f) => self.apply_function(f),
            Key::Square => self.square(),
            Key::Reciprocal => self.reciprocal(),
            Key::Mode => self.toggle_mode(),
            Key::Second => {
                self.state.second_mode = !self.state.second_mode;
                self.render();
            }
            Key::Alpha => {
                self.state.alpha_mode = !self.state.alpha_mode;
                self.render();
            }
        }
    }

    /// Dismisses a showing mode message under the guarded policy
    fn settle_transient(&mut self) {
        if self.config.restore_policy != RestorePolicy::Guarded {
            return;
        }
        if self.pending.iter().any(|p| self.is_live(p)) {
            self.pending.clear();
            self.render();
        }
    }

    fn is_live(&self, restore: &PendingRestore) -> bool {
        match self.config.restore_policy {
            RestorePolicy::Guarded => restore.generation == self.generation,
            RestorePolicy::Legacy => true,
        }
    }

    // ===== Operations =====

    fn append(&mut self, text: &str) {
        if self.state.current_input == ZERO || self.state.is_error() {
            self.state.current_input = text.to_string();
        } else {
            self.state.current_input.push_str(text);
        }
        self.render();
    }

    fn delete(&mut self) {
        if self.state.current_input.chars().count() > 1 {
            self.state.current_input.pop();
        } else {
            self.state.current_input = ZERO.to_string();
        }
        self.render();
    }

    fn clear(&mut self) {
        self.state.current_input = ZERO.to_string();
        self.state.previous_input.clear();
        self.state.operation = None;
        self.set_history(String::new());
        self.render();
    }

    fn negate(&mut self) {
        if self.state.current_input == ZERO {
            return;
        }
        let input = &mut self.state.current_input;
        if input.starts_with('-') {
            input.remove(0);
            // a lone "-" left by del
            if input.is_empty() {
                *input = ZERO.to_string();
            }
        } else {
            input.insert(0, '-');
        }
        self.render();
    }

    /// Records an operator; the display keeps the left operand
    fn set_operation(&mut self, op: Operation) {
        if self.state.operation.is_some() && !self.state.previous_input.is_empty() {
            self.calculate();
        }
        self.state.operation = Some(op);
        self.state.previous_input = std::mem::replace(&mut self.state.current_input, ZERO.into());
        self.set_history(format!(
            "{} {}",
            self.state.previous_input,
            op.history_symbol()
        ));
    }

    fn calculate(&mut self) {
        let Some(op) = self.state.operation else {
            return;
        };
        if self.state.previous_input.is_empty() {
            return;
        }

        let prev = self.evaluate(&self.state.previous_input);
        let current = self.evaluate(&self.state.current_input);
        let result = Self::finish(Calculator::apply(prev, current, op));

        self.set_history(format!(
            "{} {} {}",
            self.state.previous_input,
            op.history_symbol(),
            self.state.current_input
        ));
        self.state.current_input = result;
        self.state.previous_input.clear();
        self.state.operation = None;
        self.render();
    }

    fn apply_function(&mut self, function: UnaryFunction) {
        let value = self.evaluate(&self.state.current_input);
        let result = function.apply(value, self.state.angle_mode());
        self.set_history(format!("{}({})", function.name(), self.state.current_input));
        self.state.current_input = Self::finish(Ok(result));
        self.render();
    }

    fn square(&mut self) {
        let value = self.evaluate(&self.state.current_input);
        self.set_history(format!("({})\u{b2}", self.state.current_input));
        self.state.current_input = Self::finish(Ok(value * value));
        self.render();
    }

    /// A zero value yields the sentinel without touching history
    fn reciprocal(&mut self) {
        let value = self.evaluate(&self.state.current_input);
        if value == 0.0 {
            debug!(error = %CalcError::DivisionByZero, "reciprocal of zero");
            self.state.current_input = ERROR_SENTINEL.to_string();
        } else {
            self.set_history(format!("({})\u{207b}\u{b9}", self.state.current_input));
            self.state.current_input = Self::finish(Ok(1.0 / value));
        }
        self.render();
    }

    fn toggle_mode(&mut self) {
        self.state.degree_mode = !self.state.degree_mode;
        let mode = self.state.angle_mode();
        info!(mode = mode.message(), "angle mode changed");

        let restore = PendingRestore {
            restore_text: self.state.current_input.clone(),
            due_at_ms: self
                .clock
                .now_ms()
                .saturating_add(self.config.message_duration_ms),
            generation: self.generation,
        };
        self.write_primary(mode.message());
        self.pending.push(restore);
    }

    // ===== Helpers =====

    fn evaluate(&self, operand: &str) -> f64 {
        self.evaluator.evaluate_operand(operand)
    }

    /// Formats a result, collapsing every failure into the sentinel
    fn finish(result: CalcResult<f64>) -> String {
        let checked = result.and_then(|v| {
            if v.is_finite() {
                Ok(v)
            } else {
                Err(CalcError::InvalidResult(v.to_string()))
            }
        });
        match checked {
            Ok(value) => format_result(value),
            Err(err) => {
                debug!(error = %err, "result is not displayable");
                ERROR_SENTINEL.to_string()
            }
        }
    }

    fn set_history(&mut self, text: String) {
        self.display.show_history(&text);
        self.state.history = text;
    }

    fn render(&mut self) {
        let text = self.state.current_input.clone();
        self.write_primary(&text);
    }

    fn write_primary(&mut self, text: &str) {
        self.display.show_primary(text);
        self.screen = text.to_string();
    }
}
