//! TI-83 keypad emulator core
//!
//! A keypad controller that turns key identifiers into two-operand
//! arithmetic and renders the entry line and a history trace to a display
//! sink.
//!
//! # Design
//!
//! - **Explicit ownership**: one [`KeypadController`] per session, built with
//!   its display sink, haptic channel and clock injected.
//! - **No dynamic evaluation**: operands go through a recursive-descent
//!   parser, never through a general code evaluator.
//! - **Errors as display state**: every failure shows as `"Error"`; nothing
//!   panics or escapes the controller.
//! - **Deterministic time**: mode messages restore through
//!   [`KeypadController::tick`], driven by a real or manual clock.
//!
//! # Example
//!
//! ```rust
//! use ti83_core::prelude::*;
//!
//! let clock = ManualClock::new();
//! let mut calc = KeypadController::new(MemoryDisplay::new(), NoHaptics, clock.clone());
//!
//! calc.handle_script("5 + 3 + 2 enter");
//! assert_eq!(calc.display().primary(), "10");
//! assert_eq!(calc.history(), "8 + 2");
//!
//! calc.handle_key_press("mode");
//! assert_eq!(calc.display().primary(), "Radian Mode");
//! clock.advance_ms(1500);
//! calc.tick();
//! assert_eq!(calc.display().primary(), "10");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod clock;
pub mod config;
pub mod controller;
pub mod core;
pub mod display;
pub mod dom;
pub mod driver;
pub mod haptics;
pub mod keypad;
pub mod keys;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use controller::KeypadController;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::config::{CalculatorConfig, RestorePolicy};
    pub use crate::controller::{CalculatorState, ControllerSnapshot, KeypadController};
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{
        format_result, AngleMode, CalcError, CalcResult, Calculator, Operation, UnaryFunction,
        ERROR_SENTINEL,
    };
    pub use crate::display::{DisplaySink, MemoryDisplay};
    pub use crate::dom::{DomElement, DomEvent, MockDom};
    pub use crate::driver::{CalculatorDriver, DomDriver, HeadlessDriver};
    pub use crate::haptics::{Haptics, NoHaptics, RecordingHaptics};
    pub use crate::keypad::{Keypad, KeypadButton};
    pub use crate::keys::{Key, KeySequence};

    #[cfg(feature = "wasm")]
    pub use crate::wasm::BrowserCalculator;
}
