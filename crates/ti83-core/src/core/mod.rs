//! Arithmetic core: operand parsing, evaluation, binary operations and
//! result formatting.
//!
//! Nothing in here knows about keys or displays. The controller feeds operand
//! strings in and gets display strings back.

pub mod evaluator;
pub mod format;
mod operations;
pub mod parser;

pub use format::{format_result, ERROR_SENTINEL};
pub use operations::{AngleMode, Calculator, Operation, UnaryFunction};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// None of these reach the user directly: the controller collapses every one
/// of them into the `"Error"` sentinel on the primary display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division by an exactly-zero right operand
    #[error("Division by zero")]
    DivisionByZero,
    /// Invalid operand syntax
    #[error("Invalid expression: {0}")]
    Parse(String),
    /// Empty operand
    #[error("Empty expression")]
    EmptyExpression,
    /// NaN or non-finite result
    #[error("Invalid result: {0}")]
    InvalidResult(String),
    /// Key identifier not on the keypad
    #[error("Unknown key: {0}")]
    UnknownKey(String),
}

impl CalcError {
    /// Creates a parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
