//! Binary operators and unary functions of the keypad

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Pending binary operator recorded by an operator key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Power (^)
    Power,
}

impl Operation {
    /// All operators in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
    ];

    /// Returns the key identifier for this operator
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
        }
    }

    /// Returns the symbol written to the history trace
    #[must_use]
    pub const fn history_symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "\u{2212}",
            Self::Multiply => "\u{d7}",
            Self::Divide => "\u{f7}",
            Self::Power => "^",
        }
    }

    /// Parses a key identifier into an operator
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }
}

/// Binary arithmetic with the keypad's semantics
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Calculator {
    /// Applies `op` to the two evaluated operands
    ///
    /// Only a zero divisor is rejected here. Every other non-finite outcome
    /// is returned as-is and turned into the error sentinel by the formatter.
    pub fn apply(a: f64, b: f64, op: Operation) -> CalcResult<f64> {
        match op {
            Operation::Add => Ok(Self::add(a, b)),
            Operation::Subtract => Ok(Self::subtract(a, b)),
            Operation::Multiply => Ok(Self::multiply(a, b)),
            Operation::Divide => Self::divide(a, b),
            Operation::Power => Ok(Self::power(a, b)),
        }
    }

    /// Addition: a + b
    #[must_use]
    pub fn add(a: f64, b: f64) -> f64 {
        a + b
    }

    /// Subtraction: a - b
    #[must_use]
    pub fn subtract(a: f64, b: f64) -> f64 {
        a - b
    }

    /// Multiplication: a * b
    #[must_use]
    pub fn multiply(a: f64, b: f64) -> f64 {
        a * b
    }

    /// Division: a / b, rejecting an exactly-zero divisor
    pub fn divide(a: f64, b: f64) -> CalcResult<f64> {
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Ok(a / b)
    }

    /// Power: a ^ b
    ///
    /// A NaN exponent is NaN even for a base of one, and `(±1) ^ ±∞` is NaN.
    #[must_use]
    pub fn power(a: f64, b: f64) -> f64 {
        if b.is_nan() || (a.abs() == 1.0 && b.is_infinite()) {
            return f64::NAN;
        }
        a.powf(b)
    }
}

/// Angle convention for trigonometric keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Inputs are degrees
    #[default]
    Degrees,
    /// Inputs are radians
    Radians,
}

impl AngleMode {
    /// Maps the controller's `degree_mode` flag onto an angle mode
    #[must_use]
    pub const fn from_degree_flag(degree_mode: bool) -> Self {
        if degree_mode {
            Self::Degrees
        } else {
            Self::Radians
        }
    }

    /// Returns the transient message shown when this mode becomes active
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Degrees => "Degree Mode",
            Self::Radians => "Radian Mode",
        }
    }

    fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Degrees => value * PI / 180.0,
            Self::Radians => value,
        }
    }
}

/// Single-operand function keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryFunction {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm
    Ln,
}

impl UnaryFunction {
    /// All function keys in keypad order
    pub const ALL: [Self; 5] = [Self::Sin, Self::Cos, Self::Tan, Self::Log, Self::Ln];

    /// Returns the key identifier, which is also the name used in history
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
        }
    }

    /// Parses a key identifier into a function
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == token)
    }

    /// Returns true for sin, cos and tan
    #[must_use]
    pub const fn is_trigonometric(&self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan)
    }

    /// Applies the function; `mode` only affects trigonometric functions
    #[must_use]
    pub fn apply(&self, value: f64, mode: AngleMode) -> f64 {
        match self {
            Self::Sin => mode.to_radians(value).sin(),
            Self::Cos => mode.to_radians(value).cos(),
            Self::Tan => mode.to_radians(value).tan(),
            Self::Log => value.log10(),
            Self::Ln => value.ln(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== Operation tests =====

    #[test]
    fn test_operation_tokens() {
        assert_eq!(Operation::Add.token(), "+");
        assert_eq!(Operation::Subtract.token(), "-");
        assert_eq!(Operation::Multiply.token(), "*");
        assert_eq!(Operation::Divide.token(), "/");
        assert_eq!(Operation::Power.token(), "^");
    }

    #[test]
    fn test_operation_history_symbols() {
        assert_eq!(Operation::Add.history_symbol(), "+");
        assert_eq!(Operation::Subtract.history_symbol(), "−");
        assert_eq!(Operation::Multiply.history_symbol(), "×");
        assert_eq!(Operation::Divide.history_symbol(), "÷");
        assert_eq!(Operation::Power.history_symbol(), "^");
    }

    #[test]
    fn test_operation_from_token_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_token(op.token()), Some(op));
        }
        assert_eq!(Operation::from_token("%"), None);
        assert_eq!(Operation::from_token("×"), None);
    }

    // ===== Calculator tests =====

    #[test]
    fn test_apply_basic() {
        assert_eq!(Calculator::apply(5.0, 3.0, Operation::Add), Ok(8.0));
        assert_eq!(Calculator::apply(5.0, 3.0, Operation::Subtract), Ok(2.0));
        assert_eq!(Calculator::apply(5.0, 3.0, Operation::Multiply), Ok(15.0));
        assert_eq!(Calculator::apply(10.0, 2.0, Operation::Divide), Ok(5.0));
        assert_eq!(Calculator::apply(2.0, 10.0, Operation::Power), Ok(1024.0));
    }

    #[test]
    fn test_divide_by_zero_rejected() {
        assert_eq!(
            Calculator::apply(10.0, 0.0, Operation::Divide),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            Calculator::apply(10.0, -0.0, Operation::Divide),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_zero_dividend_allowed() {
        assert_eq!(Calculator::apply(0.0, 5.0, Operation::Divide), Ok(0.0));
    }

    #[test]
    fn test_divide_nan_divisor_is_not_rejected() {
        let result = Calculator::apply(1.0, f64::NAN, Operation::Divide).unwrap();
        assert!(result.is_nan());
    }

    #[test]
    fn test_power_nan_exponent() {
        assert!(Calculator::power(1.0, f64::NAN).is_nan());
    }

    #[test]
    fn test_power_unit_base_infinite_exponent() {
        assert!(Calculator::power(1.0, f64::INFINITY).is_nan());
        assert!(Calculator::power(-1.0, f64::NEG_INFINITY).is_nan());
    }

    #[test]
    fn test_power_negative_base_fractional_exponent() {
        assert!(Calculator::power(-8.0, 1.0 / 3.0).is_nan());
    }

    #[test]
    fn test_power_zero_zero() {
        assert_eq!(Calculator::power(0.0, 0.0), 1.0);
    }

    #[test]
    fn test_power_overflow_is_infinite() {
        assert!(Calculator::power(10.0, 400.0).is_infinite());
    }

    // ===== AngleMode tests =====

    #[test]
    fn test_angle_mode_from_flag() {
        assert_eq!(AngleMode::from_degree_flag(true), AngleMode::Degrees);
        assert_eq!(AngleMode::from_degree_flag(false), AngleMode::Radians);
    }

    #[test]
    fn test_angle_mode_messages() {
        assert_eq!(AngleMode::Degrees.message(), "Degree Mode");
        assert_eq!(AngleMode::Radians.message(), "Radian Mode");
    }

    // ===== UnaryFunction tests =====

    #[test]
    fn test_function_names_round_trip() {
        for f in UnaryFunction::ALL {
            assert_eq!(UnaryFunction::from_token(f.name()), Some(f));
        }
        assert_eq!(UnaryFunction::from_token("sqrt"), None);
    }

    #[test]
    fn test_sin_degrees() {
        let v = UnaryFunction::Sin.apply(90.0, AngleMode::Degrees);
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sin_radians() {
        let v = UnaryFunction::Sin.apply(PI / 2.0, AngleMode::Radians);
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cos_degrees() {
        let v = UnaryFunction::Cos.apply(60.0, AngleMode::Degrees);
        assert!((v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_tan_degrees() {
        let v = UnaryFunction::Tan.apply(45.0, AngleMode::Degrees);
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_log_ignores_angle_mode() {
        assert_eq!(UnaryFunction::Log.apply(1000.0, AngleMode::Degrees), 3.0);
        assert_eq!(UnaryFunction::Log.apply(1000.0, AngleMode::Radians), 3.0);
    }

    #[test]
    fn test_ln_of_e() {
        let v = UnaryFunction::Ln.apply(std::f64::consts::E, AngleMode::Degrees);
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_log_of_non_positive() {
        assert!(UnaryFunction::Log.apply(0.0, AngleMode::Degrees).is_infinite());
        assert!(UnaryFunction::Ln.apply(-1.0, AngleMode::Degrees).is_nan());
    }

    #[test]
    fn test_is_trigonometric() {
        assert!(UnaryFunction::Sin.is_trigonometric());
        assert!(UnaryFunction::Tan.is_trigonometric());
        assert!(!UnaryFunction::Log.is_trigonometric());
        assert!(!UnaryFunction::Ln.is_trigonometric());
    }

    proptest! {
        #[test]
        fn prop_add_commutative(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            prop_assert_eq!(Calculator::add(a, b), Calculator::add(b, a));
        }

        #[test]
        fn prop_divide_nonzero_ok(a in -1e6f64..1e6, b in 1e-3f64..1e6) {
            prop_assert!(Calculator::divide(a, b).is_ok());
        }
    }
}
