//! AST evaluator
//!
//! Operand arithmetic is plain IEEE-754: `(1/0)` inside an operand is
//! infinite rather than an error. The formatter decides what is displayable.

use crate::core::parser::{ArithOp, AstNode, Parser};
use crate::core::CalcResult;

/// Evaluator for operand expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an AST node
    #[must_use]
    pub fn evaluate(&self, node: &AstNode) -> f64 {
        match node {
            AstNode::Number(n) => *n,
            AstNode::Negate(inner) => -self.evaluate(inner),
            AstNode::BinaryOp { left, op, right } => {
                let l = self.evaluate(left);
                let r = self.evaluate(right);
                match op {
                    ArithOp::Add => l + r,
                    ArithOp::Sub => l - r,
                    ArithOp::Mul => l * r,
                    ArithOp::Div => l / r,
                    ArithOp::Rem => l % r,
                }
            }
        }
    }

    /// Parses and evaluates a string expression
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        Ok(self.evaluate(&ast))
    }

    /// Evaluates an operand, mapping any failure to NaN
    #[must_use]
    pub fn evaluate_operand(&self, input: &str) -> f64 {
        self.evaluate_str(input).unwrap_or(f64::NAN)
    }
}
