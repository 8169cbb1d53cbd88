//! Operand expression parser
//!
//! An operand slot holds free-form text, so `(2+3)*4` typed into one slot is
//! a valid sub-expression. The grammar is a small arithmetic subset parsed by
//! recursive descent; nothing is ever handed to a dynamic evaluator.

use crate::core::{CalcError, CalcResult};
use std::fmt;

/// Deepest nesting of parentheses and signs an operand may use
pub const MAX_DEPTH: usize = 256;

/// Most tokens an operand may hold
///
/// Bounds the height of the syntax tree, which the evaluator walks
/// recursively.
pub const MAX_TOKENS: usize = 1024;

/// Arithmetic operators inside an operand expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
    /// Remainder (%)
    Rem,
}

impl ArithOp {
    /// Returns the ASCII symbol for this operator
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Rem => '%',
        }
    }
}

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Arithmetic operator
    Operator(ArithOp),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Operator(op) => write!(f, "{}", op.symbol()),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
        }
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: ArithOp,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: ArithOp, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Tokenizer for converting operand strings to tokens
///
/// Accepts the typographic minus, times and divide signs used on the history
/// line as aliases for their ASCII forms.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            if tokens.len() == MAX_TOKENS {
                return Err(CalcError::parse("Expression too long"));
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => return self.read_number().map(Some),
            // `++` and `--` are increment operators, not two signs
            '+' | '-' if self.input[self.pos + 1..].starts_with(ch) => {
                return Err(CalcError::parse(format!("Unexpected '{ch}{ch}'")));
            }
            '+' => Token::Operator(ArithOp::Add),
            '-' | '\u{2212}' => Token::Operator(ArithOp::Sub),
            '*' | '\u{d7}' => Token::Operator(ArithOp::Mul),
            '/' | '\u{f7}' => Token::Operator(ArithOp::Div),
            '%' => Token::Operator(ArithOp::Rem),
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            _ => {
                return Err(CalcError::parse(format!("Unexpected character: '{ch}'")));
            }
        };
        self.advance();

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        self.pos - start
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;

        let int_digits = self.skip_digits();
        let int_part = &self.input[start..self.pos];
        // `05` is not a decimal literal
        if int_digits > 1 && int_part.starts_with('0') {
            return Err(CalcError::parse(format!(
                "Leading zero in number: '{int_part}'"
            )));
        }

        let mut frac_digits = 0;
        if self.current_char() == Some('.') {
            self.advance();
            frac_digits = self.skip_digits();
        }

        if int_digits == 0 && frac_digits == 0 {
            return Err(CalcError::parse("Expected digits around '.'"));
        }

        if matches!(self.current_char(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.current_char(), Some('+' | '-')) {
                self.advance();
            }
            if self.skip_digits() == 0 {
                return Err(CalcError::parse("Missing exponent digits"));
            }
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::parse(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }
}

/// Recursive descent parser for operand expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/' | '%') unary)*
/// unary      ::= ('-' | '+') unary | primary
/// primary    ::= NUMBER | '(' expression ')'
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let tokens = Tokenizer::new(trimmed).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into an AST, rejecting trailing tokens
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }
        if self.tokens.len() > MAX_TOKENS {
            return Err(CalcError::parse("Expression too long"));
        }

        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::parse(format!(
                "Unexpected token '{token}' at position {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(Token::Operator(op @ (ArithOp::Add | ArithOp::Sub))) = self.current() {
            let op = *op;
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(Token::Operator(op @ (ArithOp::Mul | ArithOp::Div | ArithOp::Rem))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn enter(&mut self) -> CalcResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::parse("Expression nested too deeply"));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        let negate = match self.current() {
            Some(Token::Operator(ArithOp::Sub)) => true,
            Some(Token::Operator(ArithOp::Add)) => false,
            _ => return self.parse_primary(),
        };
        self.advance();
        self.enter()?;
        let inner = self.parse_unary();
        self.leave();
        let inner = inner?;
        Ok(if negate { AstNode::negate(inner) } else { inner })
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let token = self
            .advance()
            .cloned()
            .ok_or_else(|| CalcError::parse("Unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::LeftParen => {
                self.enter()?;
                let expr = self.parse_expression();
                self.leave();
                let expr = expr?;
                match self.advance() {
                    Some(Token::RightParen) => Ok(expr),
                    Some(t) => Err(CalcError::parse(format!("Expected ')' but found '{t}'"))),
                    None => Err(CalcError::parse("Unclosed parenthesis")),
                }
            }
            other => Err(CalcError::parse(format!("Unexpected token: '{other}'"))),
        }
    }
}
