//! Key identifiers
//!
//! The keypad is a closed set of logical keys plus a numeric-literal variant.
//! Tokens are the `data-key` values carried by the page's buttons; `Key`
//! decouples the controller from whatever device produced them.

use crate::core::{CalcError, CalcResult, Operation, UnaryFunction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token for the sign-negation key
pub const NEGATE_TOKEN: &str = "(\u{2212})";
/// Token for the square key
pub const SQUARE_TOKEN: &str = "x\u{b2}";
/// Token for the reciprocal key
pub const RECIPROCAL_TOKEN: &str = "\u{207b}\u{b9}";

/// One logical key on the emulated keypad
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// A numeric literal, usually a single digit
    Number(String),
    /// Binary operator key
    Operator(Operation),
    /// `clear`
    Clear,
    /// `del`
    Delete,
    /// `enter`
    Enter,
    /// `(−)` sign negation
    Negate,
    /// Function key
    Function(UnaryFunction),
    /// `x²`
    Square,
    /// `⁻¹`
    Reciprocal,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `.`
    Decimal,
    /// `2nd`
    Second,
    /// `alpha`
    Alpha,
    /// `on`
    On,
    /// `mode`
    Mode,
}

impl Key {
    /// Every non-numeric key, in keypad order
    #[must_use]
    pub fn named_keys() -> Vec<Self> {
        let mut keys = vec![
            Self::Second,
            Self::Mode,
            Self::Delete,
            Self::Alpha,
            Self::Clear,
            Self::On,
            Self::Enter,
            Self::Negate,
            Self::Square,
            Self::Reciprocal,
            Self::OpenParen,
            Self::CloseParen,
            Self::Decimal,
        ];
        keys.extend(UnaryFunction::ALL.into_iter().map(Self::Function));
        keys.extend(Operation::ALL.into_iter().map(Self::Operator));
        keys
    }

    /// Creates a digit key
    ///
    /// Returns `None` for values above 9.
    #[must_use]
    pub fn digit(d: u8) -> Option<Self> {
        char::from_digit(u32::from(d), 10).map(|c| Self::Number(c.to_string()))
    }

    /// Parses a key identifier
    ///
    /// Unrecognised tokens return `None` unless they are a numeric literal,
    /// in which case they become [`Key::Number`].
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let key = match token {
            "clear" => Self::Clear,
            "del" => Self::Delete,
            "enter" => Self::Enter,
            NEGATE_TOKEN | "(-)" => Self::Negate,
            SQUARE_TOKEN | "x^2" => Self::Square,
            RECIPROCAL_TOKEN | "x^-1" => Self::Reciprocal,
            "(" => Self::OpenParen,
            ")" => Self::CloseParen,
            "." => Self::Decimal,
            "2nd" => Self::Second,
            "alpha" => Self::Alpha,
            "on" => Self::On,
            "mode" => Self::Mode,
            other => {
                if let Some(op) = Operation::from_token(other) {
                    Self::Operator(op)
                } else if let Some(f) = UnaryFunction::from_token(other) {
                    Self::Function(f)
                } else if is_numeric_literal(other) {
                    Self::Number(other.to_string())
                } else {
                    return None;
                }
            }
        };
        Some(key)
    }

    /// Returns the canonical key identifier
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Number(n) => n,
            Self::Operator(op) => op.token(),
            Self::Clear => "clear",
            Self::Delete => "del",
            Self::Enter => "enter",
            Self::Negate => NEGATE_TOKEN,
            Self::Function(f) => f.name(),
            Self::Square => SQUARE_TOKEN,
            Self::Reciprocal => RECIPROCAL_TOKEN,
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::Decimal => ".",
            Self::Second => "2nd",
            Self::Alpha => "alpha",
            Self::On => "on",
            Self::Mode => "mode",
        }
    }

    /// Returns the label printed on the physical key
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Operator(Operation::Multiply) => "\u{d7}".to_string(),
            Self::Operator(Operation::Divide) => "\u{f7}".to_string(),
            Self::Operator(Operation::Subtract) => "\u{2212}".to_string(),
            Self::Clear => "CLEAR".to_string(),
            Self::Delete => "DEL".to_string(),
            Self::Enter => "ENTER".to_string(),
            Self::Function(f) => f.name().to_uppercase(),
            Self::Mode => "MODE".to_string(),
            Self::Alpha => "ALPHA".to_string(),
            Self::On => "ON".to_string(),
            Self::Reciprocal => "x\u{207b}\u{b9}".to_string(),
            other => other.token().to_string(),
        }
    }

    /// Returns the text appended to the entry line, if this is an entry key
    #[must_use]
    pub fn entry_text(&self) -> Option<&str> {
        match self {
            Self::Number(n) => Some(n),
            Self::OpenParen => Some("("),
            Self::CloseParen => Some(")"),
            Self::Decimal => Some("."),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Key {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CalcError::UnknownKey(s.to_string()))
    }
}

impl TryFrom<String> for Key {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.token().to_string()
    }
}

/// Returns true if `token` is a plain numeric literal
///
/// Accepts `[+-]?(D+[.D*]|.D+)([eE][+-]?D+)?`.
#[must_use]
pub fn is_numeric_literal(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut i = 0;

    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_digits = count_digits(i);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        frac_digits = count_digits(i);
        i += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_digits = count_digits(i);
        if exp_digits == 0 {
            return false;
        }
        i += exp_digits;
    }

    i == bytes.len()
}

/// A whitespace-separated script of key identifiers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeySequence {
    keys: Vec<Key>,
}

impl KeySequence {
    /// Creates a sequence from keys
    #[must_use]
    pub fn new(keys: Vec<Key>) -> Self {
        Self { keys }
    }

    /// Parses a script such as `"5 + 3 enter"`
    ///
    /// Fails on the first token that is not a key identifier.
    pub fn parse(script: &str) -> CalcResult<Self> {
        Self::from_tokens(script.split_whitespace())
    }

    /// Parses pre-split tokens
    pub fn from_tokens<I, S>(tokens: I) -> CalcResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = tokens
            .into_iter()
            .map(|t| t.as_ref().parse())
            .collect::<CalcResult<Vec<Key>>>()?;
        Ok(Self { keys })
    }

    /// Returns the keys
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Returns the number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the sequence is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl IntoIterator for KeySequence {
    type Item = Key;
    type IntoIter = std::vec::IntoIter<Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}
