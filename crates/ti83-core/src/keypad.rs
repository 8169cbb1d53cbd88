//! TI-83 keypad layout
//!
//! Layout:
//! ```text
//! [ 2nd ] [ MODE ] [ DEL ]
//! [ALPHA] [  ON  ] [CLEAR]
//! [ x⁻¹ ] [  x²  ] [ SIN ] [ COS ] [ TAN ]
//! [ LOG ] [  LN  ] [  (  ] [  )  ] [  ^  ]
//! [  7  ] [  8   ] [  9  ] [  ÷  ]
//! [  4  ] [  5   ] [  6  ] [  ×  ]
//! [  1  ] [  2   ] [  3  ] [  −  ]
//! [  0  ] [  .   ] [ (−) ] [  +  ]
//! [ENTER]
//! ```

use crate::core::{Operation, UnaryFunction};
use crate::dom::{DomElement, DATA_KEY, KEY_CLASS};
use crate::keys::Key;

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The key this button sends
    pub key: Key,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    /// Creates a new button definition
    #[must_use]
    pub fn new(key: Key, row: usize, col: usize) -> Self {
        let id = format!("key-{}", element_slug(&key));
        Self { key, id, row, col }
    }

    /// Label printed on the button
    #[must_use]
    pub fn label(&self) -> String {
        self.key.label()
    }
}

/// Returns an ID-safe name for a key
fn element_slug(key: &Key) -> String {
    let slug = match key {
        Key::Number(n) => return n.clone(),
        Key::Operator(Operation::Add) => "plus",
        Key::Operator(Operation::Subtract) => "minus",
        Key::Operator(Operation::Multiply) => "times",
        Key::Operator(Operation::Divide) => "divide",
        Key::Operator(Operation::Power) => "power",
        Key::Function(f) => f.name(),
        Key::Clear => "clear",
        Key::Delete => "del",
        Key::Enter => "enter",
        Key::Negate => "negate",
        Key::Square => "square",
        Key::Reciprocal => "reciprocal",
        Key::OpenParen => "open-paren",
        Key::CloseParen => "close-paren",
        Key::Decimal => "decimal",
        Key::Second => "second",
        Key::Alpha => "alpha",
        Key::On => "on",
        Key::Mode => "mode",
    };
    slug.to_string()
}

/// Keypad layout
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::ti83()
    }
}

impl Keypad {
    /// Creates the TI-83 keypad
    #[must_use]
    pub fn ti83() -> Self {
        let digit = |d: u8| Key::Number(d.to_string());
        let rows: Vec<Vec<Key>> = vec![
            vec![Key::Second, Key::Mode, Key::Delete],
            vec![Key::Alpha, Key::On, Key::Clear],
            vec![
                Key::Reciprocal,
                Key::Square,
                Key::Function(UnaryFunction::Sin),
                Key::Function(UnaryFunction::Cos),
                Key::Function(UnaryFunction::Tan),
            ],
            vec![
                Key::Function(UnaryFunction::Log),
                Key::Function(UnaryFunction::Ln),
                Key::OpenParen,
                Key::CloseParen,
                Key::Operator(Operation::Power),
            ],
            vec![digit(7), digit(8), digit(9), Key::Operator(Operation::Divide)],
            vec![digit(4), digit(5), digit(6), Key::Operator(Operation::Multiply)],
            vec![digit(1), digit(2), digit(3), Key::Operator(Operation::Subtract)],
            vec![digit(0), Key::Decimal, Key::Negate, Key::Operator(Operation::Add)],
            vec![Key::Enter],
        ];
        Self::from_rows(rows)
    }

    /// Creates a keypad from rows of keys
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Key>>) -> Self {
        let buttons = rows
            .into_iter()
            .enumerate()
            .flat_map(|(row, keys)| {
                keys.into_iter()
                    .enumerate()
                    .map(move |(col, key)| KeypadButton::new(key, row, col))
            })
            .collect();
        Self { buttons }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Number of rows
    #[must_use]
    pub fn rows(&self) -> usize {
        self.buttons.iter().map(|b| b.row + 1).max().unwrap_or(0)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Buttons on one row, left to right
    pub fn row(&self, row: usize) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter().filter(move |b| b.row == row)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button that sends `key`
    #[must_use]
    pub fn find_button(&self, key: &Key) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| &b.key == key)
    }

    /// Maps a clicked element to the key it sends
    #[must_use]
    pub fn key_for_element(&self, element_id: &str) -> Option<&Key> {
        self.find_button_by_id(element_id).map(|b| &b.key)
    }

    /// Creates `.key` button elements for every key
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons
            .iter()
            .map(|btn| {
                DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&btn.label())
                    .with_class(KEY_CLASS)
                    .with_class(&format!("key-row-{}", btn.row))
                    .with_attr(DATA_KEY, btn.key.token())
            })
            .collect()
    }

    /// Maps a physical keyboard key name onto a keypad key
    #[must_use]
    pub fn key_for_keyboard(name: &str) -> Option<Key> {
        let key = match name {
            "Enter" | "=" => Key::Enter,
            "Backspace" | "Delete" => Key::Delete,
            "Escape" => Key::Clear,
            "(" => Key::OpenParen,
            ")" => Key::CloseParen,
            "." => Key::Decimal,
            "~" | "n" => Key::Negate,
            "q" => Key::Square,
            "r" => Key::Reciprocal,
            "s" => Key::Function(UnaryFunction::Sin),
            "c" => Key::Function(UnaryFunction::Cos),
            "t" => Key::Function(UnaryFunction::Tan),
            "g" => Key::Function(UnaryFunction::Log),
            "l" => Key::Function(UnaryFunction::Ln),
            "m" => Key::Mode,
            "a" => Key::Alpha,
            "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" => {
                Key::Number(name.to_string())
            }
            other => return Operation::from_token(other).map(Key::Operator),
        };
        Some(key)
    }

    /// Keyboard shortcuts, for help output
    #[must_use]
    pub fn keyboard_shortcuts() -> &'static [(&'static str, &'static str)] {
        &[
            ("0-9 . ( )", "entry"),
            ("+ - * / ^", "operators"),
            ("Enter, =", "enter"),
            ("Backspace", "del"),
            ("Escape", "clear"),
            ("n, ~", "(\u{2212})"),
            ("q", "x\u{b2}"),
            ("r", "\u{207b}\u{b9}"),
            ("s c t", "sin cos tan"),
            ("g l", "log ln"),
            ("m", "mode"),
            ("a", "alpha"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== KeypadButton tests =====

    #[test]
    fn test_button_ids() {
        assert_eq!(KeypadButton::new(Key::Number("5".into()), 0, 0).id, "key-5");
        assert_eq!(
            KeypadButton::new(Key::Operator(Operation::Add), 0, 0).id,
            "key-plus"
        );
        assert_eq!(KeypadButton::new(Key::Negate, 0, 0).id, "key-negate");
        assert_eq!(
            KeypadButton::new(Key::Function(UnaryFunction::Ln), 0, 0).id,
            "key-ln"
        );
    }

    #[test]
    fn test_button_label() {
        let btn = KeypadButton::new(Key::Enter, 8, 0);
        assert_eq!(btn.label(), "ENTER");
    }

    // ===== Keypad layout tests =====

    #[test]
    fn test_ti83_covers_every_key() {
        let keypad = Keypad::ti83();
        for key in Key::named_keys() {
            assert!(keypad.find_button(&key).is_some(), "missing {key:?}");
        }
        for d in 0..=9u8 {
            assert!(keypad.find_button(&Key::digit(d).unwrap()).is_some());
        }
        assert_eq!(keypad.button_count(), Key::named_keys().len() + 10);
    }

    #[test]
    fn test_ti83_ids_unique() {
        let keypad = Keypad::ti83();
        let ids: std::collections::HashSet<_> = keypad.buttons().iter().map(|b| &b.id).collect();
        assert_eq!(ids.len(), keypad.button_count());
    }

    #[test]
    fn test_ti83_dimensions() {
        let keypad = Keypad::ti83();
        assert_eq!(keypad.rows(), 9);
        assert_eq!(keypad.row(2).count(), 5);
        assert_eq!(keypad.row(8).count(), 1);
    }

    #[test]
    fn test_get_button_at() {
        let keypad = Keypad::ti83();
        assert_eq!(keypad.get_button_at(0, 0).unwrap().key, Key::Second);
        assert_eq!(keypad.get_button_at(8, 0).unwrap().key, Key::Enter);
        assert!(keypad.get_button_at(0, 4).is_none());
    }

    #[test]
    fn test_key_for_element() {
        let keypad = Keypad::ti83();
        assert_eq!(keypad.key_for_element("key-square"), Some(&Key::Square));
        assert_eq!(keypad.key_for_element("display"), None);
    }

    #[test]
    fn test_create_dom_elements() {
        let keypad = Keypad::ti83();
        let elements = keypad.create_dom_elements();
        let negate = elements.iter().find(|e| e.id == "key-negate").unwrap();
        assert_eq!(negate.data_key(), Some("(−)"));
        assert_eq!(negate.text_content, "(−)");
        assert!(negate.has_class(KEY_CLASS));
        assert!(negate.has_class("key-row-7"));
    }

    #[test]
    fn test_empty_keypad() {
        let keypad = Keypad::from_rows(Vec::new());
        assert_eq!(keypad.rows(), 0);
        assert_eq!(keypad.button_count(), 0);
    }

    // ===== Keyboard mapping tests =====

    #[test]
    fn test_key_for_keyboard() {
        assert_eq!(Keypad::key_for_keyboard("Enter"), Some(Key::Enter));
        assert_eq!(Keypad::key_for_keyboard("="), Some(Key::Enter));
        assert_eq!(Keypad::key_for_keyboard("Backspace"), Some(Key::Delete));
        assert_eq!(Keypad::key_for_keyboard("Escape"), Some(Key::Clear));
        assert_eq!(Keypad::key_for_keyboard("7"), Key::digit(7));
        assert_eq!(
            Keypad::key_for_keyboard("^"),
            Some(Key::Operator(Operation::Power))
        );
        assert_eq!(
            Keypad::key_for_keyboard("s"),
            Some(Key::Function(UnaryFunction::Sin))
        );
        assert_eq!(Keypad::key_for_keyboard("F1"), None);
    }

    #[test]
    fn test_keyboard_shortcuts_listed() {
        assert!(Keypad::keyboard_shortcuts()
            .iter()
            .any(|(keys, _)| *keys == "Escape"));
    }
}
