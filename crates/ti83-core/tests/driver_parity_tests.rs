//! Behavioural tests run against every driver
//!
//! Each check is written once against [`CalculatorDriver`] and executed on the
//! headless display and on the mock DOM page.

use proptest::prelude::*;
use ti83_core::prelude::*;

fn both(check: fn(&mut dyn CalculatorDriver)) {
    check(&mut HeadlessDriver::new());
    check(&mut DomDriver::new());
}

// ===== Entry =====

#[test]
fn test_leading_zero_collapse() {
    both(|d| {
        d.press_all("clear 0 5");
        assert_eq!(d.display_text(), "5");
    });
}

#[test]
fn test_delete_never_empty() {
    both(|d| {
        d.press_all("7 del del del");
        assert_eq!(d.display_text(), "0");
    });
}

#[test]
fn test_negate_twice() {
    both(|d| {
        d.press_all("3 . 5 (−)");
        assert_eq!(d.display_text(), "-3.5");
        d.press("(−)");
        assert_eq!(d.display_text(), "3.5");
    });
}

// ===== Arithmetic =====

#[test]
fn test_division() {
    both(|d| {
        d.press_all("1 0 / 2 enter");
        assert_eq!(d.display_text(), "5");
        assert_eq!(d.history_text(), "10 ÷ 2");
    });
}

#[test]
fn test_division_by_zero() {
    both(|d| {
        d.press_all("1 0 / 0 enter");
        assert_eq!(d.display_text(), "Error");
        d.press("4");
        assert_eq!(d.display_text(), "4");
    });
}

#[test]
fn test_chained_operators() {
    both(|d| {
        d.press_all("5 + 3 + 2 enter");
        assert_eq!(d.display_text(), "10");
    });
}

#[test]
fn test_scientific_boundary() {
    both(|d| {
        d.press_all("9 9 9 9 9 9 9 9 9 9 + 1 enter");
        assert_eq!(d.display_text(), "1.000000e+10");
        d.press_all("clear 9 9 9 9 9 9 9 9 9 8 + 1 enter");
        assert_eq!(d.display_text(), "9999999999");
    });
}

#[test]
fn test_reciprocal_of_zero_keeps_history() {
    both(|d| {
        d.press_all("2 x²");
        assert_eq!(d.history_text(), "(2)²");
        d.press_all("clear");
        d.press_all("6 - 6 enter ⁻¹");
        assert_eq!(d.display_text(), "Error");
        assert_eq!(d.history_text(), "6 − 6");
    });
}

#[test]
fn test_functions() {
    both(|d| {
        d.press_all("9 0 sin");
        assert_eq!(d.display_text(), "1");
        assert_eq!(d.history_text(), "sin(90)");
        d.press_all("clear 1 0 0 log");
        assert_eq!(d.display_text(), "2");
    });
}

#[test]
fn test_nested_operand() {
    both(|d| {
        d.press_all("( 2 ) ^ ( 3 ) enter");
        assert_eq!(d.display_text(), "8");
        assert_eq!(d.history_text(), "(2) ^ (3)");
    });
}

// ===== Mode =====

#[test]
fn test_mode_message_and_restore() {
    both(|d| {
        d.press_all("1 2 mode");
        assert_eq!(d.display_text(), "Radian Mode");
        d.advance(1499);
        assert_eq!(d.display_text(), "Radian Mode");
        d.advance(1);
        assert_eq!(d.display_text(), "12");
    });
}

#[test]
fn test_radian_mode_trig() {
    both(|d| {
        d.press_all("mode");
        d.advance(1500);
        d.press_all("0 cos");
        assert_eq!(d.display_text(), "1");
        assert!(!d.snapshot().state.degree_mode());
    });
}

#[test]
fn test_clear_resets_history() {
    both(|d| {
        d.press_all("4 + 4 enter");
        assert_eq!(d.history_text(), "4 + 4");
        d.press("on");
        assert_eq!(d.history_text(), "");
        assert_eq!(d.display_text(), "0");
    });
}

// ===== Parity =====

fn button_token_strategy() -> impl Strategy<Value = String> {
    let tokens: Vec<String> = Keypad::ti83()
        .buttons()
        .iter()
        .map(|b| b.key.token().to_string())
        .collect();
    proptest::sample::select(tokens)
}

proptest! {
    /// Clicking buttons on the page matches dispatching tokens directly
    #[test]
    fn prop_headless_and_dom_agree(
        steps in prop::collection::vec((button_token_strategy(), 0u64..2000), 0..30),
    ) {
        let mut headless = HeadlessDriver::new();
        let mut dom = DomDriver::new();
        for (token, wait) in &steps {
            headless.press(token);
            dom.press(token);
            headless.advance(*wait);
            dom.advance(*wait);
            prop_assert_eq!(headless.display_text(), dom.display_text());
            prop_assert_eq!(headless.history_text(), dom.history_text());
        }
        prop_assert_eq!(headless.snapshot(), dom.snapshot());
    }
}
