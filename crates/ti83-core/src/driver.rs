//! Calculator drivers
//!
//! One behavioural test written against [`CalculatorDriver`] runs on the
//! headless display and on the mock DOM page alike.

use crate::clock::ManualClock;
use crate::config::CalculatorConfig;
use crate::controller::{ControllerSnapshot, KeypadController};
use crate::display::MemoryDisplay;
use crate::dom::MockDom;
use crate::haptics::RecordingHaptics;
use crate::keypad::Keypad;

/// Abstract driver for keypad interactions
///
/// # Example
///
/// ```rust
/// use ti83_core::driver::{CalculatorDriver, DomDriver, HeadlessDriver};
///
/// fn chained_addition<D: CalculatorDriver>(driver: &mut D) {
///     driver.press_all("5 + 3 + 2 enter");
///     assert_eq!(driver.display_text(), "10");
/// }
///
/// chained_addition(&mut HeadlessDriver::new());
/// chained_addition(&mut DomDriver::new());
/// ```
pub trait CalculatorDriver {
    /// Presses one key by identifier
    fn press(&mut self, key_id: &str);

    /// Presses every whitespace-separated key in `script`
    fn press_all(&mut self, script: &str) {
        for key_id in script.split_whitespace() {
            self.press(key_id);
        }
    }

    /// Text on the primary display
    fn display_text(&self) -> String;

    /// Text on the history strip
    fn history_text(&self) -> String;

    /// Advances time and fires due restores
    fn advance(&mut self, ms: u64);

    /// Serializable view of the calculator
    fn snapshot(&self) -> ControllerSnapshot;
}

/// Headless controller
pub type HeadlessController = KeypadController<MemoryDisplay, RecordingHaptics, ManualClock>;

/// Driver over an in-memory display and a manual clock
#[derive(Debug)]
pub struct HeadlessDriver {
    controller: HeadlessController,
    clock: ManualClock,
}

impl Default for HeadlessDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDriver {
    /// Creates a driver with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a driver with a configuration
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        let clock = ManualClock::new();
        let controller = KeypadController::with_config(
            MemoryDisplay::new(),
            RecordingHaptics::new(),
            clock.clone(),
            config,
        );
        Self { controller, clock }
    }

    /// Returns a reference to the controller
    #[must_use]
    pub fn controller(&self) -> &HeadlessController {
        &self.controller
    }

    /// Returns a mutable reference to the controller
    pub fn controller_mut(&mut self) -> &mut HeadlessController {
        &mut self.controller
    }

    /// Returns the shared clock
    #[must_use]
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }
}

impl CalculatorDriver for HeadlessDriver {
    fn press(&mut self, key_id: &str) {
        self.controller.handle_key_press(key_id);
    }

    fn display_text(&self) -> String {
        self.controller.display().primary().to_string()
    }

    fn history_text(&self) -> String {
        self.controller.display().history().to_string()
    }

    fn advance(&mut self, ms: u64) {
        self.clock.advance_ms(ms);
        self.controller.tick();
    }

    fn snapshot(&self) -> ControllerSnapshot {
        self.controller.snapshot()
    }
}

/// Controller rendering into the mock page
pub type DomController = KeypadController<MockDom, RecordingHaptics, ManualClock>;

/// Driver that clicks buttons on the mock page
#[derive(Debug)]
pub struct DomDriver {
    controller: DomController,
    clock: ManualClock,
}

impl Default for DomDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl DomDriver {
    /// Creates a driver over the TI-83 page
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a driver with a configuration
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        let clock = ManualClock::new();
        let dom = MockDom::calculator(&Keypad::ti83());
        let controller =
            KeypadController::with_config(dom, RecordingHaptics::new(), clock.clone(), config);
        Self { controller, clock }
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        self.controller.display()
    }

    /// Returns a reference to the controller
    #[must_use]
    pub fn controller(&self) -> &DomController {
        &self.controller
    }

    /// Clicks an element by ID
    ///
    /// Clicks on anything but a `.key` button reach the page but not the
    /// calculator.
    pub fn click(&mut self, element_id: &str) {
        if let Some(key_id) = self.controller.display_mut().click(element_id) {
            self.controller.handle_key_press(&key_id);
        }
    }
}

impl CalculatorDriver for DomDriver {
    /// Clicks the button carrying `key_id`
    ///
    /// Tokens without a button, such as multi-digit literals, are handed to
    /// the controller the way a script on the page would.
    fn press(&mut self, key_id: &str) {
        let button = self
            .controller
            .display()
            .find_key_button(key_id)
            .map(|b| b.id.clone());
        match button {
            Some(id) => self.click(&id),
            None => self.controller.handle_key_press(key_id),
        }
    }

    fn display_text(&self) -> String {
        self.dom().display_text().to_string()
    }

    fn history_text(&self) -> String {
        self.dom().history_text().to_string()
    }

    fn advance(&mut self, ms: u64) {
        self.clock.advance_ms(ms);
        self.controller.tick();
    }

    fn snapshot(&self) -> ControllerSnapshot {
        self.controller.snapshot()
    }
}
