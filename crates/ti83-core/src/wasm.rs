//! Browser bindings
//!
//! The page wires each `.key` button's click to
//! [`BrowserCalculator::handle_key_press`] with the button's `data-key`, and
//! schedules [`BrowserCalculator::tick`] after
//! [`BrowserCalculator::pending_restore_ms`] whenever it returns a value.

use wasm_bindgen::prelude::*;
use web_sys::{console, Element};

use crate::clock::Clock;
use crate::config::CalculatorConfig;
use crate::controller::KeypadController;
use crate::display::DisplaySink;
use crate::dom::{DISPLAY_ID, HISTORY_ID};
use crate::haptics::Haptics;
use crate::keypad::Keypad;
use std::time::Duration;

/// `#display` and `#history` on the live page
#[derive(Debug)]
pub struct PageDisplay {
    display: Element,
    history: Element,
}

impl PageDisplay {
    /// Looks up both surfaces in the current document
    pub fn from_document() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let find = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
        };
        Ok(Self {
            display: find(DISPLAY_ID)?,
            history: find(HISTORY_ID)?,
        })
    }
}

impl DisplaySink for PageDisplay {
    fn show_primary(&mut self, text: &str) {
        self.display.set_text_content(Some(text));
    }

    fn show_history(&mut self, text: &str) {
        self.history.set_text_content(Some(text));
    }
}

/// `navigator.vibrate`, where the platform has it
#[derive(Debug, Default, Clone, Copy)]
pub struct NavigatorHaptics;

impl Haptics for NavigatorHaptics {
    fn pulse(&mut self, duration: Duration) {
        if let Some(window) = web_sys::window() {
            let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
            let _ = window.navigator().vibrate_with_duration(ms);
        }
    }
}

/// `Date.now()` in milliseconds
#[derive(Debug, Default, Clone, Copy)]
pub struct DateClock;

impl Clock for DateClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

/// Browser Calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    controller: KeypadController<PageDisplay, NavigatorHaptics, DateClock>,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Attaches a calculator to the page's display elements
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<BrowserCalculator, JsValue> {
        console_error_panic_hook::set_once();
        let display = PageDisplay::from_document()?;
        Ok(Self {
            controller: KeypadController::with_config(
                display,
                NavigatorHaptics,
                DateClock,
                CalculatorConfig::default(),
            ),
        })
    }

    /// Handles a `data-key` value
    #[wasm_bindgen(js_name = handleKeyPress)]
    pub fn handle_key_press(&mut self, key: &str) {
        self.controller.handle_key_press(key);
    }

    /// Handles a `KeyboardEvent.key` value, returning false if unmapped
    #[wasm_bindgen(js_name = handleKeyboard)]
    pub fn handle_keyboard(&mut self, name: &str) -> bool {
        match Keypad::key_for_keyboard(name) {
            Some(key) => {
                self.controller.handle_key(key);
                true
            }
            None => false,
        }
    }

    /// Fires a due display restore
    pub fn tick(&mut self) -> bool {
        self.controller.tick()
    }

    /// Milliseconds until the next restore is due
    #[wasm_bindgen(js_name = pendingRestoreMs)]
    pub fn pending_restore_ms(&self) -> Option<f64> {
        let now = self.controller.clock().now_ms();
        self.controller
            .pending_restore_due()
            .map(|due| due.saturating_sub(now) as f64)
    }

    /// Text on the primary display
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.controller.screen().to_string()
    }

    /// Text on the history strip
    #[wasm_bindgen(getter)]
    pub fn history(&self) -> String {
        self.controller.history().to_string()
    }

    /// Controller snapshot as JSON
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.controller.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Initialize the calculator module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"TI-83 keypad initialized".into());
}
