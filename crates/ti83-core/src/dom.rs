//! Mock DOM for the calculator page
//!
//! Mirrors the structure the browser page has: a `#display` element, a
//! `#history` element and one `.key` button per keypad key carrying a
//! `data-key` attribute. Lets the controller run against page-shaped output
//! without a browser.

use crate::display::DisplaySink;
use crate::keypad::Keypad;
use std::collections::HashMap;

/// Element ID of the primary display
pub const DISPLAY_ID: &str = "display";
/// Element ID of the history strip
pub const HISTORY_ID: &str = "history";
/// Class shared by every keypad button
pub const KEY_CLASS: &str = "key";
/// Attribute holding a button's key identifier
pub const DATA_KEY: &str = "data-key";

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class once
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// The `data-key` attribute
    #[must_use]
    pub fn data_key(&self) -> Option<&str> {
        self.get_attr(DATA_KEY)
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Physical keyboard event
    KeyDown {
        /// The `KeyboardEvent.key` value
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a key-down event
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }
}

/// Mock DOM for running the calculator without a browser
#[derive(Debug, Default)]
pub struct MockDom {
    elements: HashMap<String, DomElement>,
    /// Element IDs in document order
    order: Vec<String>,
    event_history: Vec<DomEvent>,
}

impl MockDom {
    /// Creates an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the calculator page for a keypad
    #[must_use]
    pub fn calculator(keypad: &Keypad) -> Self {
        let mut dom = Self::new();
        dom.register_element(
            DomElement::new("div")
                .with_id(DISPLAY_ID)
                .with_class("screen")
                .with_text("0"),
        );
        dom.register_element(
            DomElement::new("div")
                .with_id(HISTORY_ID)
                .with_class("history"),
        );
        for element in keypad.create_dom_elements() {
            dom.register_element(element);
        }
        dom
    }

    /// Registers an element for ID lookup
    ///
    /// Elements without an ID are not addressable and are dropped.
    pub fn register_element(&mut self, element: DomElement) {
        if element.id.is_empty() {
            return;
        }
        if !self.elements.contains_key(&element.id) {
            self.order.push(element.id.clone());
        }
        self.elements.insert(element.id.clone(), element);
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Elements carrying a class, in document order
    #[must_use]
    pub fn query_selector_all(&self, class: &str) -> Vec<&DomElement> {
        self.order
            .iter()
            .filter_map(|id| self.elements.get(id))
            .filter(|e| e.has_class(class))
            .collect()
    }

    /// First `.key` button whose `data-key` matches
    #[must_use]
    pub fn find_key_button(&self, key_id: &str) -> Option<&DomElement> {
        self.query_selector_all(KEY_CLASS)
            .into_iter()
            .find(|e| e.data_key() == Some(key_id))
    }

    /// Records an event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Clicks an element, returning its `data-key` if it is a keypad button
    pub fn click(&mut self, element_id: &str) -> Option<String> {
        self.dispatch_event(DomEvent::click(element_id));
        self.elements
            .get(element_id)
            .filter(|e| e.has_class(KEY_CLASS))
            .and_then(DomElement::data_key)
            .map(str::to_string)
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Text of `#display`
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.get_element_text(DISPLAY_ID).unwrap_or_default()
    }

    /// Text of `#history`
    #[must_use]
    pub fn history_text(&self) -> &str {
        self.get_element_text(HISTORY_ID).unwrap_or_default()
    }
}

impl DisplaySink for MockDom {
    fn show_primary(&mut self, text: &str) {
        self.set_element_text(DISPLAY_ID, text);
    }

    fn show_history(&mut self, text: &str) {
        self.set_element_text(HISTORY_ID, text);
    }
}
