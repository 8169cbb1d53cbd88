//! Display sinks
//!
//! Two text surfaces: the primary display, overwritten on every state
//! change, and the history strip.

use serde::{Deserialize, Serialize};

/// Output boundary of the controller
pub trait DisplaySink {
    /// Overwrites the primary display
    fn show_primary(&mut self, text: &str);

    /// Overwrites the history strip
    fn show_history(&mut self, text: &str);
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn show_primary(&mut self, text: &str) {
        (**self).show_primary(text);
    }

    fn show_history(&mut self, text: &str) {
        (**self).show_history(text);
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for Box<T> {
    fn show_primary(&mut self, text: &str) {
        (**self).show_primary(text);
    }

    fn show_history(&mut self, text: &str) {
        (**self).show_history(text);
    }
}

/// Which surface a frame was written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Primary display
    Primary,
    /// History strip
    History,
}

/// One write to a surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Target surface
    pub surface: Surface,
    /// Text written
    pub text: String,
}

/// In-memory display
///
/// [`MemoryDisplay::new`] records every write for assertions;
/// [`MemoryDisplay::latest_only`] keeps just the current text of each surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDisplay {
    primary: String,
    history: String,
    frames: Vec<Frame>,
    latest_only: bool,
}

impl MemoryDisplay {
    /// Creates an empty display that records every write
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty display that keeps no frame log
    #[must_use]
    pub fn latest_only() -> Self {
        Self {
            latest_only: true,
            ..Self::default()
        }
    }

    /// True if writes are appended to the frame log
    #[must_use]
    pub const fn is_recording(&self) -> bool {
        !self.latest_only
    }

    /// Current primary text
    #[must_use]
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Current history text
    #[must_use]
    pub fn history(&self) -> &str {
        &self.history
    }

    /// Every write, oldest first
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Primary texts in write order
    pub fn primary_frames(&self) -> impl Iterator<Item = &str> {
        self.frames
            .iter()
            .filter(|f| f.surface == Surface::Primary)
            .map(|f| f.text.as_str())
    }

    /// Drops the recorded frames, keeping the current text
    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }
}

impl MemoryDisplay {
    fn record(&mut self, surface: Surface, text: &str) {
        if self.latest_only {
            return;
        }
        self.frames.push(Frame {
            surface,
            text: text.to_string(),
        });
    }
}

impl DisplaySink for MemoryDisplay {
    fn show_primary(&mut self, text: &str) {
        self.primary.clear();
        self.primary.push_str(text);
        self.record(Surface::Primary, text);
    }

    fn show_history(&mut self, text: &str) {
        self.history.clear();
        self.history.push_str(text);
        self.record(Surface::History, text);
    }
}
