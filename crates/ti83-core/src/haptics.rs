//! Haptic feedback channel
//!
//! Best-effort side channel. Nothing here can affect calculator state.

use std::time::Duration;

/// Vibration output
pub trait Haptics {
    /// Requests a vibration pulse
    fn pulse(&mut self, duration: Duration);
}

impl<T: Haptics + ?Sized> Haptics for &mut T {
    fn pulse(&mut self, duration: Duration) {
        (**self).pulse(duration);
    }
}

impl<T: Haptics + ?Sized> Haptics for Box<T> {
    fn pulse(&mut self, duration: Duration) {
        (**self).pulse(duration);
    }
}

/// Platform without a vibration device
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&mut self, _duration: Duration) {}
}

/// Records requested pulses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingHaptics {
    pulses: Vec<Duration>,
}

impl RecordingHaptics {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pulses requested so far
    #[must_use]
    pub fn pulses(&self) -> &[Duration] {
        &self.pulses
    }

    /// Number of pulses requested
    #[must_use]
    pub fn count(&self) -> usize {
        self.pulses.len()
    }
}

impl Haptics for RecordingHaptics {
    fn pulse(&mut self, duration: Duration) {
        self.pulses.push(duration);
    }
}
