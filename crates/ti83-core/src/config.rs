//! Controller configuration

use crate::core::AngleMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default transient-message duration
pub const DEFAULT_MESSAGE_DURATION_MS: u64 = 1500;

/// Default haptic pulse length
pub const DEFAULT_HAPTIC_PULSE_MS: u64 = 10;

/// What happens to a pending display restore when another key arrives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestorePolicy {
    /// A new key press dismisses the message and invalidates the restore
    #[default]
    Guarded,
    /// The restore fires unconditionally and may overwrite newer text
    Legacy,
}

impl RestorePolicy {
    /// Returns the config-file name of the policy
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Guarded => "guarded",
            Self::Legacy => "legacy",
        }
    }
}

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Trigonometric functions take degrees
    pub degree_mode: bool,
    /// How long a mode message stays on screen
    pub message_duration_ms: u64,
    /// Haptic pulse length per key press
    pub haptic_pulse_ms: u64,
    /// Stale-restore handling
    pub restore_policy: RestorePolicy,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            degree_mode: true,
            message_duration_ms: DEFAULT_MESSAGE_DURATION_MS,
            haptic_pulse_ms: DEFAULT_HAPTIC_PULSE_MS,
            restore_policy: RestorePolicy::Guarded,
        }
    }
}

impl CalculatorConfig {
    /// Creates the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial angle convention
    #[must_use]
    pub const fn with_degree_mode(mut self, degree_mode: bool) -> Self {
        self.degree_mode = degree_mode;
        self
    }

    /// Sets the transient-message duration
    #[must_use]
    pub const fn with_message_duration_ms(mut self, ms: u64) -> Self {
        self.message_duration_ms = ms;
        self
    }

    /// Sets the haptic pulse length
    #[must_use]
    pub const fn with_haptic_pulse_ms(mut self, ms: u64) -> Self {
        self.haptic_pulse_ms = ms;
        self
    }

    /// Sets the restore policy
    #[must_use]
    pub const fn with_restore_policy(mut self, policy: RestorePolicy) -> Self {
        self.restore_policy = policy;
        self
    }

    /// Initial angle mode
    #[must_use]
    pub const fn angle_mode(&self) -> AngleMode {
        AngleMode::from_degree_flag(self.degree_mode)
    }

    /// Transient-message duration
    #[must_use]
    pub const fn message_duration(&self) -> Duration {
        Duration::from_millis(self.message_duration_ms)
    }

    /// Haptic pulse duration
    #[must_use]
    pub const fn haptic_pulse(&self) -> Duration {
        Duration::from_millis(self.haptic_pulse_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CalculatorConfig::default();
        assert!(config.degree_mode);
        assert_eq!(config.message_duration(), Duration::from_millis(1500));
        assert_eq!(config.haptic_pulse(), Duration::from_millis(10));
        assert_eq!(config.restore_policy, RestorePolicy::Guarded);
        assert_eq!(config.angle_mode(), AngleMode::Degrees);
    }

    #[test]
    fn test_builder() {
        let config = CalculatorConfig::new()
            .with_degree_mode(false)
            .with_message_duration_ms(200)
            .with_haptic_pulse_ms(0)
            .with_restore_policy(RestorePolicy::Legacy);
        assert_eq!(config.angle_mode(), AngleMode::Radians);
        assert_eq!(config.message_duration_ms, 200);
        assert_eq!(config.haptic_pulse_ms, 0);
        assert_eq!(config.restore_policy, RestorePolicy::Legacy);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CalculatorConfig =
            serde_json::from_str(r#"{"restore_policy":"legacy"}"#).unwrap();
        assert_eq!(config.restore_policy, RestorePolicy::Legacy);
        assert_eq!(config.message_duration_ms, 1500);
        assert!(config.degree_mode);
    }

    #[test]
    fn test_restore_policy_names() {
        assert_eq!(RestorePolicy::Guarded.as_str(), "guarded");
        assert_eq!(RestorePolicy::Legacy.as_str(), "legacy");
        let json = serde_json::to_string(&RestorePolicy::Legacy).unwrap();
        assert_eq!(json, "\"legacy\"");
    }
}
