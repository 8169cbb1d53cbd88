//! CLI configuration

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use ti83_core::config::{CalculatorConfig, RestorePolicy};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - one log line per key
    Verbose,
    /// Debug - every ignored token and restore
    Debug,
}

impl Verbosity {
    /// Derives the level from `-v` occurrences and `-q`
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::Term::stdout().features().colors_supported(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Settings handed to the controller
    pub calculator: CalculatorConfig,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set the calculator settings
    #[must_use]
    pub const fn with_calculator(mut self, calculator: CalculatorConfig) -> Self {
        self.calculator = calculator;
        self
    }

    /// Calculator settings with per-command flag overrides applied
    #[must_use]
    pub fn calculator_with(&self, radians: bool, legacy_restore: bool) -> CalculatorConfig {
        let mut config = self.calculator.clone();
        if radians {
            config = config.with_degree_mode(false);
        }
        if legacy_restore {
            config = config.with_restore_policy(RestorePolicy::Legacy);
        }
        config
    }
}

/// Loads calculator settings from a YAML file
///
/// Missing keys take their defaults, so an empty file is valid.
pub fn load_calculator_config(path: &Path) -> CliResult<CalculatorConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::config(format!("cannot read {}: {e}", path.display())))?;
    if text.trim().is_empty() {
        return Ok(CalculatorConfig::default());
    }
    Ok(serde_yaml_ng::from_str(&text)?)
}
