//! CLI command definitions using clap

use crate::config::ColorChoice;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ti83: a TI-83 keypad emulator for the terminal
#[derive(Parser, Debug)]
#[command(name = "ti83")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Calculator settings file (YAML)
    #[arg(long, global = true, env = "TI83_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a sequence of keys and print the screen
    Run(RunArgs),

    /// Evaluate one operand expression
    Eval(EvalArgs),

    /// Use the keypad from the terminal
    Interactive(InteractiveArgs),

    /// List key identifiers
    Keys,

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Key identifiers, separately or as one quoted script
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Start in radian mode
    #[arg(long)]
    pub radians: bool,

    /// Print the controller snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Let stale mode-message restores overwrite the display
    #[arg(long)]
    pub legacy_restore: bool,

    /// Milliseconds to let pass after the last key
    #[arg(long, value_name = "MS")]
    pub wait: Option<u64>,
}

impl RunArgs {
    /// All keys joined into one script
    #[must_use]
    pub fn script(&self) -> String {
        self.keys.join(" ")
    }
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Expression using numbers, + - * / %, and parentheses
    #[arg(allow_hyphen_values = true)]
    pub expr: String,
}

/// Arguments for the interactive command
#[derive(Parser, Debug)]
pub struct InteractiveArgs {
    /// Start in radian mode
    #[arg(long)]
    pub radians: bool,

    /// Let stale mode-message restores overwrite the display
    #[arg(long)]
    pub legacy_restore: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Print as JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Auto-detect
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
