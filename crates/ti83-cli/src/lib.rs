//! ti83 CLI: terminal front end for the TI-83 keypad emulator
//!
//! ## Commands
//!
//! - `run`: press a key script headlessly and print the screen
//! - `eval`: evaluate one operand expression
//! - `interactive`: drive the keypad from the keyboard
//! - `keys`: list key identifiers
//! - `config`: show the effective configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;
pub mod terminal;

pub use commands::{Cli, ColorArg, Commands, ConfigArgs, EvalArgs, InteractiveArgs, RunArgs};
pub use config::{load_calculator_config, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_keys, render_screen, Printer, SCREEN_COLUMNS};
