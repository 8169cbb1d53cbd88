//! Command handlers
//!
//! Each handler returns the lines it would print so the commands can be
//! exercised without a terminal.

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{render_keys, render_screen};
use ti83_core::config::CalculatorConfig;
use ti83_core::controller::ControllerSnapshot;
use ti83_core::core::evaluator::Evaluator;
use ti83_core::core::{format_result, ERROR_SENTINEL};
use ti83_core::driver::{CalculatorDriver, HeadlessDriver};
use ti83_core::keypad::Keypad;
use tracing::{debug, info};

/// Presses `script` on a fresh calculator, then lets `wait_ms` pass
#[must_use]
pub fn run_keys(
    config: CalculatorConfig,
    script: &str,
    wait_ms: Option<u64>,
) -> ControllerSnapshot {
    let mut driver = HeadlessDriver::with_config(config);
    driver.press_all(script);
    if let Some(ms) = wait_ms {
        driver.advance(ms);
    }
    let snapshot = driver.snapshot();
    info!(display = %snapshot.display, history = %snapshot.history, "run finished");
    snapshot
}

/// Formats a run result as a framed screen or JSON
pub fn render_run(
    snapshot: &ControllerSnapshot,
    json: bool,
    use_color: bool,
) -> CliResult<Vec<String>> {
    if json {
        return Ok(vec![serde_json::to_string_pretty(snapshot)?]);
    }
    let mut lines = render_screen(&snapshot.display, &snapshot.history, use_color);
    if let Some(due) = snapshot.pending_restore_ms {
        lines.push(format!("restore pending at {due} ms"));
    }
    Ok(lines)
}

/// Evaluates one operand expression the way the keypad would
///
/// Failures print the error sentinel rather than failing the command.
#[must_use]
pub fn evaluate(expr: &str) -> String {
    match Evaluator::new().evaluate_str(expr) {
        Ok(value) => format_result(value),
        Err(err) => {
            debug!(%err, expr, "expression rejected");
            ERROR_SENTINEL.to_string()
        }
    }
}

/// Key listing
#[must_use]
pub fn keys(use_color: bool) -> Vec<String> {
    render_keys(&Keypad::ti83(), use_color)
}

/// Effective configuration as YAML or JSON
pub fn show_config(config: &CliConfig, json: bool) -> CliResult<Vec<String>> {
    let text = if json {
        serde_json::to_string_pretty(config)?
    } else {
        serde_yaml_ng::to_string(config)?
    };
    Ok(text.lines().map(str::to_string).collect())
}
