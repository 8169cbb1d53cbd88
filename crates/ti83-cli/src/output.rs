//! Output formatting

use crate::error::CliResult;
use console::{pad_str, style, Alignment, Term};
use ti83_core::keypad::Keypad;

/// Columns on the emulated screen
pub const SCREEN_COLUMNS: usize = 16;

/// Draws the two display surfaces as a framed screen
///
/// The history strip sits above the entry line, both right-aligned. Text
/// wider than the screen widens the frame instead of being cut.
#[must_use]
pub fn render_screen(display: &str, history: &str, use_color: bool) -> Vec<String> {
    let width = SCREEN_COLUMNS
        .max(console::measure_text_width(display))
        .max(console::measure_text_width(history));
    let rule = "\u{2500}".repeat(width + 2);

    let history_cell = pad_str(history, width, Alignment::Right, None).into_owned();
    let display_cell = pad_str(display, width, Alignment::Right, None).into_owned();
    let (history_cell, display_cell) = if use_color {
        (
            style(history_cell).dim().to_string(),
            style(display_cell).bold().to_string(),
        )
    } else {
        (history_cell, display_cell)
    };

    vec![
        format!("\u{250c}{rule}\u{2510}"),
        format!("\u{2502} {history_cell} \u{2502}"),
        format!("\u{2502} {display_cell} \u{2502}"),
        format!("\u{2514}{rule}\u{2518}"),
    ]
}

/// Lists every key identifier with its face label and keyboard shortcut
#[must_use]
pub fn render_keys(keypad: &Keypad, use_color: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(keypad.button_count() + 16);
    let heading = |text: &str| {
        if use_color {
            style(text).cyan().bold().to_string()
        } else {
            text.to_string()
        }
    };

    lines.push(heading("Keys"));
    for button in keypad.buttons() {
        lines.push(format!(
            "  {:<8} {:<6} row {} col {}",
            button.key.token(),
            button.label(),
            button.row,
            button.col
        ));
    }

    lines.push(String::new());
    lines.push(heading("Keyboard"));
    for (keys, action) in Keypad::keyboard_shortcuts() {
        lines.push(format!("  {keys:<12} {action}"));
    }
    lines.push("  Ctrl-C       quit".to_string());
    lines
}

/// Writes command output to stdout and notices to stderr
#[derive(Debug)]
pub struct Printer {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl Printer {
    /// Create a new printer
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Prints command output, which quiet mode does not suppress
    pub fn lines(&self, lines: &[String]) -> CliResult<()> {
        for line in lines {
            self.out.write_line(line)?;
        }
        Ok(())
    }

    /// Prints one line of command output
    pub fn line(&self, line: &str) -> CliResult<()> {
        self.out.write_line(line)?;
        Ok(())
    }

    /// Prints a notice on stderr
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("\u{2139}").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Prints an error on stderr, even in quiet mode
    pub fn error(&self, message: &str) {
        let prefix = if self.use_color {
            style("\u{2717}").red().bold().to_string()
        } else {
            "Error:".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }
}
