//! Handles all user-facing output for the CLI.
//!
//! Status and warnings go to stderr, coloured only when stderr is a terminal.
//! Generated source and listings go to stdout uncoloured so they can be piped.

use crate::assembler::Unit;
use difference::{Changeset, Difference};
use std::io::Write;
use std::path::Path;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Prints a yellow `warning:` line.
pub fn print_warning(message: &str) {
    print_labelled("warning", Color::Yellow, message);
}

/// Prints a green status line.
pub fn print_status(label: &str, message: &str) {
    print_labelled(label, Color::Green, message);
}

/// Reports the non-fatal problems collected while assembling `unit`.
pub fn report_unit(unit: &Unit) {
    if let Some(err) = &unit.format_error {
        print_warning(&format!("internal error: invalid Rust generated: {err}"));
        print_warning("compile the generated file to analyze the error");
    }
    for ignored in &unit.ignored_options {
        print_warning(&format!(
            "option '{}' of \"{}\" is not asserted",
            ignored.key, ignored.description
        ));
    }
}

pub fn print_written(unit: &Unit, path: &Path) {
    print_status(
        "wrote",
        &format!("{} tests to {}", unit.test_count, path.display()),
    );
}

/// Prints a line diff from `old` to `new` to stderr.
pub fn print_diff(old: &str, new: &str) {
    let mut stderr = StandardStream::stderr(color_choice());
    let changeset = Changeset::new(old, new, "\n");
    for diff in &changeset.diffs {
        let (prefix, color, text) = match diff {
            Difference::Same(x) => (' ', None, x),
            Difference::Add(x) => ('+', Some(Color::Green), x),
            Difference::Rem(x) => ('-', Some(Color::Red), x),
        };
        let _ = stderr.set_color(ColorSpec::new().set_fg(color));
        for line in text.lines() {
            let _ = writeln!(stderr, "{prefix}{line}");
        }
    }
    let _ = stderr.reset();
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn print_labelled(label: &str, color: Color, message: &str) {
    let mut stderr = StandardStream::stderr(color_choice());
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stderr, "{label}:");
    let _ = stderr.reset();
    let _ = writeln!(stderr, " {message}");
}

fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stderr) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
