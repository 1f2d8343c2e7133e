//! Labeled terminal output for both release tools.
//!
//! Status and success lines go to stdout, failures to stderr, so the
//! tools compose with shell pipelines and CI log capture. Labels are
//! colored only when the stream is a terminal; plain text otherwise.
//! Writer-injecting variants exist so tests can capture output.

use console::{Color, Term, style};
use std::io::{self, Write};

fn stdout_is_tty() -> bool {
    Term::stdout().is_term()
}

fn stderr_is_tty() -> bool {
    Term::stderr().is_term()
}

fn format_label(label: &str, color: Color, is_tty: bool) -> String {
    if is_tty {
        style(label).bold().fg(color).to_string()
    } else {
        label.to_string()
    }
}

fn write_labeled(
    label: &str,
    color: Color,
    msg: &str,
    w: &mut dyn Write,
    is_tty: bool,
) -> io::Result<()> {
    let label = format_label(label, color, is_tty);
    if msg.is_empty() {
        writeln!(w, "{label}")
    } else {
        writeln!(w, "{label} {msg}")
    }
}

pub fn success_to_with_tty(w: &mut dyn Write, label: &str, msg: &str, is_tty: bool) {
    let _ = write_labeled(label, Color::Green, msg, w, is_tty);
}

pub fn fail_to_with_tty(w: &mut dyn Write, label: &str, msg: &str, is_tty: bool) {
    let _ = write_labeled(label, Color::Red, msg, w, is_tty);
}

pub fn detail_to_with_tty(w: &mut dyn Write, msg: &str, is_tty: bool) {
    let line = if is_tty {
        style(format!("  {msg}")).dim().to_string()
    } else {
        format!("  {msg}")
    };
    let _ = writeln!(w, "{line}");
}

/// Green label + message on stdout.
pub fn success(label: &str, msg: &str) {
    success_to_with_tty(&mut io::stdout(), label, msg, stdout_is_tty());
}

/// Red label + message on stderr.
pub fn fail(label: &str, msg: &str) {
    fail_to_with_tty(&mut io::stderr(), label, msg, stderr_is_tty());
}

/// Unlabeled line on stdout.
pub fn status(msg: &str) {
    let _ = writeln!(io::stdout(), "{msg}");
}

/// Dim indented line on stdout, for per-file listings.
pub fn detail(msg: &str) {
    detail_to_with_tty(&mut io::stdout(), msg, stdout_is_tty());
}
