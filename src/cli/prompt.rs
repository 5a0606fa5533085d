//! Typed confirmation gate.

use console::{style, Term};
use std::io::{self, BufRead};

/// Read one line and compare it to `expected`, ignoring surrounding
/// whitespace and ASCII case. End of input counts as "no".
pub fn read_confirmation<R: BufRead>(reader: &mut R, expected: &str) -> io::Result<bool> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(line.trim().eq_ignore_ascii_case(expected))
}

/// Print `question`, show a `> ` prompt and read the answer from stdin
pub fn ask(term: &Term, question: &str, expected: &str) -> io::Result<bool> {
    term.write_line(&format!("{}", style(question).bold()))?;
    term.write_str("> ")?;
    term.flush()?;

    let stdin = io::stdin();
    let confirmed = read_confirmation(&mut stdin.lock(), expected)?;
    if !confirmed {
        tracing::debug!("confirmation declined");
    }
    Ok(confirmed)
}
