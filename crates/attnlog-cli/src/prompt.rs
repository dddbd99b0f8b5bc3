//! Interactive yes/no confirmation.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Asks `question` on stdout and reads one answer line from stdin.
///
/// Anything other than `y` or `yes` (case-insensitive) is a no, including EOF.
pub fn ask_yes_no(question: &str) -> Result<bool> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    ask_with(question, &mut stdin.lock(), &mut stdout)
}

fn ask_with<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "{} [y/N] ", question).context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
