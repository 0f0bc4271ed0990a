//! Interactive terminal prompts.

use std::io::{self, Write};

/// Ask a yes/no question on the terminal. Anything other than `y`/`yes`
/// (case-insensitive) — including EOF — is a "no".
pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
