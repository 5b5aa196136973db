use std::io::{self, BufRead, IsTerminal, Write};

/// Read all input from stdin (for piped input)
pub fn read_stdin() -> io::Result<String> {
    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        lines.push(line?);
    }
    Ok(lines.join("\n").trim().to_string())
}

/// Read a single line from stdin, without the trailing newline.
///
/// When stdin is a terminal, `prompt` is written to stderr first.
pub fn read_stdin_line(prompt: &str) -> io::Result<String> {
    if is_stdin_tty() {
        let mut stderr = io::stderr();
        write!(stderr, "{prompt}")?;
        stderr.flush()?;
    }
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Check if stdin is a TTY (interactive)
pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}
