use std::io::{self, BufRead, Write};

/// Host side of the `print` and `input` built-ins.
pub trait Console {
    fn print(&mut self, text: &str);
    /// Reads one line without its line terminator. End of input reads as an
    /// empty string.
    fn input(&mut self) -> String;
}

/// Console backed by the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn print(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", text);
        let _ = stdout.flush();
    }

    fn input(&mut self) -> String {
        let mut line = String::new();
        if let Err(error) = io::stdin().lock().read_line(&mut line) {
            tracing::warn!(%error, "failed to read input");
            return String::new();
        }

        line.trim_end_matches(['\r', '\n']).to_string()
    }
}
