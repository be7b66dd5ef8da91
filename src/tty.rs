// src/tty.rs
use is_terminal::IsTerminal;

/// True when stdin is attached to a terminal rather than a pipe or file.
/// Used for the startup hint that lcfmt expects logcat piped into it.
pub fn stdin_is_terminal() -> bool {
    std::io::stdin().is_terminal()
}
