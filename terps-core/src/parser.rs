//! Line parsing for the interpreter.
//!
//! Splits an input line into a command name and an argument string:
//!
//! - `quit` -> `("quit", "")`
//! - `greet   world ` -> `("greet", "world")`
//! - `? alias` -> `("help", "alias")`
//! - `!ls -l` -> `("shell", "ls -l")` when a `shell` command is registered
//!
//! Command names are runs of identifier characters (`[A-Za-z0-9_]`).

/// Name of the built-in help command, the target of the `?` shorthand.
pub const HELP_COMMAND: &str = "help";

/// Name of the shell passthrough command, the target of the `!` shorthand.
pub const SHELL_COMMAND: &str = "shell";

/// Whether `c` may appear in a command or alias name.
pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether `name` is a non-empty run of identifier characters.
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_ident_char)
}

/// A line split into its command and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Command name, `None` when the line does not start with one.
    pub command: Option<String>,
    /// Everything after the command name, trimmed.
    pub args: String,
    /// The whole line, trimmed and with shorthands expanded.
    pub line: String,
}

impl ParsedLine {
    fn without_command(line: String) -> Self {
        Self {
            command: None,
            args: String::new(),
            line,
        }
    }
}

/// Parse `line` into `(command, args, line)`.
///
/// `shell_available` enables the `!` shorthand; without it a `!` line names
/// no command.
pub fn parse_line(line: &str, shell_available: bool) -> ParsedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ParsedLine::without_command(String::new());
    }

    let line = if let Some(rest) = trimmed.strip_prefix('?') {
        format!("{HELP_COMMAND} {rest}")
    } else if let Some(rest) = trimmed.strip_prefix('!') {
        if !shell_available {
            return ParsedLine::without_command(trimmed.to_string());
        }
        format!("{SHELL_COMMAND} {rest}")
    } else {
        trimmed.to_string()
    };

    let end = line
        .find(|c: char| !is_ident_char(c))
        .unwrap_or(line.len());
    if end == 0 {
        return ParsedLine::without_command(line);
    }

    ParsedLine {
        command: Some(line[..end].to_string()),
        args: line[end..].trim().to_string(),
        line,
    }
}
