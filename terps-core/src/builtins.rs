//! Built-in commands: `help`, `alias`, the end-of-input command, and the
//! optional `shell` passthrough.

use std::collections::BTreeSet;
use std::io::Write;
use std::process::Command;

use tracing::debug;

use crate::completion::CompletionRequest;
use crate::error::{CommandError, RegistryError};
use crate::interpreter::Interpreter;
use crate::parser::{HELP_COMMAND, SHELL_COMMAND};
use crate::registry::{CommandLookup, Signal};

/// Name of the alias management command.
pub const ALIAS_COMMAND: &str = "alias";

const HELP_DOC: &str = r#"List available commands with "help" or detailed help with "help cmd"."#;

const ALIAS_DOC: &str = "
    Set/clear aliases.
    If no options are provided, print aliases and their corresponding commands.

    Usage:
      alias [alias] [command]

    Options:
      [alias]: alias to create
      [command]: command to map [alias] to.
                 If blank it will clear the alias for [alias]
    ";

const SHELL_DOC: &str = "execute shell commands";

/// Register `help`, `alias` and the configured end-of-input command.
pub fn register_builtins(interp: &mut Interpreter) -> Result<(), RegistryError> {
    interp.register_command(HELP_COMMAND, Some(HELP_DOC), |interp, arg| {
        interp.help(arg)?;
        Ok(Signal::Continue)
    })?;
    interp.register_completer(HELP_COMMAND, complete_help)?;

    interp.register_command(ALIAS_COMMAND, Some(ALIAS_DOC), alias_command)?;
    interp.register_completer(ALIAS_COMMAND, complete_alias)?;

    let eof = interp.config().eof_command.clone();
    interp.register_command(&eof, None, |_, _| Ok(Signal::Stop))?;
    Ok(())
}

/// Register the `shell` passthrough, which also enables the `!` shorthand.
pub fn register_shell(interp: &mut Interpreter) -> Result<(), RegistryError> {
    interp.register_command(SHELL_COMMAND, Some(SHELL_DOC), shell_command)
}

/// `alias` lists, `alias <name>` deletes, `alias <name> <target>` binds.
fn alias_command(interp: &mut Interpreter, args: &str) -> Result<Signal, CommandError> {
    let mut words = args.split_whitespace();
    match words.next() {
        None => {
            interp.format_aliases(false)?;
        }
        Some(alias) => {
            let target = words.next().unwrap_or_default();
            if let Err(e) = interp.define_alias(alias, target) {
                writeln!(interp.output(), "failed to create alias.\n{e}")?;
            }
        }
    }
    Ok(Signal::Continue)
}

/// Hand the argument string to the host shell, inheriting stdio.
fn shell_command(interp: &mut Interpreter, args: &str) -> Result<Signal, CommandError> {
    if args.trim().is_empty() {
        return Ok(Signal::Continue);
    }
    interp.output().flush()?;

    debug!(command = args, "Running shell command");
    let status = host_shell(args)
        .status()
        .map_err(|e| CommandError::Failed {
            command: SHELL_COMMAND.to_string(),
            message: format!("failed to start the host shell: {e}"),
        })?;
    if !status.success() {
        debug!(%status, "Shell command exited unsuccessfully");
    }
    Ok(Signal::Continue)
}

fn host_shell(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

/// Documented commands plus help topics.
fn complete_help(interp: &mut Interpreter, request: &CompletionRequest<'_>) -> Vec<String> {
    let mut names: BTreeSet<String> = interp.complete_names(request.text).into_iter().collect();
    names.extend(
        interp
            .registry()
            .help_topic_names()
            .into_iter()
            .filter(|topic| topic.starts_with(request.text))
            .map(str::to_string),
    );
    names.into_iter().collect()
}

/// Command and alias names, for either argument of `alias`.
fn complete_alias(interp: &mut Interpreter, request: &CompletionRequest<'_>) -> Vec<String> {
    let eof = interp.config().eof_command.clone();
    interp
        .list_names()
        .into_iter()
        .filter(|name| name.starts_with(request.text) && *name != eof)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::EditorState;
    use crate::config::InterpreterConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl SharedBuf {
        fn take(&self) -> String {
            String::from_utf8(std::mem::take(&mut *self.0.borrow_mut())).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn interp() -> (Interpreter, SharedBuf) {
        let out = SharedBuf::default();
        let mut interp = Interpreter::new(InterpreterConfig::default())
            .unwrap()
            .with_output(out.clone());
        interp
            .register_command("quit", Some("exit"), |_, _| Ok(Signal::Stop))
            .unwrap();
        (interp, out)
    }

    #[test]
    fn test_alias_command_lists() {
        let (mut interp, out) = interp();
        interp.dispatch("alias");
        assert_eq!(out.take(), "a: alias\n");
    }

    #[test]
    fn test_alias_command_create_and_delete() {
        let (mut interp, out) = interp();
        interp.dispatch("alias q quit");
        assert_eq!(interp.dispatch("q"), Signal::Stop);

        interp.dispatch("alias q");
        assert!(!interp.list_aliases().contains("q"));
        assert_eq!(interp.dispatch("q"), Signal::Continue);
        assert_eq!(out.take(), "*** Unknown syntax: q\n");
    }

    #[test]
    fn test_default_alias_runs_alias_command() {
        let (mut interp, out) = interp();
        interp.dispatch("a x quit");
        interp.dispatch("a");
        assert_eq!(out.take(), "a: alias\nx: quit\n");
    }

    #[test]
    fn test_alias_command_reports_failure() {
        let (mut interp, out) = interp();
        interp.dispatch("alias help quit");
        assert_eq!(
            out.take(),
            "failed to create alias.\nAlias 'help' would be shadowed by the command of the same name\n"
        );
        assert_eq!(interp.list_aliases().len(), 1);
    }

    #[test]
    fn test_help_doc_is_trimmed() {
        let (mut interp, out) = interp();
        interp.dispatch("help alias");
        let text = out.take();
        assert!(text.starts_with("Set/clear aliases.\n"));
        assert!(text.contains("\nUsage:\n  alias [alias] [command]\n"));
    }

    #[test]
    fn test_eof_stops() {
        let (mut interp, _) = interp();
        assert_eq!(interp.dispatch("EOF"), Signal::Stop);
    }

    #[test]
    fn test_help_completion_includes_topics() {
        let (mut interp, _) = interp();
        interp.register_help_topic("queue", |_| Ok(())).unwrap();
        let state = EditorState::at_cursor("help q", 6);
        let mut candidates = Vec::new();
        while let Some(c) = interp.complete("q", candidates.len(), &state) {
            candidates.push(c);
        }
        assert_eq!(candidates, vec!["queue", "quit"]);
    }

    #[test]
    fn test_alias_completion_lists_names() {
        let (mut interp, _) = interp();
        let state = EditorState::at_cursor("alias x ", 8);
        let mut candidates = Vec::new();
        while let Some(c) = interp.complete("", candidates.len(), &state) {
            candidates.push(c);
        }
        assert_eq!(candidates, vec!["a", "alias", "help", "quit"]);
    }

    #[test]
    fn test_shell_enables_bang_shorthand() {
        let (mut interp, _) = interp();
        assert!(interp.parse_line("!true").command.is_none());
        register_shell(&mut interp).unwrap();
        assert_eq!(interp.parse_line("!true").command.as_deref(), Some("shell"));
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_runs_host_command() {
        let (mut interp, out) = interp();
        register_shell(&mut interp).unwrap();
        assert_eq!(interp.dispatch("shell true"), Signal::Continue);
        assert_eq!(interp.dispatch("!exit 3"), Signal::Continue);
        assert_eq!(out.take(), "");
    }
}
