//! The demo shell: commands, completers and help topics on top of the
//! terps-core interpreter.

use std::fs;
use std::path::{Path, PathBuf};

use terps_core::{CommandError, Interpreter, InterpreterConfig, Signal, register_shell};

/// Banner shown at the start of an interactive session.
pub const INTRO: &str = "terps demo shell. Type help or ? to list commands.";

/// Cache key for the workspace file listing.
const FILES_KEY: &str = "files";

/// Cache key for the greeting roster.
const GREET_KEY: &str = "greet";

const ROSTER: &[&str] = &["alice", "bob", "carol", "dave", "erin", "frank"];

/// Build the demo interpreter rooted at `workspace`.
pub fn build_interpreter(
    config: InterpreterConfig,
    workspace: &Path,
) -> terps_core::Result<Interpreter> {
    let mut interp = Interpreter::new(config)?;

    let root = workspace.to_path_buf();
    interp.set_completion_source(move |key| match key {
        GREET_KEY => ROSTER.iter().map(|name| name.to_string()).collect(),
        FILES_KEY => list_files(&root),
        _ => Vec::new(),
    });

    interp.register_command("echo", Some("Print the arguments."), |interp, args| {
        interp.write_line(args)?;
        Ok(Signal::Continue)
    })?;

    interp.register_command(
        "greet",
        Some("Greet someone by name.\n\n    Usage: greet [name]"),
        |interp, args| {
            let name = if args.is_empty() { "stranger" } else { args };
            interp.write_line(&format!("Hello, {name}!"))?;
            Ok(Signal::Continue)
        },
    )?;
    interp.register_completer("greet", |interp, req| {
        interp.cached_completion(GREET_KEY, req.text, req.line)
    })?;

    let root = workspace.to_path_buf();
    interp.register_command(
        "show",
        Some("Print a file from the workspace.\n\n    Usage: show <file>"),
        move |interp, args| show_file(interp, &root, args),
    )?;
    interp.register_completer("show", |interp, req| {
        interp.cached_completion(FILES_KEY, req.text, req.line)
    })?;

    interp.register_command(
        "rehash",
        Some("Forget cached completions so they are rebuilt on next use."),
        |interp, args| {
            let key = args.split_whitespace().next();
            interp.clear_completion_cache(key);
            Ok(Signal::Continue)
        },
    )?;

    interp.register_command("version", None, |interp, _| {
        interp.write_line(concat!("terps ", env!("CARGO_PKG_VERSION")))?;
        Ok(Signal::Continue)
    })?;

    interp.register_command("quit", Some("Leave the shell."), |interp, _| {
        interp.write_line("Goodbye!")?;
        Ok(Signal::Stop)
    })?;

    register_shell(&mut interp)?;

    interp.register_help_topic("aliases", |interp| {
        interp.write_line(
            "Aliases are alternate names for commands.\n\
             \"alias q quit\" binds q, \"alias q\" removes it and \"alias\" lists them.",
        )?;
        Ok(())
    })?;

    if let Err(e) = interp.define_alias("q", "quit") {
        tracing::warn!("Could not bind the quit alias: {}", e);
    }

    Ok(interp)
}

fn show_file(interp: &mut Interpreter, root: &Path, args: &str) -> Result<Signal, CommandError> {
    let name = args.trim();
    if name.is_empty() {
        return Err(CommandError::InvalidArguments {
            command: "show".into(),
            reason: "expected a file name".into(),
        });
    }
    let path: PathBuf = root.join(name);
    let contents = fs::read_to_string(&path).map_err(|e| CommandError::Failed {
        command: "show".into(),
        message: format!("{}: {}", path.display(), e),
    })?;
    interp.write_line(contents.trim_end())?;
    Ok(Signal::Continue)
}

/// Regular files directly under `root`, by name.
fn list_files(root: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(root) else {
        tracing::debug!(root = %root.display(), "Workspace is not readable");
        return Vec::new();
    };
    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect()
}
