//! Completion engine: candidate generation for the line editor.
//!
//! Three strategies compose here:
//!
//! - name completion for the command word,
//! - default completion (every command name) when a command has no completer,
//! - cached source completion, where a pluggable source fills a per-key
//!   cache on first use and later queries filter the cached set.
//!
//! The stateful request protocol (recompute on state 0, replay afterwards)
//! lives on [`Interpreter::complete`](crate::Interpreter::complete); this
//! module provides the pieces it is built from.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use tracing::{debug, trace};

use crate::alias::AliasResolver;
use crate::parser::{SHELL_COMMAND, parse_line};
use crate::registry::{CommandLookup, Completer};

/// The line editor's live input state.
///
/// Offsets are byte offsets into [`line_buffer`](LineBuffer::line_buffer)
/// delimiting the word being completed.
pub trait LineBuffer {
    fn line_buffer(&self) -> &str;
    fn begidx(&self) -> usize;
    fn endidx(&self) -> usize;
}

/// A snapshot of an editor buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub buffer: String,
    pub begidx: usize,
    pub endidx: usize,
}

impl EditorState {
    pub fn new(buffer: impl Into<String>, begidx: usize, endidx: usize) -> Self {
        Self {
            buffer: buffer.into(),
            begidx,
            endidx,
        }
    }

    /// Snapshot with the completion word ending at `cursor` and starting
    /// after the nearest whitespace before it.
    pub fn at_cursor(buffer: &str, cursor: usize) -> Self {
        let mut cursor = cursor.min(buffer.len());
        while !buffer.is_char_boundary(cursor) {
            cursor -= 1;
        }
        let begidx = buffer[..cursor]
            .rfind(char::is_whitespace)
            .map(|i| i + buffer[i..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);
        Self::new(buffer, begidx, cursor)
    }

    /// The word being completed.
    pub fn text(&self) -> &str {
        self.buffer.get(self.begidx..self.endidx).unwrap_or_default()
    }
}

impl LineBuffer for EditorState {
    fn line_buffer(&self) -> &str {
        &self.buffer
    }

    fn begidx(&self) -> usize {
        self.begidx
    }

    fn endidx(&self) -> usize {
        self.endidx
    }
}

/// Arguments handed to a completion function.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    /// The word being completed.
    pub text: &'a str,
    /// The line with leading whitespace removed.
    pub line: &'a str,
    /// Start of `text` within `line`.
    pub begidx: usize,
    /// End of `text` within `line`.
    pub endidx: usize,
}

/// A completion source: produces the candidate set for a cache key.
pub type CompletionSource = Box<dyn FnMut(&str) -> Vec<String>>;

/// Per-key cache of completion candidates.
///
/// Entries are filled lazily from the source on the first query for a key
/// and are never invalidated automatically.
pub struct CompletionCache {
    entries: HashMap<String, BTreeSet<String>>,
    source: CompletionSource,
}

impl Default for CompletionCache {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            source: Box::new(|_| Vec::new()),
        }
    }
}

impl fmt::Debug for CompletionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionCache")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl CompletionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the completion source. Already cached keys are kept.
    pub fn set_source<F>(&mut self, source: F)
    where
        F: FnMut(&str) -> Vec<String> + 'static,
    {
        self.source = Box::new(source);
    }

    /// Cached candidates for `key` that start with `text` and do not
    /// already appear in `line`.
    pub fn complete(&mut self, key: &str, text: &str, line: &str) -> Vec<String> {
        if !self.entries.contains_key(key) {
            let candidates: BTreeSet<String> = (self.source)(key).into_iter().collect();
            debug!(key, count = candidates.len(), "Filled completion cache");
            self.entries.insert(key.to_string(), candidates);
        }
        self.entries
            .get(key)
            .map(|set| {
                set.iter()
                    .filter(|c| c.starts_with(text) && !line.contains(c.as_str()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The cached set for `key`, if it has been filled.
    pub fn cached(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(key)
    }

    /// Drop the entry for `key`, or every entry when `key` is `None`.
    pub fn clear(&mut self, key: Option<&str>) {
        match key {
            Some(key) => {
                self.entries.remove(key);
            }
            None => self.entries.clear(),
        }
    }
}

/// Which completion function serves a request.
#[derive(Clone)]
pub enum CompleterChoice {
    /// Complete the command word.
    Names,
    /// Offer every command name.
    Default,
    /// A completer registered for the command (or the alias's target).
    Custom { command: String, completer: Completer },
}

impl fmt::Debug for CompleterChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Names => write!(f, "Names"),
            Self::Default => write!(f, "Default"),
            Self::Custom { command, .. } => write!(f, "Custom({command})"),
        }
    }
}

/// Candidate lists for the current keystroke.
///
/// Filled when the line editor asks for state 0 and replayed for every
/// later state of the same keystroke.
#[derive(Debug, Clone, Default)]
pub struct CompletionState {
    matches: Vec<String>,
}

impl CompletionState {
    pub fn replace(&mut self, matches: Vec<String>) {
        self.matches = matches;
    }

    /// The candidate at `state`, `None` once exhausted.
    pub fn get(&self, state: usize) -> Option<String> {
        self.matches.get(state).cloned()
    }

    pub fn matches(&self) -> &[String] {
        &self.matches
    }
}

/// Stateless candidate generation over the registry and alias table.
pub struct CompletionEngine<'a> {
    commands: &'a dyn CommandLookup,
    aliases: &'a dyn AliasResolver,
    show_alias: bool,
    eof_command: &'a str,
}

impl<'a> CompletionEngine<'a> {
    pub fn new(
        commands: &'a dyn CommandLookup,
        aliases: &'a dyn AliasResolver,
        show_alias: bool,
        eof_command: &'a str,
    ) -> Self {
        Self {
            commands,
            aliases,
            show_alias,
            eof_command,
        }
    }

    /// Documented commands starting with `text`, then (when shown)
    /// aliases starting with `text` whose target is documented.
    pub fn complete_names(&self, text: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .commands
            .command_names()
            .into_iter()
            .filter(|name| *name != self.eof_command)
            .filter(|name| name.starts_with(text) && self.commands.doc(name).is_some())
            .map(str::to_string)
            .collect();

        if self.show_alias {
            names.extend(
                self.aliases
                    .alias_names()
                    .iter()
                    .filter(|alias| alias.starts_with(text) && !self.commands.contains(alias))
                    .filter(|alias| {
                        self.aliases
                            .resolve_alias(alias)
                            .and_then(|target| self.commands.doc(target))
                            .is_some()
                    })
                    .cloned(),
            );
        }
        names
    }

    /// Every command name except the end-of-input command.
    pub fn complete_default(&self, _request: &CompletionRequest<'_>) -> Vec<String> {
        self.commands
            .command_names()
            .into_iter()
            .filter(|name| *name != self.eof_command)
            .map(str::to_string)
            .collect()
    }

    /// Pick the completion function for `line` with the word at `begidx`.
    ///
    /// Offsets are relative to `line`, which has had leading whitespace
    /// removed.
    pub fn select(&self, line: &str, begidx: usize) -> CompleterChoice {
        if begidx == 0 {
            return CompleterChoice::Names;
        }

        let parsed = parse_line(line, self.commands.contains(SHELL_COMMAND));
        let Some(command) = parsed.command else {
            return CompleterChoice::Default;
        };

        if let Some(completer) = self.commands.completer(&command) {
            return CompleterChoice::Custom { command, completer };
        }
        if let Some(target) = self.aliases.resolve_alias(&command)
            && let Some(completer) = self.commands.completer(target)
        {
            trace!(alias = %command, target, "Completing through alias");
            return CompleterChoice::Custom {
                command: target.to_string(),
                completer,
            };
        }
        CompleterChoice::Default
    }
}
