//! Command registry: explicit registration and lookup of command handlers.
//!
//! Holds the commands an interpreter understands together with their
//! optional doc strings, per-command completers, and dedicated help topics.
//! Names are kept sorted so every listing is stable.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::completion::CompletionRequest;
use crate::error::{CommandError, RegistryError};
use crate::interpreter::Interpreter;
use crate::parser::is_identifier;

/// What a handler asks the loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Signal {
    #[default]
    Continue,
    Stop,
}

/// A command handler: receives the interpreter and the argument string.
pub type Handler = Rc<dyn Fn(&mut Interpreter, &str) -> Result<Signal, CommandError>>;

/// A per-command completion function.
pub type Completer = Rc<dyn Fn(&mut Interpreter, &CompletionRequest<'_>) -> Vec<String>>;

/// A dedicated help provider for one topic.
pub type HelpProvider = Rc<dyn Fn(&mut Interpreter) -> Result<(), CommandError>>;

/// A registered command.
#[derive(Clone)]
pub struct CommandEntry {
    name: String,
    doc: Option<String>,
    handler: Handler,
}

impl CommandEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The doc string, if one was given and it is not blank.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref().filter(|d| !d.trim().is_empty())
    }

    pub fn handler(&self) -> Handler {
        Rc::clone(&self.handler)
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}

/// Read-only view of the commands an interpreter knows about.
pub trait CommandLookup {
    /// All command names, sorted.
    fn command_names(&self) -> Vec<&str>;

    /// The handler bound to `name`.
    fn resolve_command(&self, name: &str) -> Option<Handler>;

    /// The non-blank doc string of `name`.
    fn doc(&self, name: &str) -> Option<&str>;

    fn contains(&self, name: &str) -> bool;

    /// The completer registered for `name`.
    fn completer(&self, name: &str) -> Option<Completer>;

    /// The dedicated help provider for `topic`.
    fn help_topic(&self, topic: &str) -> Option<HelpProvider>;

    /// All help topic names, sorted.
    fn help_topic_names(&self) -> Vec<&str>;
}

/// Registry holding every command with its metadata.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandEntry>,
    completers: HashMap<String, Completer>,
    help_topics: BTreeMap<String, HelpProvider>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, replacing any handler already bound to `name`.
    pub fn register<F>(
        &mut self,
        name: &str,
        doc: Option<&str>,
        handler: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&mut Interpreter, &str) -> Result<Signal, CommandError> + 'static,
    {
        Self::check_name(name)?;
        let replaced = self
            .commands
            .insert(
                name.to_string(),
                CommandEntry {
                    name: name.to_string(),
                    doc: doc.map(str::to_string),
                    handler: Rc::new(handler),
                },
            )
            .is_some();
        debug!(command = name, replaced, "Registered command");
        Ok(())
    }

    /// Remove a command. Returns `true` if it existed.
    pub fn unregister(&mut self, name: &str) -> bool {
        let removed = self.commands.remove(name).is_some();
        if removed {
            debug!(command = name, "Unregistered command");
        }
        removed
    }

    /// Register the completion function used for arguments of `name`.
    pub fn register_completer<F>(&mut self, name: &str, completer: F) -> Result<(), RegistryError>
    where
        F: Fn(&mut Interpreter, &CompletionRequest<'_>) -> Vec<String> + 'static,
    {
        Self::check_name(name)?;
        self.completers.insert(name.to_string(), Rc::new(completer));
        Ok(())
    }

    /// Register a help provider for `topic`. The topic need not be a command.
    pub fn register_help_topic<F>(&mut self, topic: &str, provider: F) -> Result<(), RegistryError>
    where
        F: Fn(&mut Interpreter) -> Result<(), CommandError> + 'static,
    {
        Self::check_name(topic)?;
        self.help_topics.insert(topic.to_string(), Rc::new(provider));
        Ok(())
    }

    /// Look up a command entry.
    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    /// All registered commands, sorted by name.
    pub fn all(&self) -> impl Iterator<Item = &CommandEntry> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn check_name(name: &str) -> Result<(), RegistryError> {
        if is_identifier(name) {
            Ok(())
        } else {
            Err(RegistryError::InvalidName {
                name: name.to_string(),
            })
        }
    }
}

impl CommandLookup for CommandRegistry {
    fn command_names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    fn resolve_command(&self, name: &str) -> Option<Handler> {
        self.commands.get(name).map(CommandEntry::handler)
    }

    fn doc(&self, name: &str) -> Option<&str> {
        self.commands.get(name).and_then(CommandEntry::doc)
    }

    fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    fn completer(&self, name: &str) -> Option<Completer> {
        self.completers.get(name).cloned()
    }

    fn help_topic(&self, topic: &str) -> Option<HelpProvider> {
        self.help_topics.get(topic).cloned()
    }

    fn help_topic_names(&self) -> Vec<&str> {
        self.help_topics.keys().map(String::as_str).collect()
    }
}
