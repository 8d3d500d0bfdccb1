//! Dispatcher: resolves a command word to the handler that should run.

use std::fmt;

use tracing::debug;

use crate::alias::AliasResolver;
use crate::registry::{CommandLookup, Handler};

/// How a command word resolved.
#[derive(Clone)]
pub enum Resolution {
    /// A registered command.
    Command { name: String, handler: Handler },
    /// An alias whose target command is registered.
    Alias {
        alias: String,
        target: String,
        handler: Handler,
    },
    /// Neither a command nor a live alias.
    Unknown,
}

impl Resolution {
    pub fn handler(&self) -> Option<Handler> {
        match self {
            Self::Command { handler, .. } | Self::Alias { handler, .. } => Some(handler.clone()),
            Self::Unknown => None,
        }
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command { name, .. } => write!(f, "Command({name})"),
            Self::Alias { alias, target, .. } => write!(f, "Alias({alias} -> {target})"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Resolves command words against the registry, then the alias table.
pub struct Dispatcher<'a> {
    commands: &'a dyn CommandLookup,
    aliases: &'a dyn AliasResolver,
}

impl<'a> Dispatcher<'a> {
    pub fn new(commands: &'a dyn CommandLookup, aliases: &'a dyn AliasResolver) -> Self {
        Self { commands, aliases }
    }

    /// Resolve `command`. A real command always shadows an alias of the
    /// same name.
    pub fn resolve(&self, command: &str) -> Resolution {
        if let Some(handler) = self.commands.resolve_command(command) {
            return Resolution::Command {
                name: command.to_string(),
                handler,
            };
        }

        if let Some(target) = self.aliases.resolve_alias(command) {
            if let Some(handler) = self.commands.resolve_command(target) {
                return Resolution::Alias {
                    alias: command.to_string(),
                    target: target.to_string(),
                    handler,
                };
            }
            debug!(alias = command, target, "Alias target is no longer registered");
        }

        Resolution::Unknown
    }
}
