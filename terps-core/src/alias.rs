//! Alias table: alternate names that resolve to commands by indirection.
//!
//! An alias stores the *name* of its target command, never the handler
//! itself. Resolution goes through the registry at call time, so an alias
//! follows its target when the target's handler is replaced.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::config::AutoAlias;
use crate::error::AliasError;
use crate::parser::is_identifier;
use crate::registry::CommandLookup;

/// Read-only view of the alias bindings.
pub trait AliasResolver {
    /// The target command name bound to `alias`.
    fn resolve_alias(&self, alias: &str) -> Option<&str>;

    /// The current alias set, sorted.
    fn alias_names(&self) -> &BTreeSet<String>;
}

/// Outcome of [`AliasTable::define`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasChange {
    Bound { alias: String, target: String },
    Removed { alias: String },
    Unchanged,
}

/// Alias name to target command name bindings.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    bindings: HashMap<String, String>,
    /// Snapshot of `bindings` keys, rebuilt on every change.
    names: BTreeSet<String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `alias` to `target`, or remove `alias` when `target` names nothing.
    ///
    /// `target` is looked up as a command first, then as an existing alias
    /// (binding to that alias's command). An empty or unknown target is a
    /// deletion request and never an error.
    pub fn define(
        &mut self,
        alias: &str,
        target: &str,
        commands: &dyn CommandLookup,
    ) -> Result<AliasChange, AliasError> {
        let target = target.trim();
        let resolved = if commands.contains(target) {
            Some(target.to_string())
        } else {
            self.bindings.get(target).cloned()
        };

        let Some(command) = resolved else {
            return Ok(if self.remove(alias) {
                AliasChange::Removed {
                    alias: alias.to_string(),
                }
            } else {
                AliasChange::Unchanged
            });
        };

        if !is_identifier(alias) {
            return Err(AliasError::InvalidName {
                name: alias.to_string(),
            });
        }
        if commands.contains(alias) {
            return Err(AliasError::ShadowedByCommand {
                name: alias.to_string(),
            });
        }

        self.bindings.insert(alias.to_string(), command.clone());
        self.refresh();
        debug!(alias, target = %command, "Bound alias");
        Ok(AliasChange::Bound {
            alias: alias.to_string(),
            target: command,
        })
    }

    /// Remove `alias`. Returns `true` if it was bound.
    pub fn remove(&mut self, alias: &str) -> bool {
        let removed = self.bindings.remove(alias).is_some();
        if removed {
            self.refresh();
            debug!(alias, "Removed alias");
        }
        removed
    }

    /// Seed the startup alias.
    ///
    /// Skipped when `auto.name` is already bound and `force` is off. Returns
    /// whether a binding was made.
    pub fn seed(
        &mut self,
        auto: &AutoAlias,
        force: bool,
        commands: &dyn CommandLookup,
    ) -> Result<bool, AliasError> {
        if self.bindings.contains_key(&auto.name) && !force {
            return Ok(false);
        }
        match self.define(&auto.name, &auto.target, commands)? {
            AliasChange::Bound { .. } => Ok(true),
            AliasChange::Removed { .. } | AliasChange::Unchanged => Ok(false),
        }
    }

    /// The current alias set.
    pub fn list(&self) -> &BTreeSet<String> {
        &self.names
    }

    /// One `alias: command` line per alias, in alias-set order.
    pub fn format(&self) -> String {
        self.names
            .iter()
            .filter_map(|alias| {
                self.bindings
                    .get(alias)
                    .map(|target| format!("{alias}: {target}\n"))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn refresh(&mut self) {
        self.names = self.bindings.keys().cloned().collect();
    }
}

impl AliasResolver for AliasTable {
    fn resolve_alias(&self, alias: &str) -> Option<&str> {
        self.bindings.get(alias).map(String::as_str)
    }

    fn alias_names(&self) -> &BTreeSet<String> {
        &self.names
    }
}
