//! # Terps Core
//!
//! Core library for building line-oriented command shells.
//! Provides the command registry, alias table, tab-completion engine,
//! dispatcher, help subsystem, configuration, and the read-dispatch loop.

pub mod alias;
pub mod builtins;
pub mod completion;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod interpreter;
pub mod parser;
pub mod reader;
pub mod registry;
pub mod text;

// Re-export commonly used types at the crate root.
pub use alias::{AliasChange, AliasResolver, AliasTable};
pub use builtins::register_shell;
pub use completion::{
    CompletionCache, CompletionEngine, CompletionRequest, EditorState, LineBuffer,
};
pub use config::{AutoAlias, HelpConfig, InterpreterConfig, load_config, load_config_file};
pub use dispatch::{Dispatcher, Resolution};
pub use error::{AliasError, CommandError, ConfigError, RegistryError, Result, TerpsError};
pub use help::{HelpIndex, HelpRenderer, TopicHelp};
pub use interpreter::Interpreter;
pub use parser::{ParsedLine, parse_line};
pub use reader::{BufferedReader, LineReader, TabComplete};
pub use registry::{CommandLookup, CommandRegistry, Signal};
pub use text::{columnize, trim_docstring};
