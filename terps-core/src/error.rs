//! Error types for the terps interpreter core.
//!
//! Uses `thiserror` for public API error types with structured variants
//! covering command registration, alias management, handler execution,
//! and configuration.

use std::path::PathBuf;

/// Top-level error type for the terps core library.
#[derive(Debug, thiserror::Error)]
pub enum TerpsError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Alias error: {0}")]
    Alias(#[from] AliasError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from command, completer, and help-topic registration.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Invalid command name: '{name}'")]
    InvalidName { name: String },
}

/// Errors from binding an alias.
///
/// A missing target is not an error: it is a deletion request.
#[derive(Debug, thiserror::Error)]
pub enum AliasError {
    #[error("Invalid alias name: '{name}'")]
    InvalidName { name: String },

    #[error("Alias '{name}' would be shadowed by the command of the same name")]
    ShadowedByCommand { name: String },
}

/// Errors returned by command handlers.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Invalid arguments for '{command}': {reason}")]
    InvalidArguments { command: String, reason: String },

    #[error("Command '{command}' failed: {message}")]
    Failed { command: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// A type alias for results using the top-level `TerpsError`.
pub type Result<T> = std::result::Result<T, TerpsError>;
