//! Configuration system for terps interpreters.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> overrides.
//! Configuration is loaded from `~/.config/terps/config.toml` and/or `.terps/config.toml`
//! in the workspace directory.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::parser::is_identifier;

/// Top-level configuration for an interpreter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Prompt written before each line is read.
    pub prompt: String,
    /// Banner written once when the loop starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    /// Include aliases in name completion and in the help listing.
    pub show_alias: bool,
    /// Seed `auto_alias` when the interpreter is built.
    pub enable_alias: bool,
    /// Overwrite an existing binding when seeding `auto_alias`.
    pub force_alias: bool,
    /// The default alias seeded at startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_alias: Option<AutoAlias>,
    /// Command dispatched when input ends; it stops the loop.
    pub eof_command: String,
    /// Re-run the previous command when an empty line is entered.
    pub repeat_last_command: bool,
    pub help: HelpConfig,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            prompt: "(terps) ".to_string(),
            intro: None,
            show_alias: false,
            enable_alias: true,
            force_alias: false,
            auto_alias: Some(AutoAlias::default()),
            eof_command: "EOF".to_string(),
            repeat_last_command: true,
            help: HelpConfig::default(),
        }
    }
}

impl InterpreterConfig {
    /// Check invariants that deserialization cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_identifier(&self.eof_command) {
            return Err(ConfigError::Invalid {
                message: format!("eof_command '{}' is not a command name", self.eof_command),
            });
        }
        if let Some(auto) = &self.auto_alias
            && !is_identifier(&auto.name)
        {
            return Err(ConfigError::Invalid {
                message: format!("auto_alias name '{}' is not an alias name", auto.name),
            });
        }
        if self.help.width < 2 {
            return Err(ConfigError::Invalid {
                message: format!("help.width must be at least 2, got {}", self.help.width),
            });
        }
        Ok(())
    }
}

/// An alias bound automatically when the interpreter starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAlias {
    pub name: String,
    pub target: String,
}

impl Default for AutoAlias {
    fn default() -> Self {
        Self {
            name: "a".to_string(),
            target: "alias".to_string(),
        }
    }
}

/// Labels and layout of the help listing.
///
/// A header that is `None` or empty suppresses its whole section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpConfig {
    /// Line written before the listing.
    pub doc_leader: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub misc_header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undoc_header: Option<String>,
    /// Only used when aliases are shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_header: Option<String>,
    /// Character repeated under each header; empty disables the rule.
    pub ruler: String,
    /// Message for unknown topics; `{}` is replaced with the topic.
    pub nohelp: String,
    /// Display width used to columnize names.
    pub width: usize,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            doc_leader: String::new(),
            doc_header: Some("Documented commands (type help <topic>):".to_string()),
            misc_header: Some("Miscellaneous help topics:".to_string()),
            undoc_header: Some("Undocumented commands:".to_string()),
            alias_header: Some("Aliases:".to_string()),
            ruler: "=".to_string(),
            nohelp: "*** No help on {}".to_string(),
            width: 80,
        }
    }
}

/// Load configuration with layered merging.
///
/// Order (later overrides earlier):
/// 1. Built-in defaults
/// 2. User config file (`~/.config/terps/config.toml`)
/// 3. Workspace config file (`.terps/config.toml`)
/// 4. Environment variables (`TERPS_` prefix, `__` for nesting)
/// 5. Explicit overrides
pub fn load_config(
    workspace: Option<&Path>,
    overrides: Option<&InterpreterConfig>,
) -> Result<InterpreterConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(InterpreterConfig::default()));

    // User-level config
    if let Some(config_dir) = directories::ProjectDirs::from("dev", "terps", "terps") {
        let user_config = config_dir.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    // Workspace-level config
    if let Some(ws) = workspace {
        let ws_config = ws.join(".terps").join("config.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // Environment variables (TERPS_PROMPT, TERPS_HELP__WIDTH, etc.)
    figment = figment.merge(Env::prefixed("TERPS_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    figment.extract().map_err(Box::new)
}

/// Load configuration from one explicit file on top of the defaults.
pub fn load_config_file(path: &Path) -> Result<InterpreterConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Figment::from(Serialized::defaults(InterpreterConfig::default()))
        .merge(Toml::file(path))
        .extract()
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
}
