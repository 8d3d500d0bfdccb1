//! Help subsystem: per-topic documentation and the categorized listing.

use std::collections::BTreeSet;
use std::fmt;

use crate::alias::AliasResolver;
use crate::config::HelpConfig;
use crate::registry::{CommandLookup, HelpProvider};
use crate::text::{columnize, trim_docstring};

/// What `help <topic>` should produce.
#[derive(Clone)]
pub enum TopicHelp {
    /// A dedicated provider is registered for the topic.
    Provider(HelpProvider),
    /// Trimmed doc text of the command or the alias target.
    Text(String),
    /// Nothing is known; carries the rendered "no help" message.
    Missing(String),
}

impl fmt::Debug for TopicHelp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(_) => write!(f, "Provider"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Missing(msg) => f.debug_tuple("Missing").field(msg).finish(),
        }
    }
}

/// Names bucketed for the help listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpIndex {
    /// Commands with a doc string or a dedicated help topic.
    pub documented: Vec<String>,
    /// Help topics that name no command.
    pub misc: Vec<String>,
    pub undocumented: Vec<String>,
    /// Alias names, filled only when aliases are shown.
    pub aliases: Vec<String>,
}

pub struct HelpRenderer<'a> {
    commands: &'a dyn CommandLookup,
    aliases: &'a dyn AliasResolver,
    config: &'a HelpConfig,
    show_alias: bool,
}

impl<'a> HelpRenderer<'a> {
    pub fn new(
        commands: &'a dyn CommandLookup,
        aliases: &'a dyn AliasResolver,
        config: &'a HelpConfig,
        show_alias: bool,
    ) -> Self {
        Self {
            commands,
            aliases,
            config,
            show_alias,
        }
    }

    /// Resolve help for one topic.
    ///
    /// A help provider wins, then the command's doc, then (only when no
    /// command has that name) the doc of the alias target.
    pub fn topic(&self, topic: &str) -> TopicHelp {
        if let Some(provider) = self.commands.help_topic(topic) {
            return TopicHelp::Provider(provider);
        }

        let doc = if self.commands.contains(topic) {
            self.commands.doc(topic)
        } else {
            self.aliases
                .resolve_alias(topic)
                .and_then(|target| self.commands.doc(target))
        };

        match doc {
            Some(doc) => TopicHelp::Text(trim_docstring(doc)),
            None => TopicHelp::Missing(self.config.nohelp.replace("{}", topic)),
        }
    }

    /// Bucket every command once.
    pub fn index(&self) -> HelpIndex {
        let mut topics: BTreeSet<&str> = self.commands.help_topic_names().into_iter().collect();
        let mut index = HelpIndex::default();

        for name in self.commands.command_names() {
            if topics.remove(name) || self.commands.doc(name).is_some() {
                index.documented.push(name.to_string());
            } else {
                index.undocumented.push(name.to_string());
            }
        }
        index.misc = topics.into_iter().map(str::to_string).collect();
        if self.show_alias {
            index.aliases = self.aliases.alias_names().iter().cloned().collect();
        }
        index
    }

    /// The full listing: leader line, then one block per non-empty section.
    pub fn render_index(&self) -> String {
        let index = self.index();
        let mut out = format!("{}\n", self.config.doc_leader);
        self.push_topics(&mut out, self.config.doc_header.as_deref(), &index.documented);
        self.push_topics(&mut out, self.config.misc_header.as_deref(), &index.misc);
        self.push_topics(&mut out, self.config.undoc_header.as_deref(), &index.undocumented);
        if self.show_alias {
            self.push_topics(&mut out, self.config.alias_header.as_deref(), &index.aliases);
        }
        out
    }

    fn push_topics(&self, out: &mut String, header: Option<&str>, names: &[String]) {
        let Some(header) = header.filter(|h| !h.is_empty()) else {
            return;
        };
        if names.is_empty() {
            return;
        }
        out.push_str(header);
        out.push('\n');
        if !self.config.ruler.is_empty() {
            out.push_str(&self.config.ruler.repeat(header.chars().count()));
            out.push('\n');
        }
        out.push_str(&columnize(names, self.config.width - 1));
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::AliasTable;
    use crate::error::CommandError;
    use crate::interpreter::Interpreter;
    use crate::registry::{CommandRegistry, Signal};
    use pretty_assertions::assert_eq;

    fn noop(_: &mut Interpreter, _: &str) -> Result<Signal, CommandError> {
        Ok(Signal::Continue)
    }

    fn fixture() -> (CommandRegistry, AliasTable) {
        let mut registry = CommandRegistry::new();
        registry.register("quit", Some("exit"), noop).unwrap();
        registry.register("list", None, noop).unwrap();
        registry.register("load", None, noop).unwrap();
        registry.register_help_topic("load", |_| Ok(())).unwrap();
        registry.register_help_topic("syntax", |_| Ok(())).unwrap();
        let mut aliases = AliasTable::new();
        aliases.define("q", "quit", &registry).unwrap();
        aliases.define("l", "list", &registry).unwrap();
        (registry, aliases)
    }

    #[test]
    fn test_index_buckets() {
        let (registry, aliases) = fixture();
        let config = HelpConfig::default();
        let index = HelpRenderer::new(&registry, &aliases, &config, false).index();
        assert_eq!(index.documented, vec!["load", "quit"]);
        assert_eq!(index.misc, vec!["syntax"]);
        assert_eq!(index.undocumented, vec!["list"]);
        assert!(index.aliases.is_empty());
    }

    #[test]
    fn test_topic_resolution_order() {
        let (registry, aliases) = fixture();
        let config = HelpConfig::default();
        let renderer = HelpRenderer::new(&registry, &aliases, &config, false);

        assert!(matches!(renderer.topic("load"), TopicHelp::Provider(_)));
        assert!(matches!(renderer.topic("quit"), TopicHelp::Text(ref t) if t == "exit"));
        assert!(matches!(renderer.topic("q"), TopicHelp::Text(ref t) if t == "exit"));
        assert!(
            matches!(renderer.topic("list"), TopicHelp::Missing(ref m) if m == "*** No help on list")
        );
        assert!(matches!(renderer.topic("l"), TopicHelp::Missing(_)));
        assert!(matches!(renderer.topic("zzz"), TopicHelp::Missing(_)));
    }

    #[test]
    fn test_render_index() {
        let (registry, aliases) = fixture();
        let config = HelpConfig::default();
        let rendered = HelpRenderer::new(&registry, &aliases, &config, false).render_index();
        let expected = "\n\
Documented commands (type help <topic>):\n\
========================================\n\
load  quit\n\
\n\
Miscellaneous help topics:\n\
==========================\n\
syntax\n\
\n\
Undocumented commands:\n\
======================\n\
list\n\
\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_index_suppresses_absent_headers() {
        let (registry, aliases) = fixture();
        let config = HelpConfig {
            misc_header: None,
            undoc_header: Some(String::new()),
            ruler: String::new(),
            ..Default::default()
        };
        let rendered = HelpRenderer::new(&registry, &aliases, &config, false).render_index();
        assert_eq!(
            rendered,
            "\nDocumented commands (type help <topic>):\nload  quit\n\n"
        );
    }

    #[test]
    fn test_render_index_with_aliases() {
        let (registry, aliases) = fixture();
        let config = HelpConfig::default();
        let rendered = HelpRenderer::new(&registry, &aliases, &config, true).render_index();
        assert!(rendered.ends_with("Aliases:\n========\nl  q\n\n"));
    }
}
