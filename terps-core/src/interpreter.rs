//! The interpreter: composes the registry, alias table, completion engine
//! and help renderer, and runs the read-dispatch loop.

use std::collections::{BTreeSet, VecDeque};
use std::io::{self, Write};

use tracing::{debug, trace, warn};

use crate::alias::{AliasChange, AliasResolver, AliasTable};
use crate::builtins;
use crate::completion::{
    CompleterChoice, CompletionCache, CompletionEngine, CompletionRequest, CompletionState,
    LineBuffer,
};
use crate::config::InterpreterConfig;
use crate::dispatch::Dispatcher;
use crate::error::{AliasError, CommandError, RegistryError, Result};
use crate::help::{HelpRenderer, TopicHelp};
use crate::parser::{ParsedLine, SHELL_COMMAND, parse_line};
use crate::reader::{LineReader, TabComplete};
use crate::registry::{CommandLookup, CommandRegistry, Handler, Signal};

/// A line-oriented command interpreter.
pub struct Interpreter {
    config: InterpreterConfig,
    registry: CommandRegistry,
    aliases: AliasTable,
    cache: CompletionCache,
    completion: CompletionState,
    output: Box<dyn Write>,
    cmdqueue: VecDeque<String>,
    lastcmd: String,
}

impl Interpreter {
    /// Build an interpreter with the built-in `help`, `alias` and
    /// end-of-input commands, then seed the configured default alias.
    pub fn new(config: InterpreterConfig) -> Result<Self> {
        let mut interp = Self::bare(config)?;
        builtins::register_builtins(&mut interp)?;
        interp.seed_default_alias()?;
        Ok(interp)
    }

    /// Build an interpreter with no commands and no aliases.
    pub fn bare(config: InterpreterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry: CommandRegistry::new(),
            aliases: AliasTable::new(),
            cache: CompletionCache::new(),
            completion: CompletionState::default(),
            output: Box::new(io::stdout()),
            cmdqueue: VecDeque::new(),
            lastcmd: String::new(),
        })
    }

    /// Send output to `output` instead of stdout.
    pub fn with_output(mut self, output: impl Write + 'static) -> Self {
        self.set_output(output);
        self
    }

    pub fn set_output(&mut self, output: impl Write + 'static) {
        self.output = Box::new(output);
    }

    pub fn output(&mut self) -> &mut dyn Write {
        self.output.as_mut()
    }

    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn alias_table(&self) -> &AliasTable {
        &self.aliases
    }

    /// Bind the configured default alias.
    ///
    /// An existing binding under the alias name is kept unless
    /// `force_alias` is set. Returns whether a binding was made.
    pub fn seed_default_alias(&mut self) -> Result<bool> {
        if !self.config.enable_alias {
            return Ok(false);
        }
        let Some(auto) = self.config.auto_alias.clone() else {
            return Ok(false);
        };
        if self.registry.contains(&auto.name) {
            warn!(alias = %auto.name, "Default alias skipped: a command has that name");
            return Ok(false);
        }
        if !self.registry.contains(&auto.target) && self.aliases.resolve_alias(&auto.target).is_none() {
            warn!(alias = %auto.name, target = %auto.target, "Default alias skipped: unknown target");
            return Ok(false);
        }
        let seeded = self
            .aliases
            .seed(&auto, self.config.force_alias, &self.registry)?;
        debug!(alias = %auto.name, target = %auto.target, seeded, "Seeded default alias");
        Ok(seeded)
    }

    // ---- Command registry ----

    /// Register a command. Re-registering a name replaces its handler;
    /// aliases pointing at it follow the new handler.
    pub fn register_command<F>(
        &mut self,
        name: &str,
        doc: Option<&str>,
        handler: F,
    ) -> std::result::Result<(), RegistryError>
    where
        F: Fn(&mut Interpreter, &str) -> std::result::Result<Signal, CommandError> + 'static,
    {
        self.registry.register(name, doc, handler)
    }

    pub fn unregister_command(&mut self, name: &str) -> bool {
        self.registry.unregister(name)
    }

    pub fn register_completer<F>(
        &mut self,
        name: &str,
        completer: F,
    ) -> std::result::Result<(), RegistryError>
    where
        F: Fn(&mut Interpreter, &CompletionRequest<'_>) -> Vec<String> + 'static,
    {
        self.registry.register_completer(name, completer)
    }

    pub fn register_help_topic<F>(
        &mut self,
        topic: &str,
        provider: F,
    ) -> std::result::Result<(), RegistryError>
    where
        F: Fn(&mut Interpreter) -> std::result::Result<(), CommandError> + 'static,
    {
        self.registry.register_help_topic(topic, provider)
    }

    /// Every command and alias name, sorted.
    pub fn list_names(&self) -> Vec<String> {
        let names: BTreeSet<String> = self
            .registry
            .command_names()
            .into_iter()
            .map(str::to_string)
            .chain(self.aliases.alias_names().iter().cloned())
            .collect();
        names.into_iter().collect()
    }

    pub fn resolve_command(&self, name: &str) -> Option<Handler> {
        self.registry.resolve_command(name)
    }

    // ---- Aliases ----

    /// Bind `alias` to `target`; an unknown or empty target removes `alias`.
    pub fn define_alias(
        &mut self,
        alias: &str,
        target: &str,
    ) -> std::result::Result<AliasChange, AliasError> {
        let result = self.aliases.define(alias, target, &self.registry);
        if let Err(e) = &result {
            warn!(alias, target, error = %e, "Failed to create alias");
        }
        result
    }

    pub fn remove_alias(&mut self, alias: &str) -> bool {
        self.aliases.remove(alias)
    }

    pub fn list_aliases(&self) -> &BTreeSet<String> {
        self.aliases.list()
    }

    /// Render the alias listing. With `suppress` the text is returned
    /// instead of written to the output.
    pub fn format_aliases(&mut self, suppress: bool) -> io::Result<Option<String>> {
        let text = self.aliases.format();
        if suppress {
            return Ok(Some(text));
        }
        self.output.write_all(text.as_bytes())?;
        Ok(None)
    }

    // ---- Completion ----

    /// Replace the source that fills the completion cache.
    pub fn set_completion_source<F>(&mut self, source: F)
    where
        F: FnMut(&str) -> Vec<String> + 'static,
    {
        self.cache.set_source(source);
    }

    /// Candidates cached under `key` that start with `text` and are not
    /// already on `line`. Fills the cache from the source on first use.
    pub fn cached_completion(&mut self, key: &str, text: &str, line: &str) -> Vec<String> {
        self.cache.complete(key, text, line)
    }

    pub fn clear_completion_cache(&mut self, key: Option<&str>) {
        self.cache.clear(key);
    }

    pub fn completion_cache(&self) -> &CompletionCache {
        &self.cache
    }

    pub fn completion_engine(&self) -> CompletionEngine<'_> {
        CompletionEngine::new(
            &self.registry,
            &self.aliases,
            self.config.show_alias,
            &self.config.eof_command,
        )
    }

    pub fn complete_names(&self, text: &str) -> Vec<String> {
        self.completion_engine().complete_names(text)
    }

    pub fn complete_default(&self, request: &CompletionRequest<'_>) -> Vec<String> {
        self.completion_engine().complete_default(request)
    }

    /// Return the `state`-th candidate for the word `text`.
    ///
    /// State 0 recomputes the candidate list from the live buffer; later
    /// states replay it. `None` signals there are no more candidates.
    pub fn complete(
        &mut self,
        text: &str,
        state: usize,
        buffer: &dyn LineBuffer,
    ) -> Option<String> {
        if state == 0 {
            let matches = self.compute_matches(text, buffer);
            trace!(text, count = matches.len(), "Computed completion candidates");
            self.completion.replace(matches);
        }
        self.completion.get(state)
    }

    fn compute_matches(&mut self, text: &str, buffer: &dyn LineBuffer) -> Vec<String> {
        let origline = buffer.line_buffer();
        let line = origline.trim_start();
        let stripped = origline.len() - line.len();
        let begidx = buffer.begidx().saturating_sub(stripped);
        let endidx = buffer.endidx().saturating_sub(stripped);

        let choice = self.completion_engine().select(line, begidx);
        trace!(?choice, begidx, endidx, "Selected completer");
        let request = CompletionRequest {
            text,
            line,
            begidx,
            endidx,
        };
        match choice {
            CompleterChoice::Names => self.complete_names(text),
            CompleterChoice::Default => self.complete_default(&request),
            CompleterChoice::Custom { completer, .. } => completer(self, &request),
        }
    }

    // ---- Dispatch ----

    pub fn parse_line(&self, line: &str) -> ParsedLine {
        parse_line(line, self.registry.contains(SHELL_COMMAND))
    }

    /// Run one line.
    ///
    /// Commands are tried before aliases. Lines naming neither are
    /// reported as unknown; handler errors are reported. Neither ends
    /// the loop.
    pub fn dispatch(&mut self, line: &str) -> Signal {
        let parsed = self.parse_line(line);
        if parsed.line.is_empty() {
            return self.empty_line();
        }

        let Some(command) = parsed.command else {
            self.lastcmd = parsed.line.clone();
            return self.unknown(&parsed.line);
        };
        self.lastcmd = if command == self.config.eof_command {
            String::new()
        } else {
            parsed.line.clone()
        };

        let resolution = Dispatcher::new(&self.registry, &self.aliases).resolve(&command);
        debug!(?resolution, args = %parsed.args, "Dispatching");
        match resolution.handler() {
            Some(handler) => self.invoke(&command, handler, &parsed.args),
            None => self.unknown(&parsed.line),
        }
    }

    /// Queue a line to run before more input is read.
    pub fn push_command(&mut self, line: impl Into<String>) {
        self.cmdqueue.push_back(line.into());
    }

    fn empty_line(&mut self) -> Signal {
        if self.config.repeat_last_command && !self.lastcmd.is_empty() {
            let last = self.lastcmd.clone();
            return self.dispatch(&last);
        }
        Signal::Continue
    }

    fn invoke(&mut self, command: &str, handler: Handler, args: &str) -> Signal {
        match handler(self, args) {
            Ok(signal) => signal,
            Err(e) => {
                warn!(command, error = %e, "Command failed");
                if let Err(err) = writeln!(self.output, "*** {e}") {
                    warn!(command, error = %err, "Failed to report command error");
                }
                Signal::Continue
            }
        }
    }

    fn unknown(&mut self, line: &str) -> Signal {
        debug!(line, "Unknown syntax");
        if let Err(e) = writeln!(self.output, "*** Unknown syntax: {line}") {
            warn!(line, error = %e, "Failed to report unknown syntax");
        }
        Signal::Continue
    }

    // ---- Help ----

    pub fn help_renderer(&self) -> HelpRenderer<'_> {
        HelpRenderer::new(
            &self.registry,
            &self.aliases,
            &self.config.help,
            self.config.show_alias,
        )
    }

    /// `help` with no argument lists commands; `help <topic>` shows one topic.
    pub fn help(&mut self, arg: &str) -> std::result::Result<(), CommandError> {
        let arg = arg.trim();
        if arg.is_empty() {
            let listing = self.help_renderer().render_index();
            self.output.write_all(listing.as_bytes())?;
            return Ok(());
        }

        let topic = self.help_renderer().topic(arg);
        match topic {
            TopicHelp::Provider(provider) => provider(self),
            TopicHelp::Text(text) | TopicHelp::Missing(text) => {
                writeln!(self.output, "{text}")?;
                Ok(())
            }
        }
    }

    // ---- Loop ----

    /// Read and dispatch lines until a handler returns [`Signal::Stop`].
    ///
    /// End of input dispatches the end-of-input command, or stops directly
    /// when that command is not registered.
    pub fn cmdloop(&mut self, reader: &mut dyn LineReader) -> Result<()> {
        if let Some(intro) = self.config.intro.clone() {
            writeln!(self.output, "{intro}")?;
        }

        loop {
            let line = match self.cmdqueue.pop_front() {
                Some(line) => line,
                None => {
                    self.output.flush()?;
                    let prompt = self.config.prompt.clone();
                    match reader.read_line(&prompt, self)? {
                        Some(line) => line,
                        None if self.registry.contains(&self.config.eof_command) => {
                            self.config.eof_command.clone()
                        }
                        None => {
                            debug!("End of input");
                            break;
                        }
                    }
                }
            };

            if self.dispatch(&line) == Signal::Stop {
                break;
            }
        }

        self.output.flush()?;
        Ok(())
    }
}

impl TabComplete for Interpreter {
    fn complete(&mut self, text: &str, state: usize, buffer: &dyn LineBuffer) -> Option<String> {
        Interpreter::complete(self, text, state, buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::EditorState;
    use crate::config::AutoAlias;
    use crate::reader::BufferedReader;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl SharedBuf {
        fn take(&self) -> String {
            String::from_utf8(std::mem::take(&mut *self.0.borrow_mut())).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    fn shell() -> (Interpreter, SharedBuf) {
        let out = SharedBuf::default();
        let mut interp = Interpreter::new(InterpreterConfig::default())
            .unwrap()
            .with_output(out.clone());
        interp
            .register_command("quit", Some("exit"), |_, _| Ok(Signal::Stop))
            .unwrap();
        interp
            .register_command("echo", Some("print the arguments"), |interp, args| {
                interp.write_line(args)?;
                Ok(Signal::Continue)
            })
            .unwrap();
        interp
            .register_command("list", None, |interp, _| {
                interp.write_line("listing")?;
                Ok(Signal::Continue)
            })
            .unwrap();
        (interp, out)
    }

    fn all_candidates(interp: &mut Interpreter, buffer: &str, cursor: usize) -> Vec<String> {
        let state = EditorState::at_cursor(buffer, cursor);
        let text = state.text().to_string();
        let mut out = Vec::new();
        while let Some(c) = interp.complete(&text, out.len(), &state) {
            out.push(c);
        }
        out
    }

    #[test]
    fn test_new_registers_builtins_and_default_alias() {
        let (interp, _) = shell();
        for name in ["help", "alias", "EOF"] {
            assert!(interp.registry().contains(name), "missing {name}");
        }
        assert_eq!(interp.alias_table().resolve_alias("a"), Some("alias"));
    }

    #[test]
    fn test_default_alias_disabled() {
        let config = InterpreterConfig {
            enable_alias: false,
            ..Default::default()
        };
        let interp = Interpreter::new(config).unwrap();
        assert!(interp.list_aliases().is_empty());
    }

    #[test]
    fn test_default_alias_skipped_for_missing_target() {
        let config = InterpreterConfig {
            auto_alias: Some(AutoAlias {
                name: "x".into(),
                target: "nothing".into(),
            }),
            ..Default::default()
        };
        let interp = Interpreter::new(config).unwrap();
        assert!(interp.list_aliases().is_empty());
    }

    #[test]
    fn test_reseed_keeps_existing_binding_without_force() {
        let (mut interp, _) = shell();
        interp.define_alias("a", "quit").unwrap();
        assert!(!interp.seed_default_alias().unwrap());
        assert_eq!(interp.alias_table().resolve_alias("a"), Some("quit"));
    }

    #[test]
    fn test_reseed_overwrites_existing_binding_with_force() {
        let config = InterpreterConfig {
            force_alias: true,
            ..Default::default()
        };
        let mut interp = Interpreter::new(config).unwrap();
        interp
            .register_command("quit", None, |_, _| Ok(Signal::Stop))
            .unwrap();
        interp.define_alias("a", "quit").unwrap();
        assert_eq!(interp.alias_table().resolve_alias("a"), Some("quit"));

        assert!(interp.seed_default_alias().unwrap());
        assert_eq!(interp.alias_table().resolve_alias("a"), Some("alias"));
        assert_eq!(interp.alias_table().format(), "a: alias\n");
    }

    #[test]
    fn test_reseed_unbound_name_without_force() {
        let (mut interp, _) = shell();
        interp.remove_alias("a");
        assert!(interp.seed_default_alias().unwrap());
        assert_eq!(interp.alias_table().resolve_alias("a"), Some("alias"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = InterpreterConfig {
            eof_command: String::new(),
            ..Default::default()
        };
        assert!(Interpreter::new(config).is_err());
    }

    #[test]
    fn test_dispatch_command_and_unknown() {
        let (mut interp, out) = shell();
        assert_eq!(interp.dispatch("echo hello world"), Signal::Continue);
        assert_eq!(out.take(), "hello world\n");

        assert_eq!(interp.dispatch("bogus stuff"), Signal::Continue);
        assert_eq!(out.take(), "*** Unknown syntax: bogus stuff\n");

        assert_eq!(interp.dispatch("quit"), Signal::Stop);
    }

    #[test]
    fn test_dispatch_through_alias() {
        let (mut interp, out) = shell();
        interp.define_alias("e", "echo").unwrap();
        interp.dispatch("e via alias");
        assert_eq!(out.take(), "via alias\n");

        interp.define_alias("e", "").unwrap();
        interp.dispatch("e via alias");
        assert_eq!(out.take(), "*** Unknown syntax: e via alias\n");
    }

    #[test]
    fn test_alias_follows_redefinition() {
        let (mut interp, out) = shell();
        interp.define_alias("e", "echo").unwrap();
        interp
            .register_command("echo", Some("shout"), |interp, args| {
                interp.write_line(&args.to_uppercase())?;
                Ok(Signal::Continue)
            })
            .unwrap();
        interp.dispatch("e quiet");
        assert_eq!(out.take(), "QUIET\n");
    }

    #[test]
    fn test_empty_line_repeats_last_command() {
        let (mut interp, out) = shell();
        interp.dispatch("echo again");
        interp.dispatch("   ");
        assert_eq!(out.take(), "again\nagain\n");
    }

    #[test]
    fn test_empty_line_without_repeat() {
        let config = InterpreterConfig {
            repeat_last_command: false,
            ..Default::default()
        };
        let out = SharedBuf::default();
        let mut interp = Interpreter::new(config).unwrap().with_output(out.clone());
        interp
            .register_command("echo", None, |interp, args| {
                interp.write_line(args)?;
                Ok(Signal::Continue)
            })
            .unwrap();
        interp.dispatch("echo once");
        interp.dispatch("");
        assert_eq!(out.take(), "once\n");
    }

    #[test]
    fn test_handler_error_is_reported() {
        let (mut interp, out) = shell();
        interp
            .register_command("fail", None, |_, _| {
                Err(CommandError::Failed {
                    command: "fail".into(),
                    message: "boom".into(),
                })
            })
            .unwrap();
        assert_eq!(interp.dispatch("fail"), Signal::Continue);
        assert_eq!(out.take(), "*** Command 'fail' failed: boom\n");
    }

    #[test]
    fn test_dispatch_survives_broken_output() {
        let (mut interp, _) = shell();
        interp
            .register_command("fail", None, |_, _| {
                Err(CommandError::Failed {
                    command: "fail".into(),
                    message: "boom".into(),
                })
            })
            .unwrap();
        interp.set_output(BrokenPipe);
        assert_eq!(interp.dispatch("bogus"), Signal::Continue);
        assert_eq!(interp.dispatch("fail"), Signal::Continue);
        assert_eq!(interp.dispatch("quit"), Signal::Stop);
    }

    #[test]
    fn test_question_mark_runs_help() {
        let (mut interp, out) = shell();
        interp.dispatch("?quit");
        assert_eq!(out.take(), "exit\n");
        interp.dispatch("help nope");
        assert_eq!(out.take(), "*** No help on nope\n");
    }

    #[test]
    fn test_help_through_alias_and_provider() {
        let (mut interp, out) = shell();
        interp.define_alias("q", "quit").unwrap();
        interp.dispatch("help q");
        assert_eq!(out.take(), "exit\n");

        interp
            .register_help_topic("syntax", |interp| {
                interp.write_line("commands are words")?;
                Ok(())
            })
            .unwrap();
        interp.dispatch("help syntax");
        assert_eq!(out.take(), "commands are words\n");
    }

    #[test]
    fn test_format_aliases_suppress() {
        let (mut interp, out) = shell();
        interp.define_alias("q", "quit").unwrap();
        let text = interp.format_aliases(true).unwrap();
        assert_eq!(text.as_deref(), Some("a: alias\nq: quit\n"));
        assert_eq!(out.take(), "");

        assert_eq!(interp.format_aliases(false).unwrap(), None);
        assert_eq!(out.take(), "a: alias\nq: quit\n");
    }

    #[test]
    fn test_list_names_includes_aliases() {
        let (mut interp, _) = shell();
        interp.define_alias("q", "quit").unwrap();
        assert_eq!(
            interp.list_names(),
            vec!["EOF", "a", "alias", "echo", "help", "list", "q", "quit"]
        );
    }

    #[test]
    fn test_complete_command_word() {
        let (mut interp, _) = shell();
        assert_eq!(all_candidates(&mut interp, "e", 1), vec!["echo"]);
        assert_eq!(
            all_candidates(&mut interp, "", 0),
            vec!["alias", "echo", "help", "quit"]
        );
        // Leading whitespace is ignored
        assert_eq!(all_candidates(&mut interp, "   qu", 5), vec!["quit"]);
    }

    #[test]
    fn test_complete_argument_uses_default() {
        let (mut interp, _) = shell();
        assert_eq!(
            all_candidates(&mut interp, "list ", 5),
            vec!["alias", "echo", "help", "list", "quit"]
        );
    }

    #[test]
    fn test_complete_with_registered_completer_and_alias() {
        let (mut interp, _) = shell();
        interp.set_completion_source(|key| match key {
            "echo" => vec!["hello".into(), "help".into(), "world".into()],
            _ => Vec::new(),
        });
        interp
            .register_completer("echo", |interp, req| {
                interp.cached_completion("echo", req.text, req.line)
            })
            .unwrap();
        assert_eq!(all_candidates(&mut interp, "echo he", 7), vec!["hello", "help"]);
        assert_eq!(all_candidates(&mut interp, "echo hello w", 12), vec!["world"]);

        interp.define_alias("e", "echo").unwrap();
        assert_eq!(all_candidates(&mut interp, "  e he", 6), vec!["hello", "help"]);
    }

    #[test]
    fn test_complete_replays_until_state_zero() {
        let (mut interp, _) = shell();
        let state = EditorState::at_cursor("", 0);
        assert_eq!(interp.complete("", 0, &state).as_deref(), Some("alias"));
        // A later state replays the stored list even if the buffer changed
        let other = EditorState::at_cursor("list ", 5);
        assert_eq!(interp.complete("", 1, &other).as_deref(), Some("echo"));
        assert_eq!(interp.complete("", 99, &other), None);
    }

    #[test]
    fn test_cmdloop_runs_until_stop() {
        let (mut interp, out) = shell();
        interp.push_command("echo queued");
        let mut reader = BufferedReader::new(Cursor::new("echo one\nquit\necho never\n"));
        interp.cmdloop(&mut reader).unwrap();
        assert_eq!(out.take(), "queued\none\n");
    }

    #[test]
    fn test_cmdloop_stops_at_end_of_input() {
        let (mut interp, out) = shell();
        let mut reader = BufferedReader::new(Cursor::new("echo one\n"));
        interp.cmdloop(&mut reader).unwrap();
        assert_eq!(out.take(), "one\n");
    }

    #[test]
    fn test_cmdloop_bare_interpreter_stops_at_end_of_input() {
        let out = SharedBuf::default();
        let mut interp = Interpreter::bare(InterpreterConfig {
            intro: Some("hi".into()),
            ..Default::default()
        })
        .unwrap()
        .with_output(out.clone());
        let mut reader = BufferedReader::new(Cursor::new("anything\n"));
        interp.cmdloop(&mut reader).unwrap();
        assert_eq!(out.take(), "hi\n*** Unknown syntax: anything\n");
    }
}
