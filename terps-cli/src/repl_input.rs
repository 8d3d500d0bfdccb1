//! Interactive line input with history and tab completion.
//!
//! A crossterm-based [`LineReader`] that provides:
//! - Up/Down arrow history navigation with draft preservation
//! - Tab completion through the interpreter's completion protocol
//! - Ctrl-C to discard the line, Ctrl-D on an empty line for end of input
//! - History shared across sessions in the user data directory

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use terps_core::{EditorState, LineReader, TabComplete, columnize};
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

/// Entries kept in memory and on disk.
const HISTORY_CAPACITY: usize = 500;

/// Where the history cursor sits while the user browses with Up/Down.
#[derive(Debug, Default)]
enum Browse {
    #[default]
    Idle,
    /// Showing `entries[pos]`; `draft` is the line typed before browsing.
    At { pos: usize, draft: String },
}

/// Command history, appended to a file one line per entry.
///
/// The file lives in the user data directory next to the logs, so every
/// session shares it. Lines are appended as they are entered; the file is
/// rewritten only when the capacity is exceeded.
pub struct InputHistory {
    entries: VecDeque<String>,
    browse: Browse,
    path: PathBuf,
    capacity: usize,
}

impl InputHistory {
    /// The history file: `<data dir>/history`, or `<workspace>/.terps/history`
    /// when no home directory can be determined.
    pub fn default_path(workspace: &Path) -> PathBuf {
        directories::ProjectDirs::from("dev", "terps", "terps")
            .map(|dirs| dirs.data_dir().join("history"))
            .unwrap_or_else(|| workspace.join(".terps").join("history"))
    }

    /// Open the history stored at `path`. A missing file is an empty history.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut entries: VecDeque<String> = match fs::read_to_string(&path) {
            Ok(text) => text
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => VecDeque::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read history");
                VecDeque::new()
            }
        };
        while entries.len() > HISTORY_CAPACITY {
            entries.pop_front();
        }
        debug!(path = %path.display(), entries = entries.len(), "Loaded history");
        Self {
            entries,
            browse: Browse::Idle,
            path,
            capacity: HISTORY_CAPACITY,
        }
    }

    /// Record an entered line. Blank lines and repeats of the newest entry
    /// are not stored.
    pub fn record(&mut self, line: &str) {
        self.browse = Browse::Idle;
        let line = line.trim();
        if line.is_empty() || self.entries.back().is_some_and(|last| last == line) {
            return;
        }
        self.entries.push_back(line.to_string());

        let result = if self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.rewrite()
        } else {
            self.append(line)
        };
        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "Could not save history");
        }
    }

    fn append(&self, line: &str) -> io::Result<()> {
        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }

    fn rewrite(&self) -> io::Result<()> {
        self.ensure_parent()?;
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(entry);
            text.push('\n');
        }
        fs::write(&self.path, text)
    }

    fn ensure_parent(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
            _ => Ok(()),
        }
    }

    /// Step to the next older entry. The first step remembers `current` so
    /// [`newer`](Self::newer) can bring it back. Stays on the oldest entry.
    pub fn older(&mut self, current: &str) -> Option<&str> {
        let pos = match &mut self.browse {
            Browse::Idle => {
                let pos = self.entries.len().checked_sub(1)?;
                self.browse = Browse::At {
                    pos,
                    draft: current.to_string(),
                };
                pos
            }
            Browse::At { pos, .. } => {
                *pos = pos.saturating_sub(1);
                *pos
            }
        };
        self.entries.get(pos).map(String::as_str)
    }

    /// Step to the next newer entry, or back to the draft past the newest.
    pub fn newer(&mut self) -> Option<String> {
        match std::mem::take(&mut self.browse) {
            Browse::Idle => None,
            Browse::At { pos, draft } if pos + 1 >= self.entries.len() => Some(draft),
            Browse::At { pos, draft } => {
                let entry = self.entries.get(pos + 1).cloned();
                self.browse = Browse::At { pos: pos + 1, draft };
                entry
            }
        }
    }

    /// Leave browsing without restoring the draft.
    pub fn stop_browsing(&mut self) {
        self.browse = Browse::Idle;
    }
}

/// Run the completion protocol for the word ending at `cursor`: state 0,
/// 1, 2, ... until the completer has no more candidates.
pub fn collect_candidates(
    completer: &mut dyn TabComplete,
    buffer: &str,
    cursor: usize,
) -> (EditorState, Vec<String>) {
    let state = EditorState::at_cursor(buffer, cursor);
    let text = state.text().to_string();
    let mut candidates = Vec::new();
    while let Some(candidate) = completer.complete(&text, candidates.len(), &state) {
        candidates.push(candidate);
    }
    (state, candidates)
}

/// Longest prefix shared by every candidate, on a char boundary.
pub fn common_prefix(candidates: &[String]) -> &str {
    let Some(first) = candidates.first() else {
        return "";
    };
    let mut end = first.len();
    for other in &candidates[1..] {
        end = first
            .char_indices()
            .zip(other.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((i, a), _)| i + a.len_utf8())
            .min(end);
    }
    &first[..end]
}

/// Replace the word `[begidx, endidx)` of `buffer` with `replacement`.
/// Returns the new buffer and the cursor placed after the replacement.
pub fn splice_word(
    buffer: &str,
    begidx: usize,
    endidx: usize,
    replacement: &str,
) -> (String, usize) {
    let mut spliced = String::with_capacity(buffer.len() + replacement.len());
    spliced.push_str(&buffer[..begidx]);
    spliced.push_str(replacement);
    let cursor = spliced.len();
    spliced.push_str(&buffer[endidx..]);
    (spliced, cursor)
}

fn prev_boundary(buffer: &str, cursor: usize) -> usize {
    buffer[..cursor]
        .char_indices()
        .next_back()
        .map_or(0, |(i, _)| i)
}

fn next_boundary(buffer: &str, cursor: usize) -> usize {
    buffer[cursor..]
        .chars()
        .next()
        .map_or(cursor, |c| cursor + c.len_utf8())
}

/// Interactive terminal input handler.
pub struct ReplInput {
    history: InputHistory,
}

impl ReplInput {
    /// Create a new interactive input handler.
    pub fn new(workspace: &Path) -> Self {
        Self {
            history: InputHistory::open(InputHistory::default_path(workspace)),
        }
    }

    fn read_line_raw(
        &mut self,
        prompt: &str,
        completer: &mut dyn TabComplete,
    ) -> io::Result<Option<String>> {
        let mut buffer = String::new();
        let mut cursor_pos: usize = 0;

        loop {
            let Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) = event::read()?
            else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }

            match (code, modifiers) {
                // Ctrl-C: discard the line
                (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                    write!(io::stdout(), "^C\r\n")?;
                    buffer.clear();
                    cursor_pos = 0;
                    self.history.stop_browsing();
                    self.redraw(prompt, &buffer, cursor_pos)?;
                }
                // Ctrl-D on empty line: end of input
                (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                    if buffer.is_empty() {
                        return Ok(None);
                    }
                }
                (KeyCode::Tab, _) => {
                    let (state, candidates) = collect_candidates(completer, &buffer, cursor_pos);
                    match candidates.as_slice() {
                        [] => {}
                        [only] => {
                            let word = format!("{only} ");
                            (buffer, cursor_pos) =
                                splice_word(&buffer, state.begidx, state.endidx, &word);
                        }
                        many => {
                            let prefix = common_prefix(many);
                            if prefix.len() > state.text().len() {
                                (buffer, cursor_pos) =
                                    splice_word(&buffer, state.begidx, state.endidx, prefix);
                            } else {
                                self.list_candidates(many)?;
                            }
                        }
                    }
                    self.redraw(prompt, &buffer, cursor_pos)?;
                }
                (KeyCode::Enter, _) => {
                    self.history.record(&buffer);
                    return Ok(Some(buffer));
                }
                (KeyCode::Up, _) => {
                    if let Some(entry) = self.history.older(&buffer) {
                        buffer = entry.to_string();
                        cursor_pos = buffer.len();
                        self.redraw(prompt, &buffer, cursor_pos)?;
                    }
                }
                (KeyCode::Down, _) => {
                    if let Some(entry) = self.history.newer() {
                        buffer = entry;
                        cursor_pos = buffer.len();
                        self.redraw(prompt, &buffer, cursor_pos)?;
                    }
                }
                (KeyCode::Left, _) => {
                    cursor_pos = prev_boundary(&buffer, cursor_pos);
                    self.redraw(prompt, &buffer, cursor_pos)?;
                }
                (KeyCode::Right, _) => {
                    cursor_pos = next_boundary(&buffer, cursor_pos);
                    self.redraw(prompt, &buffer, cursor_pos)?;
                }
                (KeyCode::Backspace, _) => {
                    if cursor_pos > 0 {
                        let start = prev_boundary(&buffer, cursor_pos);
                        buffer.replace_range(start..cursor_pos, "");
                        cursor_pos = start;
                        self.redraw(prompt, &buffer, cursor_pos)?;
                    }
                }
                (KeyCode::Delete, _) => {
                    if cursor_pos < buffer.len() {
                        let end = next_boundary(&buffer, cursor_pos);
                        buffer.replace_range(cursor_pos..end, "");
                        self.redraw(prompt, &buffer, cursor_pos)?;
                    }
                }
                (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                    cursor_pos = 0;
                    self.redraw(prompt, &buffer, cursor_pos)?;
                }
                (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                    cursor_pos = buffer.len();
                    self.redraw(prompt, &buffer, cursor_pos)?;
                }
                (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                    buffer.insert(cursor_pos, c);
                    cursor_pos += c.len_utf8();
                    self.history.stop_browsing();
                    self.redraw(prompt, &buffer, cursor_pos)?;
                }
                _ => {}
            }
        }
    }

    /// Print the candidates in columns below the input line.
    fn list_candidates(&self, candidates: &[String]) -> io::Result<()> {
        let width = terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
        let listing = columnize(candidates, width.saturating_sub(1).max(1));
        let mut stdout = io::stdout();
        write!(stdout, "\r\n{}", listing.replace('\n', "\r\n"))?;
        stdout.flush()
    }

    /// Redraw the prompt and buffer, placing the cursor at `cursor_pos`.
    fn redraw(&self, prompt: &str, buffer: &str, cursor_pos: usize) -> io::Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "\r\x1b[2K{prompt}{buffer}")?;
        let column = prompt.width() + buffer[..cursor_pos].width();
        write!(
            stdout,
            "{}",
            cursor::MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX))
        )?;
        stdout.flush()
    }
}

impl LineReader for ReplInput {
    /// Read a line of input with interactive features.
    ///
    /// Enables raw mode during input, restores on return.
    fn read_line(
        &mut self,
        prompt: &str,
        completer: &mut dyn TabComplete,
    ) -> io::Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;

        terminal::enable_raw_mode()?;
        let result = self.read_line_raw(prompt, completer);
        terminal::disable_raw_mode()?;

        // Move to next line after input
        print!("\r\n");
        io::stdout().flush()?;

        result
    }
}
