//! Line input for the read-dispatch loop.
//!
//! The loop reads through a [`LineReader`]. Interactive editors receive the
//! interpreter as a [`TabComplete`] so they can run the completion protocol
//! while the line is being typed; [`BufferedReader`] serves pipes, files and
//! tests.

use std::io::{self, BufRead};

use crate::completion::LineBuffer;

/// The completion entry point a line editor calls.
///
/// For one keystroke the editor calls with `state` 0, 1, 2, ... until `None`
/// is returned.
pub trait TabComplete {
    fn complete(&mut self, text: &str, state: usize, buffer: &dyn LineBuffer) -> Option<String>;
}

/// A source of input lines.
pub trait LineReader {
    /// Read one line without its terminator. `Ok(None)` means end of input.
    fn read_line(
        &mut self,
        prompt: &str,
        completer: &mut dyn TabComplete,
    ) -> io::Result<Option<String>>;
}

/// Reads lines from any buffered source. The prompt is not shown and
/// completion is never requested.
pub struct BufferedReader<R> {
    inner: R,
}

impl<R: BufRead> BufferedReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: BufRead> LineReader for BufferedReader<R> {
    fn read_line(
        &mut self,
        _prompt: &str,
        _completer: &mut dyn TabComplete,
    ) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        Ok(Some(line))
    }
}
