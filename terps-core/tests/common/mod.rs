//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use terps_core::{CommandError, EditorState, Interpreter, InterpreterConfig, Signal};

/// A writer whose contents stay readable after it is moved into an interpreter.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    /// Drain and return everything written so far.
    pub fn take(&self) -> String {
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

/// An interpreter without built-ins holding `quit` (doc "exit") and an
/// undocumented `list`.
pub fn quit_and_list() -> (Interpreter, SharedBuf) {
    let out = SharedBuf::default();
    let mut interp = Interpreter::bare(InterpreterConfig::default())
        .unwrap()
        .with_output(out.clone());
    interp
        .register_command("quit", Some("exit"), |interp, args| {
            interp.write_line(&format!("bye {args}"))?;
            Ok(Signal::Stop)
        })
        .unwrap();
    interp
        .register_command("list", None, |interp, args| {
            interp.write_line(&format!("listing {args}"))?;
            Ok(Signal::Continue)
        })
        .unwrap();
    (interp, out)
}

/// Run the completion protocol to exhaustion for the cursor at the end of `line`.
pub fn complete_all(interp: &mut Interpreter, line: &str) -> Vec<String> {
    let state = EditorState::at_cursor(line, line.len());
    let text = state.text().to_string();
    let mut out = Vec::new();
    while let Some(candidate) = interp.complete(&text, out.len(), &state) {
        out.push(candidate);
    }
    out
}

pub fn noop(_: &mut Interpreter, _: &str) -> Result<Signal, CommandError> {
    Ok(Signal::Continue)
}
