use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::command::{self, Command};
use crate::error::SequenceError;
use crate::sequence::GrowableSequence;

/// Runs driver commands against a sequence of strings, writing every reply
/// to `out`.
#[derive(Debug)]
pub struct Driver<W: Write> {
    sequence: GrowableSequence<String>,
    snapshot: GrowableSequence<String>,
    trace: bool,
    out: W,
}

impl<W: Write> Driver<W> {
    pub fn new(out: W, trace: bool) -> Self {
        Self { sequence: GrowableSequence::new(), snapshot: GrowableSequence::new(), trace, out }
    }

    pub fn new_with_tracing(out: W) -> Self {
        Self::new(out, true)
    }

    pub fn sequence(&self) -> &GrowableSequence<String> {
        &self.sequence
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Parses the whole script up front, so a malformed line runs nothing.
    pub fn run(&mut self, source: &str) -> Result<()> {
        let commands = command::parse_script(source).context("Failed to parse script")?;

        for command in &commands {
            self.execute(command)?;
        }

        Ok(())
    }

    pub fn execute(&mut self, command: &Command) -> Result<()> {
        debug!(%command, len = self.sequence.len(), capacity = self.sequence.capacity(), "executing");

        if self.trace {
            writeln!(self.out, "{:?} capacity {}", self.sequence, self.sequence.capacity())
                .context("Failed to write trace")?;
            writeln!(self.out, "> {}", command).context("Failed to write trace")?;
        }

        match self.apply(command) {
            Ok(Some(reply)) => writeln!(self.out, "{}", reply).context("Failed to write reply")?,
            Ok(None) => {},
            Err(e) => {
                warn!(%command, error = %e, "command failed");
                writeln!(self.out, "Error: {}", e).context("Failed to write reply")?;
            },
        }

        Ok(())
    }

    fn apply(&mut self, command: &Command) -> std::result::Result<Option<String>, SequenceError> {
        let reply = match command {
            Command::Push(value) => {
                self.sequence.push(value.clone());
                None
            },
            Command::Pop => {
                self.sequence.pop();
                None
            },
            Command::Top => Some(self.sequence.top()?),
            Command::Peek(distance) => Some(self.sequence.peek(*distance)?.clone()),
            Command::Get(index) => Some(self.sequence.get(*index)?.clone()),
            Command::Set(index, value) => {
                *self.sequence.get_mut(*index)? = value.clone();
                None
            },
            Command::Size => Some(self.sequence.len().to_string()),
            Command::Capacity => Some(self.sequence.capacity().to_string()),
            Command::Empty => Some(self.sequence.is_empty().to_string()),
            Command::Clear => {
                self.sequence.clear();
                None
            },
            Command::Reserve(capacity) => {
                self.sequence.try_resize(*capacity)?;
                None
            },
            Command::Print => Some(braces(self.sequence.iter())),
            Command::Reverse => Some(braces(self.sequence.iter().rev())),
            Command::Copy => {
                self.snapshot.clone_from(&self.sequence);
                None
            },
            Command::Restore => {
                self.sequence.clone_from(&self.snapshot);
                None
            },
        };

        Ok(reply)
    }
}

fn braces<'a, I: Iterator<Item = &'a String>>(items: I) -> String {
    let mut out = String::from("{");
    for item in items {
        out.push(' ');
        out.push_str(item);
    }
    out.push_str(" }");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> String {
        let mut driver = Driver::new(Vec::new(), false);
        driver.run(script).unwrap();
        String::from_utf8(driver.into_output()).unwrap()
    }

    #[test]
    fn queries_reply_one_line_each() {
        let output = run("push 5\npush 3\npush 9\nsize\ntop\ncapacity\npop\ntop\nclear\nsize\ncapacity\nempty");
        assert_eq!(output, "3\n9\n4\n3\n0\n4\ntrue\n");
    }

    #[test]
    fn empty_access_is_reported_and_script_continues() {
        let output = run("top\npeek 0\npush a\ntop");
        assert_eq!(
            output,
            "Error: Unable to reference the element from an empty stack\n\
             Error: Unable to reference the element from an empty stack\n\
             a\n"
        );
    }

    #[test]
    fn print_and_reverse() {
        assert_eq!(run("print"), "{ }\n");
        assert_eq!(run("push a\npush b\npush c\nprint\nreverse"), "{ a b c }\n{ c b a }\n");
    }

    #[test]
    fn set_and_get_are_checked() {
        let output = run("push a\nset 0 z\nget 0\nset 1 y\nget 5");
        assert_eq!(
            output,
            "z\n\
             Error: Index 1 is out of range for a stack of 1 elements\n\
             Error: Index 5 is out of range for a stack of 1 elements\n"
        );
    }

    #[test]
    fn restore_brings_back_the_copy() {
        let output = run("push a\npush b\ncopy\npop\npush c\nprint\nrestore\nprint");
        assert_eq!(output, "{ a c }\n{ a b }\n");
    }

    #[test]
    fn impossible_reserve_is_reported_and_script_continues() {
        let output = run("push a\nreserve 18446744073709551615\nsize\nreserve 8\ncapacity\nprint");
        assert_eq!(output, "Error: Unable to reserve 18446744073709551615 slots\n1\n8\n{ a }\n");
    }

    #[test]
    fn peek_past_bottom_is_out_of_range() {
        let output = run("push a\npush b\npeek 1\npeek 2");
        assert_eq!(output, "a\nError: Index 2 is out of range for a stack of 2 elements\n");
    }

    #[test]
    fn malformed_script_runs_nothing() {
        let mut driver = Driver::new(Vec::new(), false);
        let error = driver.run("push a\nbogus").unwrap_err();
        assert!(format!("{:#}", error).contains("[2]: Unknown command 'bogus'"));
        assert!(driver.sequence().is_empty());
    }

    #[test]
    fn tracing_shows_state_before_each_command() {
        let mut driver = Driver::new_with_tracing(Vec::new());
        driver.run("push x\nsize").unwrap();
        let output = String::from_utf8(driver.into_output()).unwrap();
        assert_eq!(output, "[] capacity 0\n> push x\n[\"x\"] capacity 1\n> size\n1\n");
    }
}
