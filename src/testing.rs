//! testing
//!
//! Helpers for exercising commands in-process with captured output.
//!
//! A [`Harness`] wires two fresh buffers into a command's sinks (cascading
//! through parents) and returns what each call printed alongside its exit
//! code.
//!
//! ```
//! use cmdtree::command::Root;
//! use cmdtree::testing::Harness;
//!
//! let mut harness = Harness::new(Root::new("app"));
//! let captured = harness.run(&["help"]);
//! assert_eq!(captured.code, 0);
//! assert!(captured.stdout.contains("Usage:"));
//! ```

use crate::command::{run_command, run_command_with_cancel, CancellationToken, Command};
use crate::error::CommandError;
use crate::ui::SharedBuffer;

/// Output of one harness call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// A command wired to capture buffers.
pub struct Harness<C: Command> {
    command: C,
    out: SharedBuffer,
    err: SharedBuffer,
}

impl<C: Command> Harness<C> {
    pub fn new(mut command: C) -> Self {
        let out = SharedBuffer::new();
        let err = SharedBuffer::new();
        command.set_output_sink(out.sink());
        command.set_error_sink(err.sink());
        Self { command, out, err }
    }

    pub fn command(&self) -> &C {
        &self.command
    }

    pub fn command_mut(&mut self) -> &mut C {
        &mut self.command
    }

    pub fn usage(&self) -> String {
        self.command.usage()
    }

    /// Parse only; nothing is printed on failure.
    pub fn parse(&mut self, tokens: &[&str]) -> Result<(), CommandError> {
        self.command.parse(&args(tokens))
    }

    /// Execute the last successful parse.
    pub fn execute(&mut self) -> Captured {
        let code = self.command.execute();
        self.take(code)
    }

    /// Full dispatch: parse, execute, report.
    pub fn run(&mut self, tokens: &[&str]) -> Captured {
        let code = run_command(&mut self.command, &args(tokens));
        self.take(code)
    }

    pub fn run_with_cancel(&mut self, tokens: &[&str], cancel: &CancellationToken) -> Captured {
        let code = run_command_with_cancel(&mut self.command, &args(tokens), cancel);
        self.take(code)
    }

    fn take(&self, code: i32) -> Captured {
        let captured = Captured {
            code,
            stdout: self.out.contents(),
            stderr: self.err.contents(),
        };
        self.out.clear();
        self.err.clear();
        captured
    }
}

/// Owned tokens from string literals.
pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
