//! command::run
//!
//! The dispatcher: parse, then execute, then translate failures into exit
//! codes and the one user-facing error message.
//!
//! This is the only place parse errors are printed. Help requests are not
//! failures: usage goes to the output sink and the exit code is 0.

use tracing::debug;

use super::{CancellationToken, Command, EXIT_SUCCESS, EXIT_USAGE};

/// Parse `args` with `cmd`, then execute it.
pub fn run_command(cmd: &mut dyn Command, args: &[String]) -> i32 {
    match parse_or_report(cmd, args) {
        Some(code) => code,
        None => cmd.execute(),
    }
}

/// Like [`run_command`], handing `cancel` to the resolved command.
pub fn run_command_with_cancel(
    cmd: &mut dyn Command,
    args: &[String],
    cancel: &CancellationToken,
) -> i32 {
    match parse_or_report(cmd, args) {
        Some(code) => code,
        None => cmd.execute_with_cancel(cancel),
    }
}

/// `None` when parsing succeeded; otherwise the exit code to return.
fn parse_or_report(cmd: &mut dyn Command, args: &[String]) -> Option<i32> {
    let err = match cmd.parse(args) {
        Ok(()) => return None,
        Err(err) => err,
    };

    if cmd.is_help_requested(&err) {
        debug!(command = %cmd.name(), "help requested");
        cmd.base().print(&format!("{}\n", cmd.usage()));
        return Some(EXIT_SUCCESS);
    }

    debug!(command = %cmd.name(), error = %err, "parse failed");
    let base = cmd.base();
    base.print_error(&format!("ERROR: {}\n", err));
    if let Some(naming) = cmd.as_help_naming() {
        let help_name = naming.full_help_command_name();
        if !help_name.is_empty() {
            base.print_error(&format!("Run '{}' for usage.\n", help_name));
        }
    }
    Some(EXIT_USAGE)
}
