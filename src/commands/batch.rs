use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::commands::command::{Command, ParseError};
use crate::commands::executor::{CommandError, Executor};

/// Runs every line of a batch against the executor, strictly in input
/// order. The first failing line aborts the whole batch; mutations applied
/// by earlier lines are kept (no rollback).
pub fn run_batch(executor: &mut Executor, input: &str) -> Result<(), BatchError> {
    let mut executed = 0usize;
    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        debug!("Processing line {}: '{}'", line_number, line);

        let command = Command::parse(line).context(ParseSnafu { line: line_number })?;
        executor
            .apply(&command)
            .context(CommandSnafu { line: line_number })?;
        executed += 1;
    }

    info!("Batch completed: {} commands executed", executed);
    Ok(())
}

#[derive(Debug, Snafu)]
pub enum BatchError {
    #[snafu(display("Failed to parse command on line {}", line))]
    ParseError { line: usize, source: ParseError },
    #[snafu(display("Command on line {} failed", line))]
    CommandError { line: usize, source: CommandError },
}
