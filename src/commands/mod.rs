//! The batch-command layer: parsing one command per line and applying the
//! five structural operations (`md`, `mf`, `rm`, `cp`, `mv`) to the tree.

mod batch;
mod command;
mod executor;

pub use batch::{BatchError, run_batch};
pub use command::{Command, ParseError};
pub use executor::{CommandError, Executor};
