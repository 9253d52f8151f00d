use std::io::Cursor;
use std::path::Path;

use compio::{fs::File, io::AsyncReadExt, io::BufReader};
use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;

use crate::application::RuntimeConfig;
use crate::commands::{BatchError, Executor, run_batch};

pub struct Application;

impl Application {
    /// Reads the batch file, applies it command by command and, on full
    /// success, prints the resulting tree dump to stdout. Any failure
    /// surfaces as an error (and thus a non-zero exit status) without a
    /// dump being printed.
    pub async fn run(config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let config: RuntimeConfig = config.into();
        let input = Self::read_batch_file(&config.batch_file).await?;

        let mut executor = Executor::new();
        run_batch(&mut executor, &input).context(BatchAbortedSnafu)?;

        print!("{}", executor.root());
        Ok(())
    }

    async fn read_batch_file(path: &Path) -> Result<String, ApplicationError> {
        debug!("Opening batch file: {}", path.display());
        let file = File::open(path).await.context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;

        debug!("Reading batch file");
        let cursor = Cursor::new(file);
        let mut reader = BufReader::new(cursor);
        let res = reader.read_to_string(String::new()).await;
        match res.0 {
            Ok(n) => debug!("Successfully read batch file: {n} bytes"),
            _ => {
                res.0.context(ReadSnafu {
                    file_path: path.display().to_string(),
                })?;
            }
        }
        Ok(res.1)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to read the batch file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Batch execution aborted"))]
    BatchAbortedError { source: BatchError },
}
