use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use thiserror::Error;

use crate::config::RunConfig;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to launch sqlcmd: {source}")]
    Launch {
        #[source]
        source: std::io::Error,
    },

    #[error("sqlcmd exited with status {status}")]
    NonZeroExit { status: std::process::ExitStatus },
}

/// Executes one SQL query against a database on the configured server,
/// writing comma-delimited results (first line: the query's printed header)
/// to `output`.
pub trait SqlExecutor {
    fn run(
        &self,
        config: &RunConfig,
        database: &str,
        query: &str,
        output: &Path,
    ) -> Result<(), ExecutionError>;
}

/// Shells out to the `sqlcmd` command-line client. Blocks until the client
/// exits; no timeout is imposed, so a hung client hangs the run.
#[derive(Debug, Default)]
pub struct SqlcmdClient;

impl SqlcmdClient {
    pub fn new() -> Self {
        Self
    }
}

impl SqlExecutor for SqlcmdClient {
    fn run(
        &self,
        config: &RunConfig,
        database: &str,
        query: &str,
        output: &Path,
    ) -> Result<(), ExecutionError> {
        let status = Command::new("sqlcmd")
            .args(sqlcmd_args(config, database, query, output))
            .status()
            .map_err(|source| ExecutionError::Launch { source })?;

        if !status.success() {
            return Err(ExecutionError::NonZeroExit { status });
        }
        Ok(())
    }
}

// Field separator comma, headerless/trimmed output, results to file. The
// header line itself is printed by each query so it lands in the output.
fn sqlcmd_args(config: &RunConfig, database: &str, query: &str, output: &Path) -> Vec<OsString> {
    vec![
        "-S".into(),
        config.server.clone().into(),
        "-d".into(),
        database.into(),
        "-U".into(),
        config.username.clone().into(),
        "-P".into(),
        config.password.clone().into(),
        "-Q".into(),
        query.into(),
        "-s".into(),
        ",".into(),
        "-h".into(),
        "-1".into(),
        "-W".into(),
        "-o".into(),
        output.as_os_str().to_os_string(),
    ]
}
