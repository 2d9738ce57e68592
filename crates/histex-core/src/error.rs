use std::path::PathBuf;

use thiserror::Error;

use crate::sqlcmd::ExecutionError;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("sql client invocation failed: {0}")]
    Execution(#[from] ExecutionError),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("unexpected columns in {path}: found {found:?}")]
    SchemaMismatch { path: PathBuf, found: Vec<String> },
}

pub type Result<T> = std::result::Result<T, ExportError>;
