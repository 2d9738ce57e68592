#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use histex_core::config::{DataLayout, RunConfig};
use histex_core::sqlcmd::{ExecutionError, SqlExecutor};

pub const SAMPLE_HEADER: &str = "TimeStamp,TagID,TagValue,Quality";

/// One canned sqlcmd response, matched on target database plus a query
/// fragment.
pub struct Script {
    pub database: String,
    pub query_contains: String,
    pub response: Response,
}

pub enum Response {
    /// Write this content to the requested output path and report success.
    Content(String),
    /// Report a failed invocation without writing anything.
    Fail,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub database: String,
    pub output: PathBuf,
}

pub struct ScriptedExecutor {
    scripts: Vec<Script>,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedExecutor {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self {
            scripts,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl SqlExecutor for ScriptedExecutor {
    fn run(
        &self,
        _config: &RunConfig,
        database: &str,
        query: &str,
        output: &Path,
    ) -> Result<(), ExecutionError> {
        self.calls.lock().unwrap().push(RecordedCall {
            database: database.to_string(),
            output: output.to_path_buf(),
        });

        let script = self
            .scripts
            .iter()
            .find(|s| s.database == database && query.contains(&s.query_contains))
            .unwrap_or_else(|| panic!("unexpected sqlcmd invocation against {database}: {query}"));

        match &script.response {
            Response::Content(content) => {
                fs::write(output, content).map_err(|source| ExecutionError::Launch { source })?;
                Ok(())
            }
            Response::Fail => Err(ExecutionError::Launch {
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "sqlcmd not found"),
            }),
        }
    }
}

pub fn test_config(site: &str) -> RunConfig {
    RunConfig {
        server: "srv1".into(),
        site: site.into(),
        username: "u".into(),
        password: "p".into(),
    }
}

/// Builds a layout rooted in `dir` with the csv/parquet subdirectories the
/// pipeline expects to already exist.
pub fn layout_in(dir: &Path) -> DataLayout {
    fs::create_dir_all(dir.join("csv")).unwrap();
    fs::create_dir_all(dir.join("parquet")).unwrap();
    DataLayout::new(dir)
}
