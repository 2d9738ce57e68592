use std::env;
use std::path::{Path, PathBuf};

use crate::extract::TableKind;

/// Database holding the tag manager tables and the server catalog views.
pub const METADATA_DATABASE: &str = "ProcessDataDB";

/// Connection target and site identity for one export run.
///
/// Built once at startup and passed by reference to every component.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub server: String,
    pub site: String,
    pub username: String,
    pub password: String,
}

impl RunConfig {
    /// Reads `SERVER`, `SITE`, `USERNAME` and `PASSWORD` from the process
    /// environment. Unset variables become empty strings and surface later
    /// as a failed sqlcmd invocation rather than an error here.
    pub fn from_env() -> Self {
        Self {
            server: env::var("SERVER").unwrap_or_default(),
            site: env::var("SITE").unwrap_or_default(),
            username: env::var("USERNAME").unwrap_or_default(),
            password: env::var("PASSWORD").unwrap_or_default(),
        }
    }
}

/// Computes every artifact path under the export data root.
///
/// The root and its `csv`/`parquet` subdirectories must already exist; they
/// are not created or pre-validated.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn metadata_csv(&self, site: &str) -> PathBuf {
        self.root.join(format!("{site}_metadata.csv"))
    }

    pub fn metadata_csv_gz(&self, site: &str) -> PathBuf {
        self.root.join(format!("{site}_metadata.csv.gz"))
    }

    pub fn database_list_csv(&self, site: &str) -> PathBuf {
        self.root.join(format!("{site}_dbs.csv"))
    }

    pub fn table_csv(&self, site: &str, database: &str, kind: TableKind) -> PathBuf {
        self.root.join("csv").join(format!("{site}_{database}_{kind}.csv"))
    }

    pub fn table_parquet(&self, site: &str, database: &str, kind: TableKind) -> PathBuf {
        self.root
            .join("parquet")
            .join(format!("{site}_{database}_{kind}.parquet"))
    }
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::new("./data")
    }
}
