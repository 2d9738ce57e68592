use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::config::{DataLayout, RunConfig};
use crate::error::Result;
use crate::sqlcmd::SqlExecutor;

/// Which of the two historian sample tables to export. The handling is
/// identical; only the source table and the output file suffix differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Analog,
    Discrete,
}

impl TableKind {
    pub const ALL: [TableKind; 2] = [TableKind::Analog, TableKind::Discrete];

    pub fn source_table(self) -> &'static str {
        match self {
            TableKind::Analog => "Historian_AnalogTagData",
            TableKind::Discrete => "Historian_DiscreteTagData",
        }
    }

    pub fn file_suffix(self) -> &'static str {
        match self {
            TableKind::Analog => "analog",
            TableKind::Discrete => "discrete",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}

/// Downloads one sample table as a delimited file and returns its path.
///
/// No row-count or content validation happens here; an empty or malformed
/// result is only detected downstream by the converter.
pub fn extract_table(
    executor: &dyn SqlExecutor,
    config: &RunConfig,
    layout: &DataLayout,
    database: &str,
    kind: TableKind,
) -> Result<PathBuf> {
    let query = format!(
        "set nocount on; print 'TimeStamp,TagID,TagValue,Quality'; select * from {}",
        kind.source_table()
    );
    let output = layout.table_csv(&config.site, database, kind);

    info!(database = %database, kind = %kind, "downloading table");
    executor.run(config, database, &query, &output)?;

    Ok(output)
}
