use polars::prelude::*;
use tracing::{info, warn};

use crate::config::{DataLayout, RunConfig, METADATA_DATABASE};
use crate::error::Result;
use crate::sqlcmd::SqlExecutor;

const DATABASE_LIST_QUERY: &str =
    "set nocount on; print 'Database'; select name from sys.Databases where name like 'History%'";

/// Lists the history databases available on the server, in the order the
/// server returned them. Zero databases is not an error.
pub fn list_history_databases(
    executor: &dyn SqlExecutor,
    config: &RunConfig,
    layout: &DataLayout,
) -> Result<Vec<String>> {
    info!("listing history databases");

    let output = layout.database_list_csv(&config.site);
    if let Err(err) = executor.run(config, METADATA_DATABASE, DATABASE_LIST_QUERY, &output) {
        warn!(error = %err, "database listing command failed, reading whatever output exists");
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(output))?
        .finish()?;

    let names: Vec<String> = df
        .column("Database")?
        .str()?
        .into_iter()
        .flatten()
        .map(String::from)
        .collect();

    info!(count = names.len(), "history databases found");
    Ok(names)
}
