use flate2::write::GzEncoder;
use flate2::Compression;
use polars::prelude::*;
use tracing::{info, warn};

use crate::config::{DataLayout, RunConfig, METADATA_DATABASE};
use crate::error::Result;
use crate::sqlcmd::SqlExecutor;

// The header line is printed by the query itself so it lands first in the
// output file, and Description is stripped of commas server-side to avoid
// colliding with the field separator.
const METADATA_QUERY: &str = "set nocount on; \
print 'TagID,TagName,Description,ChangeTimestamp,SourceUniqueTagID,Maximum,Minimum,EngUnits'; \
select [TagID],[TagName],REPLACE([Description], ',', '') AS [Description],[ChangeTimestamp],\
[SourceUniqueTagID],[Maximum],[Minimum],[EngUnits] from TagManager_Tags;";

/// Exports tag metadata to `<site>_metadata.csv` and rewrites it compressed
/// as `<site>_metadata.csv.gz`. The uncompressed file is retained.
pub fn export_metadata(
    executor: &dyn SqlExecutor,
    config: &RunConfig,
    layout: &DataLayout,
) -> Result<()> {
    info!("collecting tag metadata");

    let csv_path = layout.metadata_csv(&config.site);
    if let Err(err) = executor.run(config, METADATA_DATABASE, METADATA_QUERY, &csv_path) {
        warn!(error = %err, "metadata query command failed, reading whatever output exists");
    }

    // All columns stay strings so the compressed copy preserves the rows as
    // the client wrote them.
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(csv_path))?
        .finish()?;

    let gz_path = layout.metadata_csv_gz(&config.site);
    let mut encoder = GzEncoder::new(std::fs::File::create(&gz_path)?, Compression::default());
    CsvWriter::new(&mut encoder)
        .include_header(true)
        .finish(&mut df)?;
    encoder.try_finish()?;

    info!(rows = df.height(), "tag metadata exported");
    Ok(())
}
