use std::fs;
use std::path::Path;
use std::sync::Arc;

use polars::io::parquet::write::{ParquetCompression, ParquetWriter, StatisticsOptions};
use polars::prelude::*;

use crate::error::{ExportError, Result};

pub const SAMPLE_COLUMNS: [&str; 4] = ["TimeStamp", "TagID", "TagValue", "Quality"];

// sqlcmd renders datetime2 values as e.g. `2023-05-01 00:00:00.1234567`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parses one sample table export under the fixed column schema. The header
/// must match `SAMPLE_COLUMNS` exactly, in order; TimeStamp is parsed at
/// nanosecond resolution.
pub fn read_samples(path: &Path) -> Result<DataFrame> {
    let schema = Schema::from_iter([
        Field::new("TimeStamp".into(), DataType::String),
        Field::new("TagID".into(), DataType::Int32),
        Field::new("TagValue".into(), DataType::Float64),
        Field::new("Quality".into(), DataType::Int32),
    ]);

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(Some(Arc::new(schema)))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let found: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    if found != SAMPLE_COLUMNS {
        return Err(ExportError::SchemaMismatch {
            path: path.to_path_buf(),
            found,
        });
    }

    let df = df
        .lazy()
        .with_column(col("TimeStamp").str().to_datetime(
            Some(TimeUnit::Nanoseconds),
            None,
            StrptimeOptions {
                format: Some(TIMESTAMP_FORMAT.into()),
                ..Default::default()
            },
            lit("raise"),
        ))
        .collect()?;

    Ok(df)
}

/// Converts a sample table export to parquet, then deletes the delimited
/// source file. Timestamps are coerced to microsecond resolution; precision
/// beyond that is truncated silently. On failure the source file is left in
/// place.
pub fn convert_and_cleanup(csv_path: &Path, parquet_path: &Path) -> Result<()> {
    let mut df = read_samples(csv_path)?
        .lazy()
        .with_column(col("TimeStamp").cast(DataType::Datetime(TimeUnit::Microseconds, None)))
        .collect()?;

    let file = fs::File::create(parquet_path)?;
    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Zstd(None))
        .with_statistics(StatisticsOptions::default())
        .finish(&mut df)?;

    fs::remove_file(csv_path)?;
    Ok(())
}
