use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::catalog;
use crate::config::{DataLayout, RunConfig};
use crate::convert;
use crate::error::Result;
use crate::extract::{self, TableKind};
use crate::metadata;
use crate::sqlcmd::SqlExecutor;

/// One (database, table kind) pipeline result. `error` holds the rendered
/// failure when the extract/convert/cleanup triple did not complete.
#[derive(Debug, Serialize)]
pub struct TableOutcome {
    pub database: String,
    pub kind: TableKind,
    pub error: Option<String>,
}

impl TableOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub databases: Vec<String>,
    pub outcomes: Vec<TableOutcome>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Drives the whole export: tag metadata once, database enumeration once,
/// then the two table kinds for every discovered database.
///
/// Metadata and enumeration failures abort the run. A failure anywhere in a
/// table kind's extract/convert/cleanup sequence is logged with the database
/// and kind identified, recorded in the summary, and does not stop the run.
pub fn run(executor: &dyn SqlExecutor, config: &RunConfig, layout: &DataLayout) -> Result<RunSummary> {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();

    metadata::export_metadata(executor, config, layout)?;
    let databases = catalog::list_history_databases(executor, config, layout)?;

    let mut outcomes = Vec::with_capacity(databases.len() * TableKind::ALL.len());
    for database in &databases {
        info!(database = %database, "starting export");
        for kind in TableKind::ALL {
            let outcome = match export_table(executor, config, layout, database, kind) {
                Ok(()) => TableOutcome {
                    database: database.clone(),
                    kind,
                    error: None,
                },
                Err(err) => {
                    error!(database = %database, kind = %kind, error = %err, "table export failed");
                    TableOutcome {
                        database: database.clone(),
                        kind,
                        error: Some(err.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }
    }

    let summary = RunSummary {
        run_id,
        started_at,
        finished_at: Utc::now(),
        databases,
        outcomes,
    };
    info!(
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        "export run finished"
    );
    Ok(summary)
}

fn export_table(
    executor: &dyn SqlExecutor,
    config: &RunConfig,
    layout: &DataLayout,
    database: &str,
    kind: TableKind,
) -> Result<()> {
    let csv_path = extract::extract_table(executor, config, layout, database, kind)?;

    info!(database = %database, kind = %kind, "converting to parquet");
    let parquet_path = layout.table_parquet(&config.site, database, kind);
    convert::convert_and_cleanup(&csv_path, &parquet_path)?;

    info!(database = %database, kind = %kind, "table exported");
    Ok(())
}
