mod support;

use anyhow::Result;
use histex_core::catalog::list_history_databases;
use histex_core::config::METADATA_DATABASE;
use tempfile::tempdir;

use support::{Response, Script, ScriptedExecutor};

fn database_list_script(content: &str) -> Script {
    Script {
        database: METADATA_DATABASE.into(),
        query_contains: "sys.Databases".into(),
        response: Response::Content(content.into()),
    }
}

#[test]
fn enumeration_preserves_server_order() -> Result<()> {
    let dir = tempdir()?;
    let layout = support::layout_in(dir.path());
    let config = support::test_config("site1");

    let executor = ScriptedExecutor::new(vec![database_list_script(
        "Database\nHistory2024\nHistory2022\nHistory2023\n",
    )]);

    let names = list_history_databases(&executor, &config, &layout)?;
    assert_eq!(names, ["History2024", "History2022", "History2023"]);

    Ok(())
}

#[test]
fn zero_databases_is_not_an_error() -> Result<()> {
    let dir = tempdir()?;
    let layout = support::layout_in(dir.path());
    let config = support::test_config("site1");

    let executor = ScriptedExecutor::new(vec![database_list_script("Database\n")]);

    let names = list_history_databases(&executor, &config, &layout)?;
    assert!(names.is_empty());

    Ok(())
}
