// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs parses arguments and
// dispatches to these handlers.

pub mod nodes;
pub mod route;
pub mod suggest;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use campusnav_lib::{load_campus, resolve_data_source, Campus, DataSource};

/// Resolve the data source for `--data-dir` and load the campus from it.
pub fn load_campus_from(data_dir: Option<&Path>) -> Result<(DataSource, Campus)> {
    let source = resolve_data_source(data_dir).context("failed to locate campus data")?;
    let campus = load_campus(&source).with_context(|| match &source {
        DataSource::Builtin => "failed to load the builtin campus".to_string(),
        DataSource::Directory(dir) => {
            format!("failed to load campus data from {}", dir.display())
        }
    })?;
    Ok((source, campus))
}
