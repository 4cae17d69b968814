use std::path::PathBuf;

use anyhow::Result;

use fitshdr_core::{parse_specs, FileQueryResult, ValueSpec};

use crate::cli::{InputArgs, SearchArgs};
use crate::config::AppConfig;
use crate::files::load_inputs;
use crate::table;

/// Build a log table: one row per query result, a `file` column plus
/// one column per searched keyword.
pub fn log_rows(specs: &[ValueSpec], results: &[FileQueryResult]) -> (Vec<String>, Vec<Vec<String>>) {
    let mut headers = vec!["file".to_string()];
    headers.extend(specs.iter().map(|spec| spec.keyword.clone()));
    let rows = results
        .iter()
        .map(|result| {
            let mut row = vec![result.ident.clone()];
            row.extend(result.results.iter().map(|r| r.display.clone()));
            row
        })
        .collect();
    (headers, rows)
}

pub fn run(
    input: InputArgs,
    search: SearchArgs,
    output: Option<PathBuf>,
    config: &AppConfig,
) -> Result<()> {
    let inputs = if input.input.is_empty() {
        config.input_patterns()
    } else {
        input.input
    };
    let table = load_inputs(&inputs, input.single)?;
    let specs = parse_specs(&search.keywords, search.regex)?;
    tracing::info!(files = table.len(), "logging headers");

    let filtered = table.search(&specs);
    let results = filtered.query(&specs);
    let (headers, rows) = log_rows(&specs, &results);
    table::emit(&table::render(&headers, &rows), output.as_deref())?;
    eprintln!("{} files logged.", filtered.len());
    Ok(())
}
