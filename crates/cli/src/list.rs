use std::path::PathBuf;

use anyhow::Result;

use fitshdr_core::parse_specs;

use crate::cli::{InputArgs, SearchArgs};
use crate::config::AppConfig;
use crate::files::load_inputs;
use crate::log::log_rows;
use crate::table;

pub fn run(
    input: InputArgs,
    search: SearchArgs,
    log: bool,
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
    tracing::info!(files = table.len(), specs = specs.len(), "searching headers");

    let filtered = table.search(&specs);
    if log {
        let results = filtered.query(&specs);
        let (headers, rows) = log_rows(&specs, &results);
        table::emit(&table::render(&headers, &rows), output.as_deref())?;
    } else {
        let mut text = filtered.idents().join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        table::emit(&text, output.as_deref())?;
    }
    eprintln!("{} files found.", filtered.len());
    Ok(())
}
