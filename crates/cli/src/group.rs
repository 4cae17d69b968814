use std::path::PathBuf;

use anyhow::Result;

use fitshdr_core::parse_specs;

use crate::cli::{InputArgs, SearchArgs};
use crate::config::AppConfig;
use crate::files::load_inputs;
use crate::table;

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

    // Search tokens double as the grouping key; with no tokens, fall
    // back to the configured keywords and group the whole collection.
    let keywords: Vec<String> = if specs.is_empty() {
        config.group_keywords()
    } else {
        specs.iter().map(|spec| spec.keyword.clone()).collect()
    };
    tracing::info!(files = table.len(), keys = keywords.len(), "grouping headers");

    let filtered = table.search(&specs);
    let groups = filtered.group(&keywords);

    let mut headers = vec!["Name".to_string()];
    headers.extend(keywords.iter().cloned());
    headers.push("N".to_string());
    let rows: Vec<Vec<String>> = groups
        .iter()
        .map(|group| {
            let mut row = vec![group.name()];
            row.extend(group.key.iter().map(|(_, value)| value.clone()));
            row.push(group.len().to_string());
            row
        })
        .collect();
    table::emit(&table::render(&headers, &rows), output.as_deref())?;
    eprintln!("{} files grouped.", filtered.len());
    Ok(())
}
