use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glob::glob;

use fitshdr_core::{FileEntry, HeaderRecord, HeaderTable};

/// Expand `-i` inputs into concrete header file paths. Each input is
/// either a list file (an existing non-JSON file naming one header
/// file per line), or a glob pattern over header files.
pub fn expand_inputs(inputs: &[String], single: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        let ext = path.extension().and_then(|e| e.to_str());
        if path.exists() && ext.map_or(true, |e| !e.eq_ignore_ascii_case("json")) {
            files.extend(read_file_list(path)?);
        } else {
            let matches =
                glob(input).with_context(|| format!("bad input pattern {input:?}"))?;
            for entry in matches {
                files.push(entry?);
            }
        }
    }
    for file in &files {
        if !file.exists() {
            tracing::warn!(file = %file.display(), "input file does not exist");
        }
    }
    if single {
        files.truncate(1);
    }
    Ok(files)
}

/// Read a list file: one path per line, `#` lines are comments, paths
/// taken relative to the list file's directory.
pub fn read_file_list(path: &Path) -> Result<Vec<PathBuf>> {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read list {path:?}"))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| dir.join(line))
        .collect())
}

/// Load header records from JSON files into a table. A file holds one
/// JSON object, or an array of objects for multi-extension data; each
/// record gets FILENAME and OPENNAME keywords when it lacks them.
pub fn load_table(paths: &[PathBuf]) -> Result<HeaderTable> {
    let mut table = HeaderTable::new();
    for path in paths {
        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {path:?}"))?;
        let value: serde_json::Value = serde_json::from_str(&contents)
            .with_context(|| format!("invalid header JSON in {path:?}"))?;
        let objects = match value {
            serde_json::Value::Array(items) => items,
            other => vec![other],
        };
        for object in &objects {
            let mut header = HeaderRecord::from_json(object)
                .with_context(|| format!("unsupported header value in {path:?}"))?;
            let open_name = path.display().to_string();
            if !header.contains("FILENAME") {
                let base = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| open_name.clone());
                header.insert("FILENAME", base.as_str());
            }
            if !header.contains("OPENNAME") {
                header.insert("OPENNAME", open_name.as_str());
            }
            table.push(FileEntry::new(open_name, header));
        }
    }
    Ok(table)
}

/// Expand and load in one step.
pub fn load_inputs(inputs: &[String], single: bool) -> Result<HeaderTable> {
    let files = expand_inputs(inputs, single)?;
    if files.is_empty() {
        bail!("no input files matched {inputs:?}");
    }
    load_table(&files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_header(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_headers_and_injects_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_header(dir.path(), "a.json", r#"{"OBJECT": "galaxy"}"#);
        let table = load_table(&[path.clone()]).unwrap();
        assert_eq!(table.len(), 1);
        let entry = &table.entries()[0];
        assert_eq!(entry.header.display_of("OBJECT"), "galaxy");
        assert_eq!(entry.header.display_of("FILENAME"), "a.json");
        assert_eq!(entry.header.display_of("OPENNAME"), path.display().to_string());
    }

    #[test]
    fn array_files_load_every_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_header(
            dir.path(),
            "multi.json",
            r#"[{"EXTNAME": "SCI"}, {"EXTNAME": "DQ"}]"#,
        );
        let table = load_table(&[path]).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn list_files_resolve_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        write_header(dir.path(), "a.json", r#"{"OBJECT": "galaxy"}"#);
        let list = dir.path().join("night1.list");
        fs::write(&list, "# first night\na.json\n\n").unwrap();
        let files = read_file_list(&list).unwrap();
        assert_eq!(files, vec![dir.path().join("a.json")]);
    }

    #[test]
    fn expand_treats_existing_non_json_as_list() {
        let dir = tempfile::tempdir().unwrap();
        write_header(dir.path(), "a.json", r#"{"OBJECT": "galaxy"}"#);
        write_header(dir.path(), "b.json", r#"{"OBJECT": "star"}"#);
        let list = dir.path().join("files.list");
        fs::write(&list, "a.json\nb.json\n").unwrap();

        let inputs = vec![list.display().to_string()];
        let files = expand_inputs(&inputs, false).unwrap();
        assert_eq!(files.len(), 2);

        let files = expand_inputs(&inputs, true).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn expand_globs_patterns() {
        let dir = tempfile::tempdir().unwrap();
        write_header(dir.path(), "a.json", "{}");
        write_header(dir.path(), "b.json", "{}");
        let pattern = dir.path().join("*.json").display().to_string();
        let files = expand_inputs(&[pattern], false).unwrap();
        assert_eq!(files.len(), 2);
    }
}
