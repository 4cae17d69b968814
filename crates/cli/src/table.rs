use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Render rows as fixed-width text with a header line and a rule.
pub fn render(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if idx < widths.len() {
                widths[idx] = widths[idx].max(cell.len());
            }
        }
    }
    let mut out = String::new();
    push_row(&mut out, headers, &widths);
    let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Write rendered text to a file, or to stdout when no path is given.
pub fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {path:?}"))?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_line_up() {
        let headers = vec!["file".to_string(), "OBJECT".to_string()];
        let rows = vec![
            vec!["n1365_b.fits".to_string(), "galaxy".to_string()],
            vec!["hd.fits".to_string(), "star".to_string()],
        ];
        let text = render(&headers, &rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("file"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(
            lines[2].find("galaxy").unwrap(),
            lines[3].find("star").unwrap()
        );
    }
}
