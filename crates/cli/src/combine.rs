use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use fitshdr_core::{combine, masked_combine_with, CombineMethod, Cube};

fn read_cube(path: &Path) -> Result<Cube> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read cube {path:?}"))?;
    let cube: Cube =
        serde_json::from_str(&contents).with_context(|| format!("invalid cube JSON in {path:?}"))?;
    // reject cubes whose data does not fill the declared shape
    Cube::new(cube.planes, cube.rows, cube.cols, cube.data).map_err(Into::into)
}

fn parse_method(value: &str) -> Result<CombineMethod> {
    match value.to_lowercase().as_str() {
        "mean" => Ok(CombineMethod::Mean),
        "median" => Ok(CombineMethod::Median),
        other => Err(anyhow!(format!("unknown combine method {other}"))),
    }
}

pub fn run(
    cube_path: PathBuf,
    mask_path: Option<PathBuf>,
    method: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let method = parse_method(&method)?;
    let cube = read_cube(&cube_path)?;
    let image = match mask_path {
        Some(path) => {
            let mask = read_cube(&path)?;
            masked_combine_with(&cube, &mask, method)?
        }
        None => combine(&cube, method),
    };
    tracing::info!(
        planes = cube.planes,
        rows = image.rows,
        cols = image.cols,
        "combined cube"
    );
    let text = serde_json::to_string_pretty(&image)?;
    match output {
        Some(path) => {
            fs::write(&path, text).with_context(|| format!("failed to write {path:?}"))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_parse() {
        assert_eq!(parse_method("Mean").unwrap(), CombineMethod::Mean);
        assert_eq!(parse_method("median").unwrap(), CombineMethod::Median);
        assert!(parse_method("mode").is_err());
    }

    #[test]
    fn cube_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.json");
        fs::write(
            &path,
            r#"{"planes": 2, "rows": 1, "cols": 1, "data": [1.0, 3.0]}"#,
        )
        .unwrap();
        let cube = read_cube(&path).unwrap();
        let image = combine(&cube, CombineMethod::Mean);
        assert_eq!(image.data, vec![2.0]);
    }

    #[test]
    fn short_data_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.json");
        fs::write(
            &path,
            r#"{"planes": 2, "rows": 2, "cols": 2, "data": [1.0]}"#,
        )
        .unwrap();
        assert!(read_cube(&path).is_err());
    }
}
