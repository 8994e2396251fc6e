// src/load/paths.rs

use std::path::{Path, PathBuf};

pub const XLSX_EXTENSION: &str = ".xlsx";
pub const CSV_EXTENSION: &str = ".csv";

/// Accept `raw` only if it names an existing file ending in `extension`
/// (case-insensitive). Messages are shown verbatim by clap.
pub fn validate_input_path(raw: &str, extension: &str) -> Result<PathBuf, String> {
    let path = Path::new(raw);
    if !path.is_file() {
        return Err(format!("{raw} does not exist."));
    }
    if !raw.to_lowercase().ends_with(extension) {
        return Err(format!("{raw} is not of type {extension}"));
    }
    Ok(path.to_path_buf())
}

pub fn xlsx_path(raw: &str) -> Result<PathBuf, String> {
    validate_input_path(raw, XLSX_EXTENSION)
}

pub fn csv_path(raw: &str) -> Result<PathBuf, String> {
    validate_input_path(raw, CSV_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn accepts_existing_file_any_case() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("Funcionarios.XLSX");
        File::create(&p).unwrap();
        let raw = p.to_str().unwrap();
        assert_eq!(xlsx_path(raw).unwrap(), p);
    }

    #[test]
    fn rejects_missing_file() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("nope.csv");
        let raw = p.to_str().unwrap();
        assert_eq!(csv_path(raw).unwrap_err(), format!("{raw} does not exist."));
    }

    #[test]
    fn rejects_wrong_extension_and_directories() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("data.txt");
        File::create(&p).unwrap();
        let raw = p.to_str().unwrap();
        assert_eq!(
            csv_path(raw).unwrap_err(),
            format!("{raw} is not of type .csv")
        );

        let d = dir.path().to_str().unwrap();
        assert!(csv_path(d).is_err());
    }
}
