//! Catalog file loading
//!
//! Datasets are JSON arrays of point records. Record-level validation lives
//! in `PointStore::load`; this module only gets the bytes parsed.

use crate::domain::types::CatalogRecord;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn load_catalog<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<CatalogRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;

    let records: Vec<CatalogRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog file {}", path.display()))?;

    info!(file = %path.display(), records = %records.len(), "catalog_file_read");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_catalog() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "p1", "lat": 41.0, "lng": 2.0, "title": "One",
                  "question": "Q1?", "answers": {{"correct": "a", "incorrect": ["b"]}}}},
                {{"id": "p2", "lat": 41.1, "lng": 2.1, "title": "Two",
                  "question": "Q2?", "answers": {{"correct": "c", "incorrect": ["d", "e"]}}}}
            ]"#
        )
        .unwrap();
        file.flush().unwrap();

        let records = load_catalog(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "p1");
        assert_eq!(records[1].answers.incorrect.len(), 2);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = load_catalog("/nonexistent/catalog.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_load_catalog_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not a json array").unwrap();
        file.flush().unwrap();

        let err = load_catalog(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
