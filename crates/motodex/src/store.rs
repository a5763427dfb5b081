//! Reading and writing the catalog document

use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::record::Catalog;

/// Writes the catalog as pretty-printed UTF-8 JSON, replacing `path` wholesale
///
/// The document is staged in a sibling temp file and renamed into place, so
/// an interrupted write leaves any previous catalog untouched.
pub fn save<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
  let path = path.as_ref();
  let write_err = |source: std::io::Error| CatalogError::Io { path: path.to_path_buf(), source };

  let mut json = serde_json::to_string_pretty(catalog)?;
  json.push('\n');

  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
  staged.write_all(json.as_bytes()).map_err(write_err)?;
  staged.flush().map_err(write_err)?;
  staged.persist(path).map_err(|e| write_err(e.error))?;

  debug!(path = %path.display(), entries = catalog.total_entries, "catalog saved");
  Ok(())
}

/// Loads and decodes a catalog
pub fn load<P: AsRef<Path>>(path: P) -> Result<Catalog> {
  let path = path.as_ref();
  let content = read(path)?;
  let catalog: Catalog =
    serde_json::from_str(&content).map_err(|e| CatalogError::malformed(path, e))?;

  if !catalog.is_consistent() {
    warn!(
      declared = catalog.total_entries,
      actual = catalog.motorcycles.len(),
      "total_entries disagrees with record count"
    );
  }
  debug!(path = %path.display(), entries = catalog.motorcycles.len(), "catalog loaded");
  Ok(catalog)
}

/// Loads the document as untyped JSON so missing fields can be measured
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value> {
  let path = path.as_ref();
  let content = read(path)?;
  serde_json::from_str(&content).map_err(|e| CatalogError::malformed(path, e))
}

fn read(path: &Path) -> Result<String> {
  fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;
  use tempfile::TempDir;

  fn empty_catalog() -> Catalog {
    Catalog::new("Empty", "nothing here", NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(), vec![])
  }

  #[test]
  fn test_load_missing_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let err = load(temp.path().join("absent.json")).unwrap_err();
    assert!(err.is_not_found());
  }

  #[test]
  fn test_load_garbage_is_malformed() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, "{\"title\": ").unwrap();

    let err = load(&path).unwrap_err();
    assert!(matches!(err, CatalogError::MalformedDocument { .. }));
    assert!(load_document(&path).is_err());
  }

  #[test]
  fn test_wrong_shape_is_malformed() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("shape.json");
    fs::write(&path, r#"{"motorcycles": 3}"#).unwrap();

    assert!(matches!(load(&path), Err(CatalogError::MalformedDocument { .. })));
    assert!(load_document(&path).is_ok());
  }

  #[test]
  fn test_save_overwrites_existing_content() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.json");
    fs::write(&path, "stale content that is much longer than nothing").unwrap();

    save(&path, &empty_catalog()).unwrap();
    let loaded = load(&path).unwrap();
    assert_eq!(loaded, empty_catalog());
    assert!(!fs::read_to_string(&path).unwrap().contains("stale"));
  }

  #[test]
  fn test_save_into_missing_directory_fails_without_partial_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("no_such_dir").join("catalog.json");

    let err = save(&path, &empty_catalog()).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(!path.exists());
  }

  #[test]
  fn test_legacy_document_defaults_schema_version() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("legacy.json");
    fs::write(
      &path,
      r#"{"title": "t", "description": "d", "last_updated": "2023-01-02", "total_entries": 0, "motorcycles": []}"#,
    )
    .unwrap();

    assert_eq!(load(&path).unwrap().schema_version, 1);
  }
}
