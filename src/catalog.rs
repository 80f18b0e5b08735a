//! Reading catalog rows from a JSON array on disk.

use std::path::Path;

use tracing::debug;

use crate::{Result, error::Error, types::CatalogRecord};

pub fn load_catalog(path: &Path) -> Result<Vec<CatalogRecord>> {
   let content = std::fs::read_to_string(path)
      .map_err(|source| Error::CatalogRead { path: path.to_path_buf(), source })?;
   let records = parse_catalog(&content)
      .map_err(|source| Error::CatalogParse { path: path.to_path_buf(), source })?;

   debug!(path = %path.display(), records = records.len(), "read catalog");
   Ok(records)
}

pub fn parse_catalog(content: &str) -> serde_json::Result<Vec<CatalogRecord>> {
   serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
   use std::io::Write;

   use tempfile::NamedTempFile;

   use super::*;
   use crate::ErrorKind;

   #[test]
   fn reads_rows_in_order() {
      let mut file = NamedTempFile::new().unwrap();
      write!(
         file,
         r#"[
            {{"assessment_title": "Java 8", "duration_minutes": 30, "remote_indicator": "Yes"}},
            {{"assessment_title": "SQL", "duration_minutes": "N/A"}}
         ]"#
      )
      .unwrap();

      let records = load_catalog(file.path()).unwrap();
      assert_eq!(records.len(), 2);
      assert_eq!(records[0].title, "Java 8");
      assert_eq!(records[0].duration_minutes, Some(30.0));
      assert_eq!(records[1].duration_minutes, None);
   }

   #[test]
   fn missing_file_is_load_error() {
      let err = load_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
      assert!(matches!(err, Error::CatalogRead { .. }));
      assert_eq!(err.kind(), ErrorKind::Load);
   }

   #[test]
   fn malformed_json_is_load_error() {
      let mut file = NamedTempFile::new().unwrap();
      write!(file, "{{not json").unwrap();

      let err = load_catalog(file.path()).unwrap_err();
      assert!(matches!(err, Error::CatalogParse { .. }));
      assert_eq!(err.kind(), ErrorKind::Load);
   }

   #[test]
   fn empty_array_parses() {
      assert!(parse_catalog("[]").unwrap().is_empty());
   }
}
