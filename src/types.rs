use serde::{Deserialize, Deserializer, Serialize};

/// Value of `remote_indicator` that marks a record as remotely deliverable.
pub const REMOTE_AFFIRMATIVE: &str = "Yes";

/// One assessment in the catalog. Identity is its position in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
   #[serde(rename = "assessment_title", default)]
   pub title:            String,
   #[serde(default)]
   pub description:      String,
   #[serde(default)]
   pub job_level:        String,
   #[serde(rename = "test_types_extracted", default)]
   pub test_types:       String,
   #[serde(default, deserialize_with = "lenient_minutes")]
   pub duration_minutes: Option<f64>,
   #[serde(default)]
   pub remote_indicator: String,
   #[serde(default)]
   pub url:              String,
   #[serde(alias = "adaptive_irt", default)]
   pub adaptive_support: String,
}

impl CatalogRecord {
   pub fn is_remote(&self) -> bool {
      self.remote_indicator == REMOTE_AFFIRMATIVE
   }

   /// Whole minutes, truncated toward zero.
   pub fn whole_minutes(&self) -> Option<i64> {
      self.duration_minutes.map(|m| m.trunc() as i64)
   }

   /// Individual entries of the comma-delimited test type field.
   pub fn test_type_list(&self) -> Vec<String> {
      self
         .test_types
         .split(',')
         .map(str::trim)
         .filter(|t| !t.is_empty())
         .map(ToString::to_string)
         .collect()
   }

   /// True when the duration is known and does not exceed `max_minutes`.
   pub fn fits_within(&self, max_minutes: f64) -> bool {
      self.duration_minutes.is_some_and(|d| d <= max_minutes)
   }
}

/// Accepts a number, a numeric string, or anything else as "unknown".
fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
   D: Deserializer<'de>,
{
   let value = serde_json::Value::deserialize(deserializer)?;
   let minutes = match value {
      serde_json::Value::Number(n) => n.as_f64(),
      serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
      _ => None,
   };
   Ok(minutes.filter(|m| m.is_finite()))
}

/// A ranked catalog entry borrowed from the snapshot it was scored against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation<'a> {
   pub record:  &'a CatalogRecord,
   /// Position of `record` in the catalog.
   pub ordinal: usize,
   /// Cosine similarity as a percentage, rounded to one decimal.
   pub score:   f64,
}
