//! Weighted search documents built from catalog records.

use crate::{
   config::{DESCRIPTION_WEIGHT, TITLE_WEIGHT},
   text::normalize,
   types::CatalogRecord,
};

/// Composes the indexed text of one record.
///
/// Fields appear in a fixed order: title (repeated), description (repeated),
/// job level, test types, a remote marker, and a duration marker when the
/// duration is known. Empty fields contribute nothing.
pub fn compose(record: &CatalogRecord) -> String {
   let mut parts: Vec<String> = Vec::with_capacity(TITLE_WEIGHT + DESCRIPTION_WEIGHT + 4);

   push_repeated(&mut parts, normalize(&record.title), TITLE_WEIGHT);
   push_repeated(&mut parts, normalize(&record.description), DESCRIPTION_WEIGHT);
   push_repeated(&mut parts, normalize(&record.job_level), 1);
   push_repeated(&mut parts, normalize(&record.test_types), 1);

   parts.push(if record.is_remote() { "remote_yes" } else { "remote_no" }.to_string());

   if let Some(minutes) = record.whole_minutes() {
      parts.push(format!("duration_{minutes}"));
   }

   parts.join(" ")
}

fn push_repeated(parts: &mut Vec<String>, field: String, times: usize) {
   if field.is_empty() {
      return;
   }
   parts.extend(std::iter::repeat_n(field, times));
}

/// Documents for a whole catalog, in catalog order.
pub fn compose_all(records: &[CatalogRecord]) -> Vec<String> {
   records.iter().map(compose).collect()
}

#[cfg(test)]
mod tests {
   use super::*;

   fn record() -> CatalogRecord {
      CatalogRecord {
         title: "Java Developer".into(),
         description: "Tests Java, SQL".into(),
         job_level: "Mid-Professional".into(),
         test_types: "K, P".into(),
         duration_minutes: Some(45.0),
         remote_indicator: "Yes".into(),
         ..Default::default()
      }
   }

   #[test]
   fn fields_are_weighted_in_order() {
      assert_eq!(
         compose(&record()),
         "java developer java developer java developer tests java sql tests java sql \
          mid-professional knowledge practical remote_yes duration_45"
      );
   }

   #[test]
   fn empty_fields_are_skipped() {
      let record = CatalogRecord { title: "Excel".into(), ..Default::default() };
      assert_eq!(compose(&record), "excel excel excel remote_no");
   }

   #[test]
   fn duration_is_truncated() {
      let record = CatalogRecord { duration_minutes: Some(29.9), ..Default::default() };
      assert_eq!(compose(&record), "remote_no duration_29");
   }

   #[test]
   fn non_affirmative_remote_values_are_no() {
      for value in ["yes", "No", "", "Y"] {
         let record = CatalogRecord { remote_indicator: value.into(), ..Default::default() };
         assert_eq!(compose(&record), "remote_no");
      }
   }
}
