pub mod ranking;

use tracing::debug;

use crate::{
   config::TOP_K,
   error::{Error, Result},
   snapshot::IndexHandle,
   text::normalize,
   types::Recommendation,
};

use self::ranking::Scored;

/// Ranks the catalog of `handle` against `query`.
///
/// With `max_duration`, only records whose duration is known and does not
/// exceed it are scored. Returns at most [`TOP_K`] results, best first.
pub fn recommend<'a>(
   handle: &'a IndexHandle,
   query: &str,
   max_duration: Option<f64>,
) -> Result<Vec<Recommendation<'a>>> {
   if query.trim().is_empty() {
      return Err(Error::EmptyQuery);
   }
   if max_duration.is_some_and(f64::is_nan) {
      return Err(Error::InvalidDuration);
   }

   let normalized = normalize(query);
   let catalog = handle.catalog();
   let model = handle.model();

   let candidates = ranking::candidate_rows(catalog, max_duration);
   if candidates.is_empty() {
      debug!(?max_duration, "no candidates pass the duration filter");
      return Ok(Vec::new());
   }

   let query_vec = model.transform_query(&normalized);
   let matrix = model.matrix();
   if query_vec.len() != matrix.ncols() {
      return Err(Error::DimensionMismatch { expected: matrix.ncols(), found: query_vec.len() });
   }

   let scored = candidates
      .iter()
      .map(|&ordinal| {
         let similarity = matrix.row(ordinal).dot(&query_vec);
         if similarity.is_finite() {
            Ok(Scored { ordinal, score: ranking::to_percentage(similarity) })
         } else {
            Err(Error::NonFiniteScore { ordinal })
         }
      })
      .collect::<Result<Vec<_>>>()?;

   let ranked = ranking::top_k(scored, TOP_K);
   debug!(
      query = %normalized,
      candidates = candidates.len(),
      returned = ranked.len(),
      "ranked catalog"
   );

   Ok(ranked
      .into_iter()
      .map(|Scored { ordinal, score }| Recommendation { record: &catalog[ordinal], ordinal, score })
      .collect())
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::{
      index::IndexConfig,
      snapshot::{load, load_with},
      types::CatalogRecord,
   };

   fn record(title: &str, description: &str, minutes: Option<f64>) -> CatalogRecord {
      CatalogRecord {
         title: title.into(),
         description: description.into(),
         duration_minutes: minutes,
         ..Default::default()
      }
   }

   fn catalog() -> Vec<CatalogRecord> {
      vec![
         record("Java Programming", "core java skills", Some(30.0)),
         record("Python Programming", "python scripting skills", Some(45.0)),
         record("Java Enterprise", "enterprise java beans", None),
         record("Excel Basics", "spreadsheet skills", Some(15.0)),
      ]
   }

   #[test]
   fn empty_query_is_rejected() {
      let handle = load(catalog()).unwrap();
      for query in ["", "   ", "\t\n"] {
         let err = recommend(&handle, query, None).unwrap_err();
         assert!(matches!(err, Error::EmptyQuery));
      }
   }

   #[test]
   fn nan_duration_is_rejected() {
      let handle = load(catalog()).unwrap();
      let err = recommend(&handle, "java", Some(f64::NAN)).unwrap_err();
      assert!(matches!(err, Error::InvalidDuration));
   }

   #[test]
   fn best_match_first() {
      let handle = load(catalog()).unwrap();
      let results = recommend(&handle, "java skills", None).unwrap();
      assert_eq!(results.len(), 4);
      assert!(results[0].record.title.starts_with("Java"));
      assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
      assert!(results.iter().all(|r| (0.0..=100.0).contains(&r.score)));
   }

   #[test]
   fn duration_filter_excludes_unknown_and_longer() {
      let handle = load(catalog()).unwrap();
      let results = recommend(&handle, "java skills", Some(30.0)).unwrap();
      let ordinals: Vec<usize> = results.iter().map(|r| r.ordinal).collect();
      assert!(ordinals.contains(&0));
      assert!(ordinals.contains(&3));
      assert!(!ordinals.contains(&1));
      assert!(!ordinals.contains(&2));
   }

   #[test]
   fn filtering_keeps_each_record_score() {
      let handle = load(catalog()).unwrap();
      let all = recommend(&handle, "java skills", None).unwrap();
      let filtered = recommend(&handle, "java skills", Some(30.0)).unwrap();
      for r in &filtered {
         let same = all.iter().find(|a| a.ordinal == r.ordinal).unwrap();
         assert_eq!(same.score, r.score);
      }
   }

   #[test]
   fn nothing_fits_returns_empty() {
      let handle = load(catalog()).unwrap();
      assert!(recommend(&handle, "java", Some(5.0)).unwrap().is_empty());
   }

   #[test]
   fn out_of_vocabulary_query_scores_zero_in_catalog_order() {
      let handle = load(catalog()).unwrap();
      let results = recommend(&handle, "kubernetes", None).unwrap();
      assert!(results.iter().all(|r| r.score == 0.0));
      let ordinals: Vec<usize> = results.iter().map(|r| r.ordinal).collect();
      assert_eq!(ordinals, vec![0, 1, 2, 3]);
   }

   #[test]
   fn at_most_top_k() {
      let records: Vec<CatalogRecord> = (0..25)
         .map(|i| record(&format!("Java Test {i}"), "java", Some(f64::from(i))))
         .collect();
      let handle = load_with(records, &IndexConfig::default()).unwrap();
      let results = recommend(&handle, "java test", None).unwrap();
      assert_eq!(results.len(), TOP_K);
   }

   #[test]
   fn identical_queries_are_deterministic() {
      let handle = load(catalog()).unwrap();
      let a = recommend(&handle, "Python, K", Some(60.0)).unwrap();
      let b = recommend(&handle, "Python, K", Some(60.0)).unwrap();
      assert_eq!(a, b);
   }
}
