//! Result ranking utilities: duration filtering, score scaling and ordering.

use std::cmp::Ordering;

use crate::types::CatalogRecord;

/// A scored catalog row before it is bound to its record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
   pub ordinal: usize,
   pub score:   f64,
}

/// Ordinals of the records that pass the duration filter, in catalog order.
///
/// Without a limit every record is a candidate. With one, records of unknown
/// duration are excluded.
pub fn candidate_rows(catalog: &[CatalogRecord], max_duration: Option<f64>) -> Vec<usize> {
   match max_duration {
      None => (0..catalog.len()).collect(),
      Some(limit) => catalog
         .iter()
         .enumerate()
         .filter(|(_, record)| record.fits_within(limit))
         .map(|(i, _)| i)
         .collect(),
   }
}

/// Rounds to one decimal place, halves to even.
pub fn round_to_tenth(value: f64) -> f64 {
   (value * 10.0).round_ties_even() / 10.0
}

/// Cosine similarity as a percentage rounded to one decimal, in `[0, 100]`.
pub fn to_percentage(similarity: f64) -> f64 {
   round_to_tenth(similarity * 100.0).clamp(0.0, 100.0)
}

/// Descending by score, ties by catalog position ascending.
pub fn rank_order(a: &Scored, b: &Scored) -> Ordering {
   b.score.total_cmp(&a.score).then_with(|| a.ordinal.cmp(&b.ordinal))
}

/// Sorts `results` into rank order and keeps the first `limit`.
pub fn top_k(mut results: Vec<Scored>, limit: usize) -> Vec<Scored> {
   results.sort_by(rank_order);
   results.truncate(limit);
   results
}
