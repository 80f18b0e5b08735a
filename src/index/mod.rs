//! TF-IDF vector space fitted once over a catalog's search documents.

use std::collections::HashMap;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;
use tracing::debug;

use crate::{
   Result,
   config::{MAX_FEATURES, MIN_DOC_FREQ},
   error::Error,
   text::Analyzer,
};

/// Vocabulary construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
   /// Terms must appear in at least this many documents.
   pub min_df:       usize,
   /// Vocabulary cap, keeping the terms most frequent across the corpus.
   pub max_features: usize,
   pub ngram_range:  (usize, usize),
   pub stop_words:   bool,
}

impl Default for IndexConfig {
   fn default() -> Self {
      Self {
         min_df:       MIN_DOC_FREQ,
         max_features: MAX_FEATURES,
         ngram_range:  (1, 2),
         stop_words:   true,
      }
   }
}

impl IndexConfig {
   fn analyzer(&self) -> Analyzer {
      Analyzer::new(self.ngram_range, self.stop_words)
   }
}

/// Fitted vocabulary, idf weights and the L2-normalized document-term matrix.
///
/// Rows follow catalog order; columns follow the lexicographically sorted
/// vocabulary.
#[derive(Debug, Clone)]
pub struct VectorSpaceModel {
   vocabulary: Vec<String>,
   term_index: HashMap<String, usize>,
   idf:        Array1<f64>,
   matrix:     Array2<f64>,
   analyzer:   Analyzer,
}

type TermCounts = HashMap<String, usize>;

fn count_terms(analyzer: &Analyzer, text: &str) -> TermCounts {
   let mut counts = TermCounts::new();
   for term in analyzer.terms(text) {
      *counts.entry(term).or_default() += 1;
   }
   counts
}

/// Keeps terms with enough document frequency, then the `max_features` most
/// frequent ones (ties by term ascending). Returns them sorted.
fn select_vocabulary(
   doc_freq: &HashMap<&str, usize>,
   term_freq: &HashMap<&str, usize>,
   config: &IndexConfig,
) -> Vec<String> {
   let mut kept: Vec<&str> = doc_freq
      .iter()
      .filter(|&(_, &df)| df >= config.min_df)
      .map(|(&term, _)| term)
      .collect();

   if kept.len() > config.max_features {
      kept.sort_unstable_by(|a, b| term_freq[b].cmp(&term_freq[a]).then_with(|| a.cmp(b)));
      kept.truncate(config.max_features);
   }

   kept.sort_unstable();
   kept.into_iter().map(ToString::to_string).collect()
}

fn l2_normalize(mut row: ndarray::ArrayViewMut1<'_, f64>) {
   let norm = row.dot(&row).sqrt();
   if norm > 0.0 {
      row.mapv_inplace(|v| v / norm);
   }
}

/// Fits the model over `documents`.
pub fn build(documents: &[String], config: &IndexConfig) -> Result<VectorSpaceModel> {
   if documents.is_empty() {
      return Err(Error::EmptyCatalog);
   }

   let analyzer = config.analyzer();
   let counts: Vec<TermCounts> =
      documents.par_iter().map(|doc| count_terms(&analyzer, doc)).collect();

   let mut doc_freq: HashMap<&str, usize> = HashMap::new();
   let mut term_freq: HashMap<&str, usize> = HashMap::new();
   for doc in &counts {
      for (term, &n) in doc {
         *doc_freq.entry(term.as_str()).or_default() += 1;
         *term_freq.entry(term.as_str()).or_default() += n;
      }
   }

   let vocabulary = select_vocabulary(&doc_freq, &term_freq, config);
   if vocabulary.is_empty() {
      return Err(Error::EmptyVocabulary { min_df: config.min_df });
   }

   let n_docs = documents.len() as f64;
   let idf: Array1<f64> = vocabulary
      .iter()
      .map(|term| ((1.0 + n_docs) / (1.0 + doc_freq[term.as_str()] as f64)).ln() + 1.0)
      .collect();

   let term_index: HashMap<String, usize> =
      vocabulary.iter().enumerate().map(|(i, t)| (t.clone(), i)).collect();

   let mut matrix = Array2::<f64>::zeros((documents.len(), vocabulary.len()));
   for (mut row, doc) in matrix.rows_mut().into_iter().zip(&counts) {
      for (term, &n) in doc {
         if let Some(&col) = term_index.get(term) {
            row[col] = n as f64 * idf[col];
         }
      }
      l2_normalize(row);
   }

   debug!(
      documents = documents.len(),
      candidates = doc_freq.len(),
      vocabulary = vocabulary.len(),
      "fitted tf-idf model"
   );

   Ok(VectorSpaceModel { vocabulary, term_index, idf, matrix, analyzer })
}

impl VectorSpaceModel {
   /// Projects normalized query text into the fitted space. Unknown terms are
   /// ignored; a query with no known term yields the zero vector.
   pub fn transform_query(&self, text: &str) -> Array1<f64> {
      let mut query = Array1::<f64>::zeros(self.vocabulary.len());
      for term in self.analyzer.terms(text) {
         if let Some(&col) = self.term_index.get(&term) {
            query[col] += 1.0;
         }
      }
      query *= &self.idf;
      l2_normalize(query.view_mut());
      query
   }

   pub fn vocabulary(&self) -> &[String] {
      &self.vocabulary
   }

   pub fn term_index(&self, term: &str) -> Option<usize> {
      self.term_index.get(term).copied()
   }

   pub fn idf(&self) -> ArrayView1<'_, f64> {
      self.idf.view()
   }

   pub fn matrix(&self) -> ArrayView2<'_, f64> {
      self.matrix.view()
   }

   pub fn n_documents(&self) -> usize {
      self.matrix.nrows()
   }

   pub fn n_terms(&self) -> usize {
      self.matrix.ncols()
   }
}
