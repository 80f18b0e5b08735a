//! Term extraction: word tokens, stop-word removal, contiguous n-grams.

use std::sync::LazyLock;

use regex::Regex;

use super::stopwords::StopWords;

/// Maximal runs of two or more word characters.
static TOKEN: LazyLock<Regex> =
   LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"));

/// Turns text into the terms counted by the index.
///
/// Tokens are lowercased, stop words are removed, and n-grams of every size
/// in `ngram_range` are built over what remains. N-gram parts are joined with
/// a single space.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer {
   ngram_range: (usize, usize),
   stop_words:  Option<&'static StopWords>,
}

impl Default for Analyzer {
   fn default() -> Self {
      Self::new((1, 2), true)
   }
}

impl Analyzer {
   pub fn new(ngram_range: (usize, usize), stop_words: bool) -> Self {
      let min = ngram_range.0.max(1);
      let max = ngram_range.1.max(min);
      Self { ngram_range: (min, max), stop_words: stop_words.then(StopWords::english) }
   }

   pub const fn ngram_range(&self) -> (usize, usize) {
      self.ngram_range
   }

   /// Lowercased word tokens in document order, stop words removed.
   pub fn tokens(&self, text: &str) -> Vec<String> {
      let lowered = text.to_lowercase();
      TOKEN
         .find_iter(&lowered)
         .map(|m| m.as_str())
         .filter(|tok| !self.stop_words.is_some_and(|stop| stop.is_stop_word(tok)))
         .map(ToString::to_string)
         .collect()
   }

   /// All terms of `text`: every n-gram size in range, shorter sizes first.
   pub fn terms(&self, text: &str) -> Vec<String> {
      let tokens = self.tokens(text);
      let (min, max) = self.ngram_range;

      let mut terms = Vec::with_capacity(tokens.len() * (max - min + 1));
      if min == 1 {
         terms.extend(tokens.iter().cloned());
      }

      for n in min.max(2)..=max {
         if n > tokens.len() {
            break;
         }
         terms.extend(tokens.windows(n).map(|w| w.join(" ")));
      }

      terms
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn single_characters_are_not_tokens() {
      let analyzer = Analyzer::default();
      assert_eq!(analyzer.tokens("a c java x r"), vec!["java"]);
   }

   #[test]
   fn stop_words_removed_before_bigrams() {
      let analyzer = Analyzer::default();
      assert_eq!(
         analyzer.terms("Java and the Developer"),
         vec!["java", "developer", "java developer"]
      );
   }

   #[test]
   fn underscores_and_digits_are_word_characters() {
      let analyzer = Analyzer::default();
      assert_eq!(analyzer.tokens("remote_yes duration_45"), vec!["remote_yes", "duration_45"]);
   }

   #[test]
   fn punctuation_splits_tokens() {
      let analyzer = Analyzer::default();
      assert_eq!(analyzer.tokens("mid-professional (sql)"), vec!["mid", "professional", "sql"]);
   }

   #[test]
   fn stop_words_can_be_kept() {
      let analyzer = Analyzer::new((1, 1), false);
      assert_eq!(analyzer.terms("the java"), vec!["the", "java"]);
   }

   #[test]
   fn unicode_words_are_tokens() {
      let analyzer = Analyzer::default();
      assert_eq!(analyzer.tokens("Café Größe"), vec!["café", "größe"]);
   }

   #[test]
   fn empty_text_has_no_terms() {
      assert!(Analyzer::default().terms("").is_empty());
      assert!(Analyzer::default().terms("the of and").is_empty());
   }
}
