//! Canonicalization of catalog fields and query text.

use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};

static COMMA_RUN: LazyLock<Regex> =
   LazyLock::new(|| Regex::new(r",\s*").expect("valid comma pattern"));

static COMPETENCY_CODE: LazyLock<Regex> =
   LazyLock::new(|| Regex::new(r"\b[ABCPK]\b").expect("valid competency pattern"));

/// Expansion for a standalone single-letter competency code.
fn expand_code(code: &str) -> &'static str {
   match code {
      "A" => "Analytical",
      "B" => "Behavioral",
      "C" => "Cognitive",
      "P" => "Practical",
      "K" => "Knowledge",
      _ => unreachable!("pattern only matches known codes"),
   }
}

/// Normalizes free text: commas become spaces, standalone competency codes
/// are expanded, the result is lowercased and trimmed.
///
/// Codes are matched case-sensitively as whole words in a single pass, so
/// `"C"` expands while `"Cat"` and `"c"` do not.
pub fn normalize(text: &str) -> String {
   let spaced = COMMA_RUN.replace_all(text, " ");
   let expanded: Cow<'_, str> =
      COMPETENCY_CODE.replace_all(&spaced, |caps: &Captures<'_>| expand_code(&caps[0]));
   expanded.to_lowercase().trim().to_string()
}
