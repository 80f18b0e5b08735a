use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse classification used by the front ends to map failures onto their
/// transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
   /// Catalog could not be read or the index could not be produced from it.
   Load,
   /// The catalog is unusable for indexing, or settings are invalid.
   Configuration,
   /// The caller sent something it can correct.
   Validation,
   /// Unexpected failure while projecting or scoring a query.
   Computation,
}

impl ErrorKind {
   pub const fn code(self) -> &'static str {
      match self {
         Self::Load => "load_failed",
         Self::Configuration => "configuration_invalid",
         Self::Validation => "invalid_request",
         Self::Computation => "processing_error",
      }
   }
}

#[derive(Debug, Error)]
pub enum Error {
   #[error("failed to read catalog {}: {source}", path.display())]
   CatalogRead {
      path:   PathBuf,
      #[source]
      source: std::io::Error,
   },

   #[error("failed to parse catalog {}: {source}", path.display())]
   CatalogParse {
      path:   PathBuf,
      #[source]
      source: serde_json::Error,
   },

   #[error("index build timed out after {0}ms")]
   BuildTimeout(u64),

   #[error("index build task aborted: {0}")]
   BuildAborted(String),

   #[error("catalog is empty")]
   EmptyCatalog,

   #[error("no term occurs in at least {min_df} documents")]
   EmptyVocabulary { min_df: usize },

   #[error("invalid configuration: {0}")]
   Config(#[from] Box<figment::Error>),

   #[error("query text is empty")]
   EmptyQuery,

   #[error("maximum duration must be a number")]
   InvalidDuration,

   #[error("invalid request body: {0}")]
   InvalidBody(String),

   #[error("query vector has {found} dimensions, model has {expected}")]
   DimensionMismatch { expected: usize, found: usize },

   #[error("non-finite similarity for record {ordinal}")]
   NonFiniteScore { ordinal: usize },

   #[error("catalog watcher failed: {0}")]
   Watch(#[from] notify::Error),

   #[error(transparent)]
   Io(#[from] std::io::Error),

   #[error(transparent)]
   Json(#[from] serde_json::Error),
}

impl Error {
   pub const fn kind(&self) -> ErrorKind {
      match self {
         Self::CatalogRead { .. }
         | Self::CatalogParse { .. }
         | Self::BuildTimeout(_)
         | Self::BuildAborted(_)
         | Self::Watch(_)
         | Self::Io(_) => ErrorKind::Load,
         Self::EmptyCatalog | Self::EmptyVocabulary { .. } | Self::Config(_) => {
            ErrorKind::Configuration
         },
         Self::EmptyQuery | Self::InvalidDuration | Self::InvalidBody(_) => {
            ErrorKind::Validation
         },
         Self::DimensionMismatch { .. } | Self::NonFiniteScore { .. } | Self::Json(_) => {
            ErrorKind::Computation
         },
      }
   }
}

impl From<figment::Error> for Error {
   fn from(err: figment::Error) -> Self {
      Self::Config(Box::new(err))
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn kinds_map_to_stable_codes() {
      assert_eq!(Error::EmptyQuery.kind().code(), "invalid_request");
      assert_eq!(Error::InvalidBody("eof".into()).kind().code(), "invalid_request");
      assert_eq!(Error::EmptyCatalog.kind().code(), "configuration_invalid");
      assert_eq!(Error::NonFiniteScore { ordinal: 3 }.kind().code(), "processing_error");
      assert_eq!(Error::BuildTimeout(10).kind().code(), "load_failed");
   }

   #[test]
   fn vocabulary_error_is_configuration() {
      let err = Error::EmptyVocabulary { min_df: 2 };
      assert_eq!(err.kind(), ErrorKind::Configuration);
      assert!(err.to_string().contains('2'));
   }
}
