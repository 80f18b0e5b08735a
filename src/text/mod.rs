//! Text processing shared by document composition, indexing and querying.

pub mod normalize;
pub mod stopwords;
pub mod tokenize;

pub use normalize::normalize;
pub use tokenize::Analyzer;
