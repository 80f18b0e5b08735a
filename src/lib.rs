//! Content-based assessment recommendation over a TF-IDF index of a catalog.

pub mod catalog;
pub mod cmd;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod search;
pub mod server;
pub mod snapshot;
pub mod sync;
pub mod text;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use search::recommend;
pub use snapshot::{IndexHandle, SharedIndex, load, load_with};
pub use types::{CatalogRecord, Recommendation};
