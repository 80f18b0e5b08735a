//! Immutable catalog + model snapshots and the slot they are published in.

use std::{
   ops::Deref,
   sync::{
      Arc,
      atomic::{AtomicU64, Ordering},
   },
};

use parking_lot::RwLock;
use tracing::info;

use crate::{
   Result,
   document,
   index::{self, IndexConfig, VectorSpaceModel},
   types::CatalogRecord,
};

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Catalog and the model fitted over it. Row `i` of the model is record `i`.
#[derive(Debug)]
pub struct Snapshot {
   version: u64,
   catalog: Vec<CatalogRecord>,
   model:   VectorSpaceModel,
}

impl Snapshot {
   pub const fn version(&self) -> u64 {
      self.version
   }

   pub fn catalog(&self) -> &[CatalogRecord] {
      &self.catalog
   }

   pub const fn model(&self) -> &VectorSpaceModel {
      &self.model
   }

   pub fn len(&self) -> usize {
      self.catalog.len()
   }

   pub fn is_empty(&self) -> bool {
      self.catalog.is_empty()
   }
}

/// Cheaply clonable, read-only handle on one snapshot.
#[derive(Debug, Clone)]
pub struct IndexHandle(Arc<Snapshot>);

impl Deref for IndexHandle {
   type Target = Snapshot;

   fn deref(&self) -> &Snapshot {
      &self.0
   }
}

impl IndexHandle {
   pub fn ptr_eq(&self, other: &Self) -> bool {
      Arc::ptr_eq(&self.0, &other.0)
   }
}

/// Builds a snapshot with the fixed index configuration.
pub fn load(records: Vec<CatalogRecord>) -> Result<IndexHandle> {
   load_with(records, &IndexConfig::default())
}

pub fn load_with(records: Vec<CatalogRecord>, config: &IndexConfig) -> Result<IndexHandle> {
   let documents = document::compose_all(&records);
   let model = index::build(&documents, config)?;
   debug_assert_eq!(model.n_documents(), records.len());

   let version = NEXT_VERSION.fetch_add(1, Ordering::Relaxed);
   info!(version, records = records.len(), terms = model.n_terms(), "built catalog index");

   Ok(IndexHandle(Arc::new(Snapshot { version, catalog: records, model })))
}

/// The currently published snapshot. Readers clone the handle and release the
/// lock immediately; publishing replaces it in one swap.
#[derive(Debug)]
pub struct SharedIndex {
   current: RwLock<IndexHandle>,
}

impl SharedIndex {
   pub fn new(handle: IndexHandle) -> Self {
      Self { current: RwLock::new(handle) }
   }

   pub fn current(&self) -> IndexHandle {
      self.current.read().clone()
   }

   /// Publishes `handle` and returns the one it replaced.
   pub fn publish(&self, handle: IndexHandle) -> IndexHandle {
      let to = handle.version();
      let previous = std::mem::replace(&mut *self.current.write(), handle);
      info!(from = previous.version(), to, "published index");
      previous
   }
}
