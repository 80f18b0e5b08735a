//! Rebuilding the index from the catalog file and publishing it.

use std::{
   path::{Path, PathBuf},
   sync::Arc,
   time::Duration,
};

use notify_debouncer_mini::{
   DebounceEventResult, Debouncer, new_debouncer,
   notify::{RecommendedWatcher, RecursiveMode},
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, info, warn};

use crate::{
   Result,
   catalog::load_catalog,
   error::Error,
   snapshot::{self, IndexHandle, SharedIndex},
};

/// Reads the catalog and builds a snapshot off the async runtime.
pub async fn build_from_file(path: &Path, timeout: Duration) -> Result<IndexHandle> {
   let owned = path.to_path_buf();
   let task = tokio::task::spawn_blocking(move || snapshot::load(load_catalog(&owned)?));

   match tokio::time::timeout(timeout, task).await {
      Ok(Ok(built)) => built,
      Ok(Err(join)) => Err(Error::BuildAborted(join.to_string())),
      Err(_) => Err(Error::BuildTimeout(timeout.as_millis() as u64)),
   }
}

/// Builds a fresh snapshot and publishes it. On failure the published
/// snapshot is left as it was.
pub async fn rebuild(shared: &SharedIndex, path: &Path, timeout: Duration) -> Result<IndexHandle> {
   match build_from_file(path, timeout).await {
      Ok(handle) => {
         shared.publish(handle.clone());
         Ok(handle)
      },
      Err(e) => {
         warn!(path = %path.display(), error = %e, "rebuild failed, keeping current index");
         Err(e)
      },
   }
}

/// Keeps the debouncer alive and the rebuild task running.
pub struct CatalogWatcher {
   _debouncer: Debouncer<RecommendedWatcher>,
   task:       JoinHandle<()>,
}

impl CatalogWatcher {
   pub fn stop(self) {
      self.task.abort();
   }
}

fn touches(events: &DebounceEventResult, target: &Path) -> bool {
   match events {
      Ok(events) => events.iter().any(|e| e.path.file_name() == target.file_name()),
      Err(e) => {
         error!(error = %e, "catalog watch error");
         false
      },
   }
}

/// Watches the catalog's directory and rebuilds whenever the catalog changes.
///
/// The directory is watched rather than the file so that editors which
/// replace the file on save are still seen.
pub fn watch_catalog(
   shared: Arc<SharedIndex>,
   path: PathBuf,
   debounce: Duration,
   timeout: Duration,
) -> Result<CatalogWatcher> {
   let (tx, mut rx) = mpsc::unbounded_channel::<()>();
   let target = path.clone();

   let mut debouncer = new_debouncer(debounce, move |events: DebounceEventResult| {
      if touches(&events, &target) {
         let _ = tx.send(());
      }
   })?;

   let dir = match path.parent() {
      Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
      _ => PathBuf::from("."),
   };
   debouncer.watcher().watch(&dir, RecursiveMode::NonRecursive)?;
   info!(path = %path.display(), "watching catalog");

   let task = tokio::spawn(async move {
      while rx.recv().await.is_some() {
         // Coalesce changes that arrived while the previous build ran.
         while rx.try_recv().is_ok() {}
         debug!(path = %path.display(), "catalog changed");
         if let Ok(handle) = rebuild(&shared, &path, timeout).await {
            info!(version = handle.version(), records = handle.len(), "reloaded catalog");
         }
      }
   });

   Ok(CatalogWatcher { _debouncer: debouncer, task })
}
