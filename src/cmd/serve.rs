use std::{sync::Arc, time::Duration};

use tracing::info;

use crate::{
   Result,
   config::Config,
   server::{self, AppState},
   snapshot::SharedIndex,
   sync,
};

#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
   pub bind:     Option<String>,
   pub no_watch: bool,
}

/// Builds the initial index, then serves the API. Failing to build the first
/// index is fatal.
pub async fn execute(options: ServeOptions, config: &Config) -> Result<()> {
   let timeout = Duration::from_millis(config.build_timeout_ms);
   let handle = sync::build_from_file(&config.catalog, timeout).await?;
   info!(
      catalog = %config.catalog.display(),
      records = handle.len(),
      version = handle.version(),
      "initial index ready"
   );

   let index = Arc::new(SharedIndex::new(handle));

   let watcher = if config.watch && !options.no_watch {
      Some(sync::watch_catalog(
         Arc::clone(&index),
         config.catalog.clone(),
         Duration::from_millis(config.watch_debounce_ms),
         timeout,
      )?)
   } else {
      None
   };

   let bind = options.bind.as_deref().unwrap_or(&config.bind);
   let served = server::serve(AppState { index }, bind).await;

   if let Some(watcher) = watcher {
      watcher.stop();
   }
   served
}
