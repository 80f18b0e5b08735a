use std::path::{Path, PathBuf};

use directories::BaseDirs;
use figment::{
   Figment,
   providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Number of recommendations returned per query.
pub const TOP_K: usize = 10;

pub const MIN_DOC_FREQ: usize = 2;
pub const MAX_FEATURES: usize = 10_000;

/// Field repetition factors used when composing search documents.
pub const TITLE_WEIGHT: usize = 3;
pub const DESCRIPTION_WEIGHT: usize = 2;

/// Default upper bound offered by the interactive form, in minutes.
pub const DEFAULT_MAX_DURATION: f64 = 60.0;

pub const MAX_THREADS: usize = 8;

pub const ENV_PREFIX: &str = "ASSESSREC_";

pub fn default_threads() -> usize {
   (num_cpus::get() - 1).clamp(1, MAX_THREADS)
}

pub fn data_dir() -> PathBuf {
   BaseDirs::new().map_or_else(
      || PathBuf::from(".assessrec"),
      |dirs| dirs.home_dir().join(".assessrec"),
   )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
   /// JSON catalog the index is built from.
   pub catalog:           PathBuf,
   /// Address the HTTP API binds to.
   pub bind:              String,
   /// Upper bound for one index build, in milliseconds.
   pub build_timeout_ms:  u64,
   /// Rebuild when the catalog file changes.
   pub watch:             bool,
   pub watch_debounce_ms: u64,
   pub threads:           usize,
}

impl Default for Config {
   fn default() -> Self {
      Self {
         catalog:           data_dir().join("catalog.json"),
         bind:              "0.0.0.0:8000".to_string(),
         build_timeout_ms:  60_000,
         watch:             true,
         watch_debounce_ms: 500,
         threads:           default_threads(),
      }
   }
}

impl Config {
   /// Loads defaults, then `~/.assessrec/config.toml`, then `./assessrec.toml`
   /// (or `explicit` in its place), then `ASSESSREC_*` environment variables.
   pub fn load(explicit: Option<&Path>) -> Result<Self> {
      let mut figment = Figment::from(Serialized::defaults(Self::default()))
         .merge(Toml::file(data_dir().join("config.toml")));

      figment = match explicit {
         Some(path) => figment.merge(Toml::file_exact(path)),
         None => figment.merge(Toml::file("assessrec.toml")),
      };

      let config: Self = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
      Ok(config.sanitized())
   }

   fn sanitized(mut self) -> Self {
      self.threads = self.threads.clamp(1, MAX_THREADS);
      self.build_timeout_ms = self.build_timeout_ms.max(1);
      self
   }
}

#[cfg(test)]
mod tests {
   use std::io::Write;

   use tempfile::NamedTempFile;

   use super::*;

   #[test]
   fn defaults_are_sane() {
      let config = Config::default();
      assert!(config.catalog.ends_with("catalog.json"));
      assert!(config.watch);
      assert!((1..=MAX_THREADS).contains(&config.threads));
   }

   #[test]
   fn explicit_file_overrides_defaults() {
      let mut file = NamedTempFile::new().unwrap();
      writeln!(file, "bind = \"127.0.0.1:9100\"\nwatch = false\nthreads = 64").unwrap();

      let config = Config::load(Some(file.path())).unwrap();
      assert_eq!(config.bind, "127.0.0.1:9100");
      assert!(!config.watch);
      assert_eq!(config.threads, MAX_THREADS);
      assert_eq!(config.build_timeout_ms, 60_000);
   }

   #[test]
   fn missing_explicit_file_is_an_error() {
      let err = Config::load(Some(Path::new("/nonexistent/assessrec.toml"))).unwrap_err();
      assert_eq!(err.kind(), crate::ErrorKind::Configuration);
   }
}
