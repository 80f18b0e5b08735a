use std::path::PathBuf;

use anyhow::Context;
use assessrec::{
   cmd::{
      recommend::{self, RecommendOptions},
      serve::{self, ServeOptions},
   },
   config::{self, Config},
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "assessrec", version, about = "Recommend assessments for a job description")]
struct Cli {
   /// Config file used in place of ./assessrec.toml
   #[arg(long, global = true, env = "ASSESSREC_CONFIG")]
   config: Option<PathBuf>,

   /// Catalog JSON file
   #[arg(long, global = true)]
   catalog: Option<PathBuf>,

   #[command(subcommand)]
   command: Command,
}

#[derive(Subcommand)]
enum Command {
   /// Rank the catalog against a job description
   Recommend {
      query: String,

      /// Maximum duration in minutes (0 disables the filter)
      #[arg(short = 'd', long, default_value_t = config::DEFAULT_MAX_DURATION)]
      max_duration: f64,

      #[arg(long)]
      json: bool,

      /// Disable colors and hyperlinks
      #[arg(long)]
      plain: bool,
   },

   /// Serve the HTTP API
   Serve {
      #[arg(short, long)]
      bind: Option<String>,

      /// Do not rebuild when the catalog changes
      #[arg(long)]
      no_watch: bool,
   },
}

fn init_tracing() {
   let filter =
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("assessrec=info"));
   tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(std::io::stderr)
      .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   let cli = Cli::parse();
   init_tracing();

   let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
   if let Some(catalog) = cli.catalog {
      config.catalog = catalog;
   }

   rayon::ThreadPoolBuilder::new()
      .num_threads(config.threads)
      .build_global()
      .context("failed to size worker pool")?;

   match cli.command {
      Command::Recommend { query, max_duration, json, plain } => {
         let options = RecommendOptions { max_duration, json, plain };
         recommend::execute(query, options, &config).await?;
      },
      Command::Serve { bind, no_watch } => {
         serve::execute(ServeOptions { bind, no_watch }, &config).await?;
      },
   }

   Ok(())
}
