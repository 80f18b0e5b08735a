use std::time::Duration;

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
   Result,
   config::Config,
   search,
   server::RecommendResponse,
   sync,
   types::Recommendation,
};

pub const EMPTY_QUERY_WARNING: &str = "Please enter a job description";
pub const NO_RESULTS_WARNING: &str = "No assessments found matching your criteria";

const HEADERS: [&str; 7] = [
   "Assessment Name",
   "URL",
   "Remote Testing",
   "Adaptive/IRT",
   "Duration",
   "Test Type",
   "Similarity Score",
];

#[derive(Debug, Clone, Copy)]
pub struct RecommendOptions {
   /// Upper bound in minutes; zero means no bound.
   pub max_duration: f64,
   pub json:         bool,
   pub plain:        bool,
}

/// Zero disables the filter, anything else bounds it.
pub fn duration_filter(max_duration: f64) -> Option<f64> {
   (max_duration != 0.0).then_some(max_duration)
}

pub fn format_duration(minutes: Option<i64>) -> String {
   minutes.map_or_else(|| "N/A".to_string(), |m| format!("{m} mins"))
}

pub fn format_score(score: f64) -> String {
   format!("{score:.1}%")
}

fn hyperlink(url: &str, label: &str) -> String {
   format!("\x1b]8;;{url}\x1b\\{label}\x1b]8;;\x1b\\")
}

/// A rendered row: the text shown in each column, used for width.
fn row_cells(rec: &Recommendation<'_>) -> [String; 7] {
   let record = rec.record;
   [
      record.title.clone(),
      record.url.clone(),
      record.remote_indicator.clone(),
      record.adaptive_support.clone(),
      format_duration(record.whole_minutes()),
      record.test_types.clone(),
      format_score(rec.score),
   ]
}

fn column_widths(rows: &[[String; 7]]) -> [usize; 7] {
   let mut widths = HEADERS.map(console::measure_text_width);
   for row in rows {
      for (width, cell) in widths.iter_mut().zip(row) {
         *width = (*width).max(console::measure_text_width(cell));
      }
   }
   widths
}

fn print_table(query: &str, recommendations: &[Recommendation<'_>], plain: bool) {
   let rows: Vec<[String; 7]> = recommendations.iter().map(row_cells).collect();
   let widths = column_widths(&rows);

   let header = HEADERS
      .iter()
      .zip(widths)
      .map(|(h, w)| format!("{h:<w$}"))
      .collect::<Vec<_>>()
      .join("  ");
   let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ");

   if plain {
      println!("\nRecommendations for: {query}\n");
      println!("{header}\n{rule}");
   } else {
      println!("\n{}\n", style(format!("Recommendations for: {query}")).bold());
      println!("{}\n{}", style(header).bold().cyan(), style(rule).dim());
   }

   for row in &rows {
      let cells: Vec<String> = row
         .iter()
         .zip(widths)
         .enumerate()
         .map(|(col, (cell, w))| {
            let padded = format!("{cell:<w$}");
            match col {
               1 if !plain && !cell.is_empty() => {
                  let pad = " ".repeat(w - console::measure_text_width(cell));
                  format!("{}{pad}", hyperlink(cell, &style(cell).underlined().to_string()))
               },
               0 if !plain => style(padded).green().to_string(),
               6 if !plain => style(padded).bold().to_string(),
               _ => padded,
            }
         })
         .collect();
      println!("{}", cells.join("  ").trim_end());
   }
   println!();
}

fn warn(message: &str, plain: bool) {
   if plain {
      eprintln!("{message}");
   } else {
      let _ = Term::stderr().write_line(&style(message).yellow().to_string());
   }
}

pub async fn execute(query: String, options: RecommendOptions, config: &Config) -> Result<()> {
   if query.trim().is_empty() {
      warn(EMPTY_QUERY_WARNING, options.plain);
      return Ok(());
   }

   let timeout = Duration::from_millis(config.build_timeout_ms);
   let spinner = (!options.json && !options.plain).then(|| {
      let spinner = ProgressBar::new_spinner();
      if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
         spinner.set_style(template);
      }
      spinner.enable_steady_tick(Duration::from_millis(100));
      spinner.set_message("Loading assessment catalog...");
      spinner
   });

   let built = sync::build_from_file(&config.catalog, timeout).await;
   if let Some(spinner) = spinner {
      spinner.finish_and_clear();
   }
   let handle = built?;

   let recommendations = search::recommend(&handle, &query, duration_filter(options.max_duration))?;

   if options.json {
      let response = RecommendResponse::new(&query, &recommendations);
      println!("{}", serde_json::to_string_pretty(&response)?);
      return Ok(());
   }

   if recommendations.is_empty() {
      warn(NO_RESULTS_WARNING, options.plain);
      return Ok(());
   }

   print_table(&query, &recommendations, options.plain);
   Ok(())
}
