//! Jobscrape CLI - one ingestion run per invocation

use anyhow::Context;
use clap::Parser;
use jobscrape::source::command::DEFAULT_SCRAPER_COMMAND;
use jobscrape::{ui, CommandSource, Configuration, FetchExecutor, JobAggregator, JobStore};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "jobscrape")]
#[command(version)]
#[command(about = "Aggregate job postings from external sources into a local SQLite store")]
#[command(long_about = r#"
Runs one ingestion pass:
  1. load and validate the search configuration
  2. back up the job database
  3. run every planned query against the scraper program
  4. validate, deduplicate, and sanitize the rows
  5. insert new postings in batches, skipping ones already stored

Meant to be triggered by an external scheduler such as cron.

Example config.json:
  {"scraper_config": {
     "site_names": ["indeed"],
     "search_terms": ["python"],
     "google_search_terms": ["python developer jobs"],
     "locations": ["London", "Paris"],
     "countries_indeed": ["UK"]}}
"#)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "CONFIG_PATH", default_value = "./config.json")]
    config: PathBuf,

    /// Directory for daily log files
    #[arg(short, long, env = "LOGS_DIR_PATH", default_value = "./logs")]
    logs_dir: PathBuf,

    /// Path to the SQLite database file
    #[arg(short, long, env = "DATABASE_PATH", default_value = "./job_scraper.db")]
    database: PathBuf,

    /// Scraper program: reads a request as JSON on stdin, prints job rows as JSON
    #[arg(short, long, env = "SCRAPER_COMMAND", default_value = DEFAULT_SCRAPER_COMMAND)]
    scraper: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = jobscrape::logging::init(&cli.logs_dir, cli.verbose)
        .with_context(|| format!("failed to initialize logging in {}", cli.logs_dir.display()))?;

    if let Err(e) = run(&cli) {
        tracing::error!("Run aborted: {:#}", e);
        ui::error(&format!("{:#}", e));
        return Err(e);
    }
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let started = Instant::now();

    ui::header("Job scraper run");
    ui::info("Config", &cli.config.display().to_string());
    ui::info("Database", &cli.database.display().to_string());
    ui::info("Scraper", &cli.scraper);

    let config = Configuration::load(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;

    jobscrape::config::ensure_parent_dir(&cli.database)?;
    let store = JobStore::new(&cli.database);
    let executor = FetchExecutor::new(CommandSource::new(&cli.scraper));
    let aggregator = JobAggregator::new(config, store, executor)?;

    if aggregator.queries().is_empty() {
        ui::warn("Configuration yields no search queries; nothing will be fetched.");
    }

    ui::phase("Fetching");
    let summary = aggregator.execute().context("ingestion run failed")?;

    let table = ui::summary_table(&summary.outcomes);
    if !table.is_empty() {
        println!("{}", table);
    }

    ui::phase("Summary");
    ui::summary_row("Queries:", summary.queries);
    ui::summary_row("Failed queries:", summary.failed_queries);
    ui::summary_row("Rows fetched:", summary.fetched);
    ui::summary_row("Valid rows:", summary.valid);
    ui::summary_row("New jobs stored:", summary.saved.inserted);
    ui::summary_row("Already stored:", summary.saved.ignored);
    ui::summary_row("Total in database:", aggregator.store().count()?);

    ui::timing(&format!("Finished in {:.1?}", started.elapsed()));
    ui::success("Run complete");
    Ok(())
}
