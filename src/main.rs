//! Site-Scribe main entry point
//!
//! This is the command-line interface for the Site-Scribe website reader.

use anyhow::{Context, Result};
use clap::Parser;
use site_scribe::config::{load_config, load_questions, Config};
use site_scribe::output::{print_statistics, CrawlStatistics, ReportWriter};
use site_scribe::summarize::{summarize, Question};
use site_scribe::Crawler;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Answers shown in the terminal preview after a crawl
const PREVIEW_ANSWERS: usize = 5;
const PREVIEW_CHARS: usize = 80;

/// Site-Scribe: crawl a website and answer questions about it
///
/// Site-Scribe walks a single site breadth-first from a seed URL, extracts the
/// main content of every page, and writes a markdown content dump plus a
/// question-and-answer report with sources.
#[derive(Parser, Debug)]
#[command(name = "site-scribe")]
#[command(version)]
#[command(about = "Crawl a website and answer questions about it", long_about = None)]
struct Cli {
    /// The URL of the website to crawl
    #[arg(value_name = "URL")]
    url: String,

    /// Path to a YAML (or .toml) file containing questions to answer
    #[arg(short, long, value_name = "FILE")]
    questions: Option<PathBuf>,

    /// Output directory for generated files [default: output]
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to crawl [default: 50]
    #[arg(long)]
    max_pages: Option<usize>,

    /// Maximum link depth from the seed [default: 5]
    #[arg(long)]
    max_depth: Option<u32>,

    /// Delay between requests in seconds [default: 1.0]
    #[arg(long)]
    delay: Option<f64>,

    /// Request timeout in seconds [default: 30]
    #[arg(long)]
    timeout: Option<f64>,

    /// Render pages in a headless browser
    #[arg(long)]
    js: bool,

    /// Only generate the content dump, skip the Q&A report
    #[arg(long)]
    dump_only: bool,

    /// Validate configuration and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let seed = with_default_scheme(&cli.url);

    let questions = match &cli.questions {
        Some(path) => {
            tracing::info!("Loading questions from: {}", path.display());
            load_questions(path)
                .with_context(|| format!("Failed to load questions from {}", path.display()))?
        }
        None => Vec::new(),
    };

    let dump_only = config.output.dump_only || cli.questions.is_none();
    if cli.questions.is_none() && !config.output.dump_only {
        tracing::warn!("No questions file specified, running in dump-only mode");
    }

    if cli.dry_run {
        handle_dry_run(&config, &seed, &questions, dump_only)?;
        return Ok(());
    }

    handle_crawl(config, &seed, &questions, dump_only).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_scribe=info,warn"),
            1 => EnvFilter::new("site_scribe=debug,info"),
            2 => EnvFilter::new("site_scribe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(delay) = cli.delay {
        config.crawler.delay_seconds = delay;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.timeout_seconds = timeout;
    }
    if cli.js {
        config.crawler.js_mode = true;
    }
    if let Some(output) = &cli.output {
        config.output.directory = output.to_string_lossy().into_owned();
    }
    if cli.dump_only {
        config.output.dump_only = true;
    }

    site_scribe::config::validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Prefixes `https://` when the URL has no scheme
fn with_default_scheme(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(
    config: &Config,
    seed: &str,
    questions: &[Question],
    dump_only: bool,
) -> Result<()> {
    let seed_url = site_scribe::config::validate_seed(seed, config.crawler.query_policy())?;

    println!("=== Site-Scribe Dry Run ===\n");

    println!("Seed: {}", seed_url);

    println!("\nCrawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Delay: {}s", config.crawler.delay_seconds);
    println!("  Timeout: {}s", config.crawler.timeout_seconds);
    println!(
        "  Fetch mode: {}",
        if config.crawler.js_mode {
            "rendered"
        } else {
            "static"
        }
    );
    if config.crawler.js_mode {
        println!("  Render contexts: {}", config.crawler.render_contexts);
    }
    if let Some(deadline) = config.crawler.deadline_seconds {
        println!("  Deadline: {}s", deadline);
    }
    println!("  Drop query strings: {}", config.crawler.drop_query);

    println!(
        "\nAllowed Domains ({}):",
        config.crawler.allowed_domains.len()
    );
    for pattern in &config.crawler.allowed_domains {
        println!("  - {}", pattern);
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Dump only: {}", dump_only);

    println!("\nQuestions ({}):", questions.len());
    for question in questions {
        println!("  - [{}.{}] {}", question.category, question.key, question.text);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    seed: &str,
    questions: &[Question],
    dump_only: bool,
) -> Result<()> {
    let output_dir = PathBuf::from(&config.output.directory);

    let mut crawler = Crawler::new(config).context("Failed to initialize crawler")?;

    let cancel = crawler.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current page");
            cancel.cancel();
        }
    });

    let report = crawler.crawl(seed).await.context("Crawl failed")?;

    if report.corpus.is_empty() {
        tracing::warn!("No pages were successfully crawled");
    }

    let writer = ReportWriter::new(output_dir, &report)?;
    let mut generated = vec![writer.write_dump(&report)?];

    if !dump_only {
        let summary = summarize(&report.corpus, questions);
        generated.push(writer.write_summary(&summary)?);

        println!("\nSummary Preview:");
        for answer in summary.answers.iter().take(PREVIEW_ANSWERS) {
            let preview = answer
                .answer_text
                .as_deref()
                .map(preview_text)
                .unwrap_or_else(|| "(not found)".to_string());
            println!(
                "  [{}] {}\n      {}",
                answer.confidence, answer.question.text, preview
            );
        }
    }

    let index = writer.write_index(&generated)?;

    println!();
    print_statistics(&CrawlStatistics::from_report(&report));
    println!("\nFiles generated: {}", generated.len() + 1);
    println!("Index: {}", index.display());

    Ok(())
}

fn preview_text(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}
