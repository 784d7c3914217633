//! Namehunt CLI Application
//!
//! A command-line interface for checking domain availability in batches,
//! with optional AI-assisted name generation and categorization. This is a
//! thin presentation layer over namehunt-lib.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use futures::StreamExt;
use namehunt_lib::{
    extract_domains, normalize_all, parse_duration, resolve_config, BatchRunner, CancelToken,
    Categorizer, NameGenerator, RunConfig, RunEvent, RunOutcome,
};
use std::process;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for namehunt
#[derive(Parser, Debug)]
#[command(name = "namehunt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check domain availability in batches, with AI-assisted name generation")]
#[command(
    long_about = "Check domain availability against a DNS-over-HTTPS resolver (or a registrar \
bulk-check API), in fixed-size batches with live progress.\n\nCandidates can be given directly, \
extracted from a text file, or generated from keywords by a text model."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Domain names to check (raw input; normalized automatically)
    #[arg(value_name = "DOMAINS", help_heading = "Domain Selection")]
    pub domains: Vec<String>,

    /// Input file; domain-shaped substrings are extracted from free-form text
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "Domain Selection"
    )]
    pub file: Option<String>,

    /// Generate candidates from these keywords via the text service
    #[arg(
        short = 'k',
        long = "keywords",
        value_name = "KEYWORDS",
        help_heading = "Domain Generation"
    )]
    pub keywords: Option<String>,

    /// TLDs the generator may use (comma-separated)
    #[arg(
        short = 't',
        long = "tlds",
        value_name = "TLDS",
        default_value = "com",
        help_heading = "Domain Generation"
    )]
    pub tlds: String,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Output results in CSV format
    #[arg(long = "csv", help_heading = "Output Format")]
    pub csv: bool,

    /// Skip categorization of available domains
    #[arg(long = "no-categorize", help_heading = "Output Format")]
    pub no_categorize: bool,

    /// Domains per batch (progress is reported per batch)
    #[arg(
        short = 'b',
        long = "batch-size",
        value_name = "N",
        help_heading = "Performance"
    )]
    pub batch_size: Option<usize>,

    /// Concurrency cap for --json/--csv collected mode
    #[arg(
        short = 'c',
        long = "concurrency",
        value_name = "N",
        help_heading = "Performance"
    )]
    pub concurrency: Option<usize>,

    /// Per-probe timeout (e.g. "3s", "500ms")
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Performance")]
    pub timeout: Option<String>,

    /// Prober backend: "doh" or "registrar"
    #[arg(long = "backend", value_name = "BACKEND", help_heading = "Protocol")]
    pub backend: Option<String>,

    /// DNS-over-HTTPS resolver endpoint
    #[arg(long = "doh-url", value_name = "URL", help_heading = "Protocol")]
    pub doh_url: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(args.verbose);

    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("namehunt=debug,namehunt_lib=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Validate command line arguments before any network call.
fn validate_args(args: &Args) -> Result<(), String> {
    if args.domains.is_empty() && args.file.is_none() && args.keywords.is_none() {
        return Err(
            "You must specify domain names, a file with --file, or keywords with --keywords"
                .to_string(),
        );
    }

    if args.json && args.csv {
        return Err("Cannot specify multiple output formats (--json, --csv)".to_string());
    }

    if let Some(batch_size) = args.batch_size {
        if batch_size == 0 || batch_size > 100 {
            return Err("Batch size must be between 1 and 100".to_string());
        }
    }

    if let Some(concurrency) = args.concurrency {
        if concurrency == 0 || concurrency > 100 {
            return Err("Concurrency must be between 1 and 100".to_string());
        }
    }

    if let Some(keywords) = &args.keywords {
        if keywords.trim().is_empty() {
            return Err("--keywords cannot be empty".to_string());
        }
    }

    Ok(())
}

/// Build the run configuration: files and environment first, CLI args on top.
fn build_config(args: &Args) -> Result<RunConfig, Box<dyn std::error::Error>> {
    let mut config = resolve_config(args.config.as_deref(), args.verbose)?;

    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(timeout) = &args.timeout {
        config.probe_timeout = parse_duration(timeout)?;
    }
    if let Some(backend) = &args.backend {
        config.backend = backend.parse()?;
    }
    if let Some(doh_url) = &args.doh_url {
        config.doh_endpoint = doh_url.clone();
    }
    if args.no_categorize {
        config.categorize = false;
    }

    Ok(config)
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&args)?;

    let domains = gather_domains(&args, &config).await?;
    if domains.is_empty() {
        // Only reachable via the generator path: upstream produced nothing.
        ui::print_nothing_to_check();
        return Ok(());
    }

    let runner = BatchRunner::new(config.clone())?;

    if args.json || args.csv {
        run_collected(&runner, &domains, &args).await
    } else {
        run_streaming(&runner, domains, &config).await
    }
}

/// Assemble the check list from positional args, file extraction, and the
/// generator, then normalize and deduplicate.
async fn gather_domains(
    args: &Args,
    config: &RunConfig,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut raw: Vec<String> = args.domains.clone();

    if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path, e))?;
        raw.extend(extract_domains(&text));
    }

    if let Some(keywords) = &args.keywords {
        let generator = NameGenerator::new(&config.llm)?;
        let generated = generator.generate(keywords, &args.tlds).await;
        if generated.is_empty() {
            ui::print_warning("the generator produced no candidates");
        } else if args.verbose {
            eprintln!("Generated {} candidates", generated.len());
        }
        raw.extend(generated);
    }

    let domains = normalize_all(raw);
    tracing::debug!(count = domains.len(), "assembled check list");
    Ok(domains)
}

/// Collected whole-list mode for structured output.
async fn run_collected(
    runner: &BatchRunner,
    domains: &[String],
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    let results = runner.check_all(domains).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("domain,status");
        for result in &results {
            println!("{},{}", result.domain, result.status);
        }
    }

    Ok(())
}

/// Streaming chunked mode with live progress and Ctrl-C cancellation.
async fn run_streaming(
    runner: &BatchRunner,
    domains: Vec<String>,
    config: &RunConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let total = domains.len();
    ui::print_header(total, config.batch_size, config.backend);

    let cancel = CancelToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!();
            ui::print_warning("cancelling after the current batch...");
            signal_cancel.cancel();
        }
    });

    let start = std::time::Instant::now();
    let mut stream = runner.run_stream(domains, cancel);
    let mut shown = 0usize;

    while let Some(event) = stream.next().await {
        match event {
            RunEvent::Progress(progress) => {
                for domain in &progress.available[shown..] {
                    ui::print_available(domain);
                }
                shown = progress.available.len();
                ui::print_progress(progress.checked, progress.total, shown);
            }
            RunEvent::Done(outcome) => {
                let duration = start.elapsed();
                return finish_run(outcome, total, duration, config).await;
            }
        }
    }

    Ok(())
}

/// Render the terminal state. Cancelled, empty, and failed runs each get a
/// distinct message; partial results stay visible.
async fn finish_run(
    outcome: RunOutcome,
    total: usize,
    duration: std::time::Duration,
    config: &RunConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        RunOutcome::Completed(available) => {
            if available.is_empty() {
                ui::print_no_results(total, duration);
                return Ok(());
            }

            if config.categorize {
                let categorizer = Categorizer::new(&config.llm)?;
                let groups = categorizer.categorize(&available).await;
                ui::print_groups(&groups);
            }

            ui::print_summary(total, available.len(), duration);
            Ok(())
        }
        RunOutcome::Cancelled(partial) => {
            ui::print_cancelled(partial.len(), duration);
            Ok(())
        }
        RunOutcome::Failed(e) => {
            ui::print_failed(&e);
            process::exit(1);
        }
    }
}
