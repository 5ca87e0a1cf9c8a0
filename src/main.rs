use clap::Parser;
use colored::Colorize;
use miette::Result;
use std::path::PathBuf;
use tracing::info;

use deadresources::config::Config;
use deadresources::discovery::{self, FileStats};
use deadresources::report::{self, Reporter, RunSummary, TerminalReporter, UnusedReport};
use deadresources::{load_catalog, ScanCoordinator};

/// DeadResources - Find localization resources that no source file references
#[derive(Parser, Debug)]
#[command(name = "deadresources")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Resource catalog (JSON array of objects with `type` and `name`)
    #[arg(short, long, value_name = "FILE")]
    resources: Option<PathBuf>,

    /// Report file [default: results.csv]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of parallel scan workers [default: 4]
    #[arg(short, long)]
    workers: Option<usize>,

    /// Ignore file (.gitignore syntax) applied while walking the project
    #[arg(long, value_name = "FILE")]
    ignore_file: Option<PathBuf>,

    /// Patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Scan the files committed at HEAD instead of the working directory
    #[arg(long)]
    git: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also list unused resources on the console
    #[arg(long)]
    list: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only write the report
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<OutputFormat> for report::ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => report::ReportFormat::Text,
            OutputFormat::Json => report::ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    info!("DeadResources v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config(&cli)?;

    run_analysis(&config, &cli)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?.relative_to(&cli.path)
    } else {
        // Try to load from default locations
        Config::from_default_locations(&cli.path)?
    };

    // Override with CLI arguments
    if let Some(resources) = &cli.resources {
        config.resources = Some(resources.clone());
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(ignore_file) = &cli.ignore_file {
        config.ignore_file = Some(ignore_file.clone());
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if cli.git {
        config.git = true;
    }

    config.validate()?;
    Ok(config)
}

fn run_analysis(config: &Config, cli: &Cli) -> Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;

    let start_time = Instant::now();

    // Step 1: Load the resource catalog
    let catalog_path = config.resources_path()?;
    info!("Loading resources from {}...", catalog_path.display());
    let catalog = load_catalog(catalog_path)?;
    info!("Loaded {} resources", catalog.len());

    // Step 2: Discover files
    info!(
        "Discovering files{}...",
        if config.git { " in HEAD snapshot" } else { "" }
    );
    let files = discovery::discover(config, &cli.path)?;
    let stats = FileStats::from_files(&files);
    info!(
        "Found {} files to analyze ({} generic, {} script)",
        stats.total(),
        stats.generic_files,
        stats.script_files
    );

    if files.is_empty() && !cli.quiet {
        println!("{}", "No source files found; every resource will be reported as unused.".yellow());
    }

    // Step 3: Scan
    let mut coordinator = ScanCoordinator::new(config.workers)?;
    if !cli.quiet {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        coordinator = coordinator.with_progress(pb);
    }
    let outcome = coordinator.run(catalog, &files)?;

    // Step 4: Report results
    let report = UnusedReport::build(&outcome.catalog);
    let reporter = Reporter::new(cli.format.into(), config.output.clone());
    reporter.report(&report)?;

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    if !cli.quiet {
        TerminalReporter::new().with_unused(cli.list).report(&RunSummary {
            stats,
            report: &report,
            failures: &outcome.failures,
            elapsed,
            output_path: reporter.output_path(),
        });
    }

    Ok(())
}
