//! textprep CLI - run the preprocessing pipeline from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Built-in demo sentence
//! textprep
//!
//! # Full report for some text (or stdin)
//! textprep run "The striped bats are hanging on their feet."
//! echo "Cats chase mice." | textprep run --json
//!
//! # One report per line typed
//! textprep interactive
//!
//! # Only download the NLTK data packages
//! textprep --data-dir ./nltk_data fetch
//! ```

use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use textprep::pipeline::observer::LoggingObserver;
use textprep::pipeline::validation::ValidationEngine;
use textprep::report::{render_sections, Report};
use textprep::resources::default_data_dir;
use textprep::{
    validate_input, Error, Fetcher, HttpFetcher, NltkPipeline, OfflineFetcher, PipelineResult,
    PipelineSpec, ResourceStore, SpecError, StemmerKind, DEMO_SENTENCE,
};

/// English text preprocessing, one stage at a time.
///
/// Cleans, tokenizes, removes stopwords, stems and lemmatizes text using
/// the NLTK data packages, downloading them on first use.
#[derive(Parser)]
#[command(name = "textprep", version, about)]
struct Cli {
    /// NLTK data directory (default: $NLTK_DATA, then ~/nltk_data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON pipeline configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Stemming algorithm: porter or snowball
    #[arg(long, global = true)]
    stemmer: Option<StemmerKind>,

    /// Use built-in resources instead of the NLTK data packages
    #[arg(long, global = true)]
    builtin: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the demo sentence and print each stage (default)
    Demo,
    /// Print the full report for TEXT, or for stdin when TEXT is omitted
    Run {
        text: Option<String>,
        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read lines from the terminal and report on each
    Interactive,
    /// Download missing resources and exit
    Fetch,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let spec = load_spec(&cli)?;

    match &cli.command {
        None | Some(Command::Demo) => {
            let pipeline = build_pipeline(&cli, &spec)?;
            let result = run_text(&pipeline, DEMO_SENTENCE, cli.verbose)?;
            print!("{}", render_sections(&result));
        }
        Some(Command::Run { text, json }) => {
            let text = match text {
                Some(text) => text.clone(),
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read stdin")?;
                    buf
                }
            };
            // Reject before building so blank input never starts a download.
            if let Err(err) = validate_input(&text) {
                eprintln!("{err}");
                std::process::exit(1);
            }

            let pipeline = build_pipeline(&cli, &spec)?;
            let result = run_text(&pipeline, &text, cli.verbose)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let color = io::stdout().is_terminal();
                print!("{}", Report::new(&text, &result).with_color(color).render());
            }
        }
        Some(Command::Interactive) => {
            let pipeline = build_pipeline(&cli, &spec)?;
            interactive(&pipeline, cli.verbose)?;
        }
        Some(Command::Fetch) => {
            if cli.builtin {
                println!("--builtin uses no downloaded resources; nothing to fetch.");
                return Ok(());
            }
            let store = open_store(&spec)?;
            store
                .ensure_available()
                .context("failed to download linguistic resources")?;
            println!("Resources ready in {}", store.root().display());
        }
    }

    Ok(())
}

/// Read the configuration file (if any), validate it and apply CLI overrides.
fn load_spec(cli: &Cli) -> Result<PipelineSpec> {
    let mut spec = match &cli.config {
        Some(path) => {
            let spec = PipelineSpec::from_json_file(path)?;
            let report = ValidationEngine::with_defaults().validate(&spec);
            for warning in report.warnings() {
                warn!(%warning, "config warning");
            }
            if !report.is_valid() {
                return Err(SpecError::Invalid(report.error_summary()))
                    .with_context(|| format!("rejected config {}", path.display()));
            }
            spec
        }
        None => PipelineSpec::default(),
    };

    if let Some(stemmer) = cli.stemmer {
        spec.stemmer = stemmer;
    }
    if let Some(dir) = &cli.data_dir {
        spec.resources.data_dir = Some(dir.clone());
    }
    Ok(spec)
}

fn open_store(spec: &PipelineSpec) -> Result<ResourceStore> {
    let root = match &spec.resources.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };
    let fetcher: Box<dyn Fetcher> = if spec.resources.download {
        let timeout = spec.resources.timeout_secs.map(Duration::from_secs);
        Box::new(HttpFetcher::with_timeout(timeout)?)
    } else {
        Box::new(OfflineFetcher)
    };
    info!(root = %root.display(), "using resource cache");
    Ok(ResourceStore::new(root, fetcher).with_index_url(spec.resources.index_url.as_str()))
}

fn build_pipeline(cli: &Cli, spec: &PipelineSpec) -> Result<NltkPipeline> {
    if cli.builtin {
        return Ok(NltkPipeline::builtin_with(spec));
    }
    let store = open_store(spec)?;
    NltkPipeline::from_store(&store, spec).context("failed to prepare linguistic resources")
}

/// Run one text, logging per-stage timings when `verbose`.
fn run_text(
    pipeline: &NltkPipeline,
    text: &str,
    verbose: bool,
) -> textprep::Result<PipelineResult> {
    if verbose {
        pipeline.try_run_observed(text, &mut LoggingObserver)
    } else {
        pipeline.try_run(text)
    }
}

fn interactive(pipeline: &NltkPipeline, verbose: bool) -> Result<()> {
    let color = io::stdout().is_terminal();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Type a sentence and press Enter. Ctrl-D to quit.");
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("failed to read input")?;

        match run_text(pipeline, &line, verbose) {
            Ok(result) => {
                print!("{}", Report::new(&line, &result).with_color(color).render());
            }
            Err(Error::Input(err)) => eprintln!("{err}"),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
