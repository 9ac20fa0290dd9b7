// src/main.rs
mod bank;
mod catalog;
mod extractors;
mod pipeline;
mod report;
mod source;
mod utils;

use catalog::Catalog;
use clap::Parser;
use extractors::PageRangeExtractor;
use pipeline::RunOptions;
use source::SourceLoader;
use utils::AppError;

const SOURCE_DIR_ENV: &str = "TRYOUT_SOURCE_DIR";

/// Extracts tryout question text by page range and prints a question bank summary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML catalog of editions and section page ranges (default: built-in Pahamify 2025 table)
    #[arg(short, long)]
    catalog: Option<String>,

    /// Directory holding the text dumps (default: $TRYOUT_SOURCE_DIR or current directory)
    #[arg(short, long)]
    source_dir: Option<String>,

    /// Maximum characters printed per sample
    #[arg(long, default_value_t = report::DEFAULT_PREVIEW_CHARS)]
    preview_chars: usize,

    /// Section to print a sample of (repeatable)
    #[arg(long = "sample")]
    samples: Vec<String>,

    /// Edition the samples are taken from (default: first edition in the catalog)
    #[arg(long)]
    sample_edition: Option<String>,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Debug mode - log a page marker scan for every loaded document
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(if args.debug { "debug" } else { "info" });
    tracing::debug!("Starting with args: {:?}", args);

    // 3. Load the catalog
    let catalog = match &args.catalog {
        Some(path) => {
            tracing::info!("Loading catalog from {}", path);
            Catalog::from_toml_file(path)?
        }
        None => Catalog::builtin(),
    };
    for warning in catalog.validate() {
        tracing::warn!("{}", warning);
    }
    tracing::info!(
        "Catalog has {} editions, {} sections",
        catalog.editions.len(),
        catalog.section_count()
    );

    if let Some(name) = &args.sample_edition {
        if catalog.edition(name).is_none() {
            return Err(AppError::Config(format!("Sample edition '{}' is not in the catalog", name)));
        }
    }

    // 4. Initialize extractor and loader
    let extractor = match &catalog.marker_pattern {
        Some(pattern) => PageRangeExtractor::with_marker_pattern(pattern)?,
        None => PageRangeExtractor::new(),
    };
    tracing::debug!("Using page marker pattern: {}", extractor.marker_pattern());

    let source_dir = args
        .source_dir
        .clone()
        .or_else(|| std::env::var(SOURCE_DIR_ENV).ok())
        .unwrap_or_else(|| ".".to_string());
    let loader = SourceLoader::new(&source_dir);
    tracing::info!("Reading source documents from {}", loader.base_dir().display());

    // 5. Run the extraction table
    let options = RunOptions { scan_markers: args.debug };
    let outcome = pipeline::run_catalog(&catalog, &loader, &extractor, options).await;

    if outcome.bank.is_empty() {
        tracing::warn!("No sections were extracted");
    }

    // 6. Report
    if args.json {
        let summary = report::summary_json(&outcome.bank, &outcome.report);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", report::render_summary(&outcome.bank));

        let sample_edition = args
            .sample_edition
            .as_deref()
            .or_else(|| catalog.editions.first().map(|e| e.name.as_str()));
        let samples: Vec<&str> = if args.samples.is_empty() {
            report::DEFAULT_SAMPLE_SECTIONS.to_vec()
        } else {
            args.samples.iter().map(String::as_str).collect()
        };

        if let Some(edition) = sample_edition {
            for section in samples {
                match report::render_sample(&outcome.bank, edition, section, args.preview_chars) {
                    Some(sample) => print!("{}", sample),
                    None => tracing::warn!("No extracted text for {} in {}", section, edition),
                }
            }
        }
    }

    if outcome.report.all_editions_failed() {
        return Err(AppError::Processing(format!(
            "Failed to load any of {} source documents",
            outcome.report.failures.len()
        )));
    }

    Ok(())
}
