// src/pipeline.rs
use crate::bank::{QuestionBank, SectionExcerpt};
use crate::catalog::{Catalog, EditionSpec};
use crate::extractors::PageRangeExtractor;
use crate::source::SourceLoader;
use crate::utils::marker_debug;
use serde::Serialize;

/// An edition whose document could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditionFailure {
    pub edition: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub editions_loaded: usize,
    pub sections_extracted: usize,
    pub failures: Vec<EditionFailure>,
}

impl RunReport {
    /// True when editions were configured but none could be loaded. An empty catalog is not a failure.
    pub fn all_editions_failed(&self) -> bool {
        self.editions_loaded == 0 && !self.failures.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct RunOutcome {
    pub bank: QuestionBank,
    pub report: RunReport,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub scan_markers: bool, // Log a marker report for every loaded document
}

/// Extracts every section of one loaded edition into `bank`. Returns the number of sections recorded.
pub fn extract_edition(
    edition: &EditionSpec,
    document: &str,
    extractor: &PageRangeExtractor,
    bank: &mut QuestionBank,
) -> usize {
    let index = extractor.index(document);
    tracing::debug!("{}: indexed {} pages", edition.name, index.page_count());

    for section in &edition.sections {
        let extracted = index.extract(section.pages);
        if extracted.missing_count > 0 {
            tracing::debug!(
                "{} / {}: pages {} found {:?}, {} without a marker",
                edition.name,
                section.name,
                section.pages,
                extracted.pages_found,
                extracted.missing_count
            );
        }
        tracing::info!("  {}: {} chars extracted", section.name, extracted.char_count());
        bank.record(
            section.category(),
            &section.name,
            SectionExcerpt::new(&edition.name, extracted.text),
        );
    }
    edition.sections.len()
}

/// Runs the whole catalog, threading one bank through every edition.
/// A document that cannot be loaded is reported and skipped; the remaining editions still run.
pub async fn run_catalog(
    catalog: &Catalog,
    loader: &SourceLoader,
    extractor: &PageRangeExtractor,
    options: RunOptions,
) -> RunOutcome {
    let mut outcome = RunOutcome { bank: QuestionBank::new(), report: RunReport::default() };

    for edition in &catalog.editions {
        tracing::info!("Processing {}", edition.name);

        let document = match loader.load(&edition.file).await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("Failed to load {}: {}", edition.name, e);
                outcome.report.failures.push(EditionFailure {
                    edition: edition.name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        outcome.report.editions_loaded += 1;

        if options.scan_markers {
            let report = marker_debug::scan_markers(&document, extractor);
            marker_debug::log_marker_report(&edition.name, &report);
        }

        outcome.report.sections_extracted +=
            extract_edition(edition, &document, extractor, &mut outcome.bank);
    }

    tracing::info!(
        "Processing finished. Editions loaded: {}, sections extracted: {}, failures: {}",
        outcome.report.editions_loaded,
        outcome.report.sections_extracted,
        outcome.report.failures.len()
    );
    outcome
}
