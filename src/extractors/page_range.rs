// src/extractors/page_range.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// --- Regex Patterns (Lazy Static) ---
/// Marker written by the PDF-to-text dump at the start of every page.
pub const DEFAULT_MARKER_PATTERN: &str = r"=== PAGE (\d+) ===";

static DEFAULT_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(DEFAULT_MARKER_PATTERN).expect("Failed to compile DEFAULT_MARKER_RE")
});

// --- Data Structures ---

/// Inclusive, 1-indexed page span. A reversed range is allowed and selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn is_reversed(&self) -> bool {
        self.end < self.start
    }

    /// Page numbers in ascending order; empty when reversed.
    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl From<(u32, u32)> for PageRange {
    fn from((start, end): (u32, u32)) -> Self {
        Self::new(start, end)
    }
}

impl From<PageRange> for (u32, u32) {
    fn from(range: PageRange) -> Self {
        (range.start, range.end)
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Result of one extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSection {
    pub text: String,            // Page contents joined by '\n', ascending page order
    pub pages_found: Vec<u32>, // Requested pages that had a marker
    pub missing_count: u64,    // Requested pages with no marker in the document
}

impl ExtractedSection {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// A page marker located in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub page: Option<u32>, // None when the number does not fit a u32
    pub start: usize,      // Byte offset of the marker itself
    pub content_start: usize,
}

// --- Main Extractor Structure ---
#[derive(Debug, Clone)]
pub struct PageRangeExtractor {
    marker_re: Regex,
}

impl Default for PageRangeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRangeExtractor {
    pub fn new() -> Self {
        Self { marker_re: Regex::clone(&DEFAULT_MARKER_RE) }
    }

    /// Builds an extractor for a custom marker. The pattern's first capture group must hold the page number.
    pub fn with_marker_pattern(pattern: &str) -> Result<Self, ExtractError> {
        let marker_re = Regex::new(pattern).map_err(|e| {
            ExtractError::RegexError(format!("Invalid marker pattern '{}': {}", pattern, e))
        })?;
        if marker_re.captures_len() < 2 {
            return Err(ExtractError::MissingPageGroup(pattern.to_string()));
        }
        Ok(Self { marker_re })
    }

    pub fn marker_pattern(&self) -> &str {
        self.marker_re.as_str()
    }

    /// Finds every marker in document order.
    pub fn markers(&self, document: &str) -> Vec<Marker> {
        self.marker_re
            .captures_iter(document)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let page = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok());
                Some(Marker { page, start: whole.start(), content_start: whole.end() })
            })
            .collect()
    }

    /// Maps each page number to its content slice. First marker wins on duplicates.
    pub fn index<'d>(&self, document: &'d str) -> PageIndex<'d> {
        let markers = self.markers(document);
        let mut pages = BTreeMap::new();

        for (i, marker) in markers.iter().enumerate() {
            let Some(page) = marker.page else { continue };
            // Content stops at the next marker of any number.
            let content_end = markers.get(i + 1).map_or(document.len(), |next| next.start);
            pages.entry(page).or_insert(&document[marker.content_start..content_end]);
        }

        PageIndex { pages }
    }

    /// Returns the text of every page in `range` that exists in `document`, newline-joined.
    /// Missing pages, empty documents and reversed ranges degrade to partial or empty output.
    /// Callers cutting several sections from one document should `index` it once instead.
    #[allow(dead_code)]
    pub fn extract(&self, document: &str, range: PageRange) -> ExtractedSection {
        self.index(document).extract(range)
    }
}

/// Pages of one document, indexed once and shared by every section cut from it.
#[derive(Debug, Clone, Default)]
pub struct PageIndex<'d> {
    pages: BTreeMap<u32, &'d str>,
}

impl<'d> PageIndex<'d> {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Work is bounded by the pages present, never by the width of `range`.
    pub fn extract(&self, range: PageRange) -> ExtractedSection {
        if range.is_reversed() {
            tracing::debug!("Reversed page range {} selects no pages", range);
            return ExtractedSection::default();
        }

        let (pages_found, texts): (Vec<u32>, Vec<&str>) =
            self.pages.range(range.pages()).map(|(page, content)| (*page, *content)).unzip();

        let width = u64::from(range.end - range.start) + 1;
        let section = ExtractedSection {
            text: texts.join("\n"),
            missing_count: width - pages_found.len() as u64,
            pages_found,
        };
        tracing::debug!(
            "Extracted pages {}: {} found, {} missing, {} chars",
            range,
            section.pages_found.len(),
            section.missing_count,
            section.char_count()
        );
        section
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const THREE_PAGES: &str = "=== PAGE 1 ===Alpha=== PAGE 2 ===Beta=== PAGE 3 ===Gamma";

    fn extract(document: &str, start: u32, end: u32) -> String {
        PageRangeExtractor::new().extract(document, PageRange::new(start, end)).text
    }

    #[test]
    fn test_extracts_requested_pages_only() {
        assert_eq!(extract(THREE_PAGES, 1, 2), "Alpha\nBeta");
    }

    #[test]
    fn test_full_range_returns_all_pages_in_order() {
        assert_eq!(extract(THREE_PAGES, 1, 3), "Alpha\nBeta\nGamma");
    }

    #[test]
    fn test_last_page_runs_to_end_of_document() {
        assert_eq!(extract(THREE_PAGES, 3, 3), "Gamma");
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let section = PageRangeExtractor::new().extract(THREE_PAGES, PageRange::new(3, 1));
        assert_eq!(section, ExtractedSection::default());
    }

    #[test]
    fn test_document_without_markers_is_empty() {
        assert_eq!(extract("just some text, no pages here", 1, 10), "");
        assert_eq!(extract("", 1, 1), "");
    }

    #[test]
    fn test_range_past_last_page_is_empty() {
        let section = PageRangeExtractor::new().extract(THREE_PAGES, PageRange::new(5, 5));
        assert_eq!(section.text, "");
        assert_eq!(section.missing_count, 1);
    }

    #[test]
    fn test_missing_middle_page_is_skipped() {
        let doc = "=== PAGE 1 ===one=== PAGE 3 ===three=== PAGE 4 ===four";
        let section = PageRangeExtractor::new().extract(doc, PageRange::new(1, 3));
        assert_eq!(section.text, "one\nthree");
        assert_eq!(section.pages_found, vec![1, 3]);
        assert_eq!(section.missing_count, 1);
    }

    #[test]
    fn test_duplicate_marker_uses_first_occurrence_once() {
        let doc = "=== PAGE 1 ===first=== PAGE 1 ===again=== PAGE 2 ===second";
        assert_eq!(extract(doc, 1, 2), "first\nsecond");
    }

    #[test]
    fn test_output_follows_range_order_not_document_order() {
        let doc = "=== PAGE 2 ===Beta=== PAGE 1 ===Alpha";
        assert_eq!(extract(doc, 1, 2), "Alpha\nBeta");
    }

    #[test]
    fn test_multiline_content_is_kept_verbatim() {
        let doc = "header\n=== PAGE 1 ===\n1. Soal pertama\nA. x\n=== PAGE 2 ===\n2. Soal kedua\n";
        assert_eq!(extract(doc, 1, 2), "\n1. Soal pertama\nA. x\n\n\n2. Soal kedua\n");
    }

    #[test]
    fn test_empty_page_contributes_empty_segment() {
        let doc = "=== PAGE 1 ====== PAGE 2 ===Beta";
        assert_eq!(extract(doc, 1, 2), "\nBeta");
    }

    #[test]
    fn test_overflowing_page_number_still_bounds_previous_page() {
        let doc = "=== PAGE 1 ===Alpha=== PAGE 99999999999 ===junk";
        assert_eq!(extract(doc, 1, 1), "Alpha");
    }

    #[test]
    fn test_very_wide_range_only_touches_present_pages() {
        let section = PageRangeExtractor::new().extract(THREE_PAGES, PageRange::new(1, u32::MAX));
        assert_eq!(section.text, "Alpha\nBeta\nGamma");
        assert_eq!(section.pages_found, vec![1, 2, 3]);
        assert_eq!(section.missing_count, u64::from(u32::MAX) - 3);
    }

    #[test]
    fn test_index_is_reused_across_sections() {
        let extractor = PageRangeExtractor::new();
        let index = extractor.index(THREE_PAGES);
        assert_eq!(index.page_count(), 3);
        assert_eq!(index.extract(PageRange::new(1, 1)).text, "Alpha");
        assert_eq!(index.extract(PageRange::new(2, 3)).text, "Beta\nGamma");
        assert_eq!(index.extract(PageRange::new(2, 3)), extractor.extract(THREE_PAGES, PageRange::new(2, 3)));
    }

    #[test]
    fn test_trailing_newline_of_last_page_is_kept() {
        assert_eq!(extract("=== PAGE 1 ===Alpha\n", 1, 1), "Alpha\n");
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let extractor = PageRangeExtractor::new();
        let range = PageRange::new(1, 3);
        assert_eq!(extractor.extract(THREE_PAGES, range), extractor.extract(THREE_PAGES, range));
    }

    #[test]
    fn test_custom_marker_pattern() {
        let extractor = PageRangeExtractor::with_marker_pattern(r"\[\[p(\d+)\]\]").unwrap();
        let doc = "[[p1]]satu[[p2]]dua";
        assert_eq!(extractor.extract(doc, PageRange::new(2, 2)).text, "dua");
    }

    #[test]
    fn test_custom_marker_pattern_requires_capture_group() {
        let err = PageRangeExtractor::with_marker_pattern(r"=== PAGE \d+ ===").unwrap_err();
        assert!(matches!(err, ExtractError::MissingPageGroup(_)));

        let err = PageRangeExtractor::with_marker_pattern(r"(unclosed").unwrap_err();
        assert!(matches!(err, ExtractError::RegexError(_)));
    }

    #[test]
    fn test_char_count_counts_characters_not_bytes() {
        let section = PageRangeExtractor::new().extract("=== PAGE 1 ===é√", PageRange::new(1, 1));
        assert_eq!(section.char_count(), 2);
    }
}
