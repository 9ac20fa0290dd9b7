// src/utils/marker_debug.rs
use crate::extractors::PageRangeExtractor;
use std::collections::BTreeSet;

/// What the page markers of one document look like. Diagnostic only; extraction never consults it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerReport {
    pub marker_count: usize,
    pub pages: Vec<u32>,        // Distinct page numbers, ascending
    pub duplicates: Vec<u32>,   // Page numbers marked more than once
    pub out_of_order: Vec<u32>, // Pages whose marker follows a higher-numbered marker
    pub gaps: Vec<u32>,         // Numbers missing between the lowest and highest page
    pub unparseable: usize,     // Markers whose number does not fit a page number
}

impl MarkerReport {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
            && self.out_of_order.is_empty()
            && self.gaps.is_empty()
            && self.unparseable == 0
    }
}

/// Scans the markers of `document` the same way the extractor finds them.
pub fn scan_markers(document: &str, extractor: &PageRangeExtractor) -> MarkerReport {
    let markers = extractor.markers(document);
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    let mut out_of_order = Vec::new();
    let mut unparseable = 0;
    let mut highest: Option<u32> = None;

    for marker in &markers {
        let Some(page) = marker.page else {
            unparseable += 1;
            continue;
        };
        if !seen.insert(page) {
            duplicates.insert(page);
        }
        match highest {
            Some(h) if page < h => out_of_order.push(page),
            _ => highest = Some(page),
        }
    }

    let gaps = match (seen.first(), seen.last()) {
        (Some(&lo), Some(&hi)) => (lo..=hi).filter(|p| !seen.contains(p)).collect(),
        _ => Vec::new(),
    };

    MarkerReport {
        marker_count: markers.len(),
        pages: seen.into_iter().collect(),
        duplicates: duplicates.into_iter().collect(),
        out_of_order,
        gaps,
        unparseable,
    }
}

/// Logs a marker scan for a loaded document.
pub fn log_marker_report(label: &str, report: &MarkerReport) {
    tracing::info!(
        "{}: {} markers, pages {:?}..{:?}",
        label,
        report.marker_count,
        report.pages.first(),
        report.pages.last()
    );
    if report.is_clean() {
        return;
    }
    if !report.duplicates.is_empty() {
        tracing::warn!("{}: duplicate page markers {:?}", label, report.duplicates);
    }
    if !report.out_of_order.is_empty() {
        tracing::warn!("{}: out-of-order page markers {:?}", label, report.out_of_order);
    }
    if !report.gaps.is_empty() {
        tracing::warn!("{}: no marker for pages {:?}", label, report.gaps);
    }
    if report.unparseable > 0 {
        tracing::warn!("{}: {} markers with unusable page numbers", label, report.unparseable);
    }
}
