pub mod page_range;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use page_range::{
    ExtractedSection,
    Marker,
    PageIndex,
    PageRange,
    PageRangeExtractor,
    DEFAULT_MARKER_PATTERN,
};
