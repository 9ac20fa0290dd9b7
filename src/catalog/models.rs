// src/catalog/models.rs
use crate::extractors::PageRange;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Subtests of the Tes Potensi Skolastik; every other section counts as Literasi.
const TPS_SUBTESTS: [&str; 4] = [
    "Penalaran Umum",
    "Pengetahuan dan Pemahaman Umum",
    "Pemahaman Bacaan dan Menulis",
    "Pengetahuan Kuantitatif",
];

/// Top-level grouping of subtests in the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "TPS", alias = "tps")]
    Tps,
    #[serde(rename = "Literasi", alias = "literasi")]
    Literasi,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Tps, Category::Literasi];

    pub fn classify(section_name: &str) -> Self {
        if TPS_SUBTESTS.contains(&section_name) {
            Category::Tps
        } else {
            Category::Literasi
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tps => "TPS",
            Category::Literasi => "Literasi",
        }
    }

    /// Heading used in the printed summary.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Tps => "TPS (Tes Potensi Skolastik)",
            Category::Literasi => "Literasi",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One subject section of an edition and the pages it spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    pub pages: PageRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>, // Overrides name-based classification
}

impl SectionSpec {
    pub fn new(name: &str, start: u32, end: u32) -> Self {
        Self { name: name.to_string(), pages: PageRange::new(start, end), category: None }
    }

    pub fn category(&self) -> Category {
        self.category.unwrap_or_else(|| Category::classify(&self.name))
    }
}

/// One exam edition: a single text dump and its section table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionSpec {
    pub name: String,
    pub file: String,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
}

/// The full extraction table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_pattern: Option<String>,
    #[serde(default, rename = "edition")]
    pub editions: Vec<EditionSpec>,
}

impl Catalog {
    pub fn edition(&self, name: &str) -> Option<&EditionSpec> {
        self.editions.iter().find(|e| e.name == name)
    }

    pub fn section_count(&self) -> usize {
        self.editions.iter().map(|e| e.sections.len()).sum()
    }

    /// Lists suspicious entries. These never stop a run; a reversed range simply extracts nothing.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut edition_names = HashSet::new();

        for edition in &self.editions {
            if !edition_names.insert(edition.name.as_str()) {
                warnings.push(format!("Edition '{}' is listed more than once", edition.name));
            }
            if edition.sections.is_empty() {
                warnings.push(format!("Edition '{}' has no sections", edition.name));
            }

            let mut section_names = HashSet::new();
            for section in &edition.sections {
                if !section_names.insert(section.name.as_str()) {
                    warnings.push(format!(
                        "Edition '{}' lists section '{}' more than once",
                        edition.name, section.name
                    ));
                }
                if section.pages.is_reversed() {
                    warnings.push(format!(
                        "Edition '{}' section '{}' has reversed page range {}",
                        edition.name, section.name, section.pages
                    ));
                }
                if section.pages.start == 0 {
                    warnings.push(format!(
                        "Edition '{}' section '{}' starts at page 0; pages are 1-indexed",
                        edition.name, section.name
                    ));
                }
            }
        }

        warnings
    }
}
