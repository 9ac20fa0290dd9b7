// src/catalog/mod.rs
pub mod models;

use crate::utils::error::CatalogError;
use std::path::Path;

pub use models::{Catalog, Category, EditionSpec, SectionSpec};

impl Catalog {
    /// The Pahamify SNBT 2025 tryouts the tool was written for.
    pub fn builtin() -> Self {
        let edition = |number: u32, sections: [(&str, u32, u32); 7]| EditionSpec {
            name: format!("TO {}", number),
            file: format!("PDF TO {} PAHAMIFY 2025 @kstrophile.txt", number),
            sections: sections
                .iter()
                .map(|&(name, start, end)| SectionSpec::new(name, start, end))
                .collect(),
        };

        Catalog {
            marker_pattern: None,
            editions: vec![
                edition(15, [
                    ("Penalaran Umum", 1, 9),
                    ("Pengetahuan dan Pemahaman Umum", 10, 14),
                    ("Pemahaman Bacaan dan Menulis", 15, 19),
                    ("Pengetahuan Kuantitatif", 20, 23),
                    ("Literasi Bahasa Indonesia", 24, 34),
                    ("Literasi Bahasa Inggris", 35, 40),
                    ("Penalaran Matematika", 41, 45),
                ]),
                edition(13, [
                    ("Penalaran Umum", 1, 7),
                    ("Pengetahuan dan Pemahaman Umum", 8, 12),
                    ("Pemahaman Bacaan dan Menulis", 13, 17),
                    ("Pengetahuan Kuantitatif", 18, 21),
                    ("Literasi Bahasa Indonesia", 22, 32),
                    ("Literasi Bahasa Inggris", 33, 39),
                    ("Penalaran Matematika", 40, 44),
                ]),
                edition(8, [
                    ("Penalaran Umum", 1, 9),
                    ("Pengetahuan dan Pemahaman Umum", 10, 15),
                    ("Pemahaman Bacaan dan Menulis", 16, 22),
                    ("Pengetahuan Kuantitatif", 23, 27),
                    ("Literasi Bahasa Indonesia", 28, 40),
                    ("Literasi Bahasa Inggris", 41, 48),
                    ("Penalaran Matematika", 49, 52),
                ]),
            ],
        }
    }

    /// Parses a catalog written as TOML (`[[edition]]` tables with `[[edition.sections]]`).
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content)?;
        if catalog.editions.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Read catalog {} ({} bytes)", path.display(), content.len());
        Self::from_toml_str(&content)
    }
}
