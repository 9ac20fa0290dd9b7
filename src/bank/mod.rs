// src/bank/mod.rs
use crate::catalog::Category;
use serde::Serialize;
use std::collections::BTreeMap;

/// Extracted text of one section from one edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionExcerpt {
    pub source: String, // Edition name, e.g. "TO 15"
    pub text: String,   // Full extracted text, never truncated
}

impl SectionExcerpt {
    pub fn new(source: &str, text: String) -> Self {
        Self { source: source.to_string(), text }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// All excerpts recorded for one subtest, in recording order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subtest {
    pub name: String,
    pub excerpts: Vec<SectionExcerpt>,
}

/// Accumulates excerpts by category and subtest across editions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    categories: BTreeMap<Category, Vec<Subtest>>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an excerpt under `section`, creating the subtest on first use.
    pub fn record(&mut self, category: Category, section: &str, excerpt: SectionExcerpt) {
        let subtests = self.categories.entry(category).or_default();
        match subtests.iter_mut().find(|s| s.name == section) {
            Some(subtest) => subtest.excerpts.push(excerpt),
            None => subtests.push(Subtest { name: section.to_string(), excerpts: vec![excerpt] }),
        }
    }

    /// Subtests of a category in first-recorded order.
    pub fn subtests(&self, category: Category) -> &[Subtest] {
        self.categories.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    /// Categories that hold at least one subtest, TPS first.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[Subtest])> {
        self.categories.iter().map(|(category, subtests)| (*category, subtests.as_slice()))
    }

    pub fn excerpts(&self, section: &str) -> &[SectionExcerpt] {
        self.categories
            .values()
            .flatten()
            .find(|s| s.name == section)
            .map(|s| s.excerpts.as_slice())
            .unwrap_or_default()
    }

    pub fn find(&self, edition: &str, section: &str) -> Option<&SectionExcerpt> {
        self.excerpts(section).iter().find(|e| e.source == edition)
    }

    /// Total number of recorded excerpts.
    pub fn len(&self) -> usize {
        self.categories.values().flatten().map(|s| s.excerpts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excerpt(source: &str, text: &str) -> SectionExcerpt {
        SectionExcerpt::new(source, text.to_string())
    }

    #[test]
    fn test_record_groups_by_category_and_subtest() {
        let mut bank = QuestionBank::new();
        bank.record(Category::Literasi, "Penalaran Matematika", excerpt("TO 15", "pm15"));
        bank.record(Category::Tps, "Penalaran Umum", excerpt("TO 15", "pu15"));
        bank.record(Category::Tps, "Pengetahuan Kuantitatif", excerpt("TO 15", "pk15"));
        bank.record(Category::Tps, "Penalaran Umum", excerpt("TO 13", "pu13"));

        assert_eq!(bank.len(), 4);
        let order: Vec<Category> = bank.categories().map(|(c, _)| c).collect();
        assert_eq!(order, vec![Category::Tps, Category::Literasi]);

        let tps: Vec<&str> = bank.subtests(Category::Tps).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(tps, vec!["Penalaran Umum", "Pengetahuan Kuantitatif"]);

        let sources: Vec<&str> = bank.excerpts("Penalaran Umum").iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["TO 15", "TO 13"]);
        assert_eq!(bank.excerpts("Penalaran Umum")[0].text, "pu15");
        assert_eq!(bank.find("TO 13", "Penalaran Umum").unwrap().text, "pu13");
    }

    #[test]
    fn test_empty_bank() {
        let bank = QuestionBank::new();
        assert!(bank.is_empty());
        assert!(bank.subtests(Category::Tps).is_empty());
        assert!(bank.excerpts("Penalaran Umum").is_empty());
        assert!(bank.find("TO 15", "Penalaran Umum").is_none());
    }

    #[test]
    fn test_long_text_is_stored_whole() {
        let long = "x".repeat(20_000);
        let mut bank = QuestionBank::new();
        bank.record(Category::Tps, "Penalaran Umum", SectionExcerpt::new("TO 8", long.clone()));
        assert_eq!(bank.find("TO 8", "Penalaran Umum").unwrap().char_count(), 20_000);
    }
}
