// src/report/mod.rs
use crate::bank::QuestionBank;
use crate::catalog::Category;
use crate::pipeline::RunReport;
use std::fmt::Write;

pub const DEFAULT_PREVIEW_CHARS: usize = 5000;

/// Subtests shown as samples when none are requested.
pub const DEFAULT_SAMPLE_SECTIONS: [&str; 3] =
    ["Penalaran Umum", "Literasi Bahasa Inggris", "Penalaran Matematika"];

const RULE_WIDTH: usize = 80;

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "\n{}\n{}\n{}", rule, title, rule);
}

/// Per-category, per-subtest character counts for every recorded excerpt.
pub fn render_summary(bank: &QuestionBank) -> String {
    let mut out = String::new();
    banner(&mut out, "SUMMARY: Question Bank Structure from Pahamify SNBT Tryouts");

    for category in Category::ALL {
        let subtests = bank.subtests(category);
        if subtests.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n## {}", category.title());
        for subtest in subtests {
            let _ = writeln!(out, "\n### {}", subtest.name);
            for excerpt in &subtest.excerpts {
                let _ = writeln!(out, "  - {}: {} chars", excerpt.source, excerpt.char_count());
            }
        }
    }

    out
}

/// Sample block for one edition's section, or None when nothing was recorded for it.
pub fn render_sample(
    bank: &QuestionBank,
    edition: &str,
    section: &str,
    max_chars: usize,
) -> Option<String> {
    let excerpt = bank.find(edition, section)?;
    let mut out = String::new();
    banner(&mut out, &format!("SAMPLE: {} Questions ({})", section, edition));
    out.push_str(preview(&excerpt.text, max_chars));
    out.push('\n');
    Some(out)
}

/// Machine-readable summary; excerpt text is reduced to its length.
pub fn summary_json(bank: &QuestionBank, report: &RunReport) -> serde_json::Value {
    let categories: serde_json::Map<String, serde_json::Value> = bank
        .categories()
        .map(|(category, subtests)| {
            let subtests: Vec<serde_json::Value> = subtests
                .iter()
                .map(|subtest| {
                    let excerpts: Vec<serde_json::Value> = subtest
                        .excerpts
                        .iter()
                        .map(|e| serde_json::json!({ "source": e.source, "chars": e.char_count() }))
                        .collect();
                    serde_json::json!({ "name": subtest.name, "excerpts": excerpts })
                })
                .collect();
            (category.as_str().to_string(), serde_json::Value::Array(subtests))
        })
        .collect();

    serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "editions_loaded": report.editions_loaded,
        "sections_extracted": report.sections_extracted,
        "failures": report.failures,
        "categories": categories,
    })
}
