//! Plain-text rendering for headless output.

use chrono::{DateTime, Local, Utc};
use lexi_rs_core::VocabularyEntry;

const NOT_PROVIDED: &str = "Not provided";
const NO_EXAMPLE: &str = "No example";

/// Local date and time, as shown in listings.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// One aligned row per entry, preceded by a header row.
pub fn table_lines(entries: &[&VocabularyEntry]) -> Vec<String> {
    let rows: Vec<[String; 6]> = entries
        .iter()
        .map(|entry| {
            [
                entry.id.to_string(),
                entry.word.clone(),
                entry
                    .meaning_bangla
                    .clone()
                    .unwrap_or_else(|| NOT_PROVIDED.to_string()),
                entry
                    .meaning_english
                    .clone()
                    .unwrap_or_else(|| NOT_PROVIDED.to_string()),
                entry
                    .example_sentence
                    .clone()
                    .unwrap_or_else(|| NO_EXAMPLE.to_string()),
                format_timestamp(&entry.created_at),
            ]
        })
        .collect();
    let header = ["ID", "WORD", "BANGLA", "ENGLISH", "EXAMPLE", "ADDED"].map(String::from);

    let mut widths = header.clone().map(|cell| cell.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    std::iter::once(&header)
        .chain(rows.iter())
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| {
                    let pad = width.saturating_sub(cell.chars().count());
                    format!("{cell}{}", " ".repeat(pad))
                })
                .collect();
            cells.join("  ").trim_end().to_string()
        })
        .collect()
}

/// Detail view of a single entry. Absent fields are omitted.
pub fn entry_lines(entry: &VocabularyEntry) -> Vec<String> {
    let created = entry.created_at.with_timezone(&Local);
    let mut lines = vec![
        entry.word.clone(),
        format!(
            "Added on {} at {}",
            created.format("%Y-%m-%d"),
            created.format("%H:%M:%S")
        ),
    ];
    let sections = [
        ("Bangla Meaning", entry.meaning_bangla.as_ref()),
        ("English Meaning", entry.meaning_english.as_ref()),
        ("Example Sentence", entry.example_sentence.as_ref()),
    ];
    let before = lines.len();
    for (title, value) in sections {
        if let Some(value) = value {
            lines.push(String::new());
            lines.push(format!("{title}:"));
            lines.push(format!("  {value}"));
        }
    }
    if lines.len() == before {
        lines.push(String::new());
        lines.push("No additional details available for this word.".to_string());
    }
    lines
}
