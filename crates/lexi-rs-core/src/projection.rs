//! Filtering and ordering of the collection.
//!
//! The projection borrows from the collection and never mutates it.

use lexi_rs_config::{SortDirection, SortKey};
use lexi_rs_store::VocabularyEntry;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Entries whose word or meanings contain `term`, case-insensitively, in
/// collection order.
pub fn filter_entries<'a>(entries: &'a [VocabularyEntry], term: &str) -> Vec<&'a VocabularyEntry> {
    let needle = term.to_lowercase();
    entries.iter().filter(|entry| entry.matches(&needle)).collect()
}

/// Locale-style word ordering. Base letters compare case-insensitively
/// first, so accented words sort beside their plain forms. Accents break
/// the next tie, then lowercase sorts before uppercase at the first
/// differing position.
pub fn compare_words(left: &str, right: &str) -> Ordering {
    let (left_lower, right_lower) = (left.to_lowercase(), right.to_lowercase());
    base_letters(&left_lower)
        .cmp(base_letters(&right_lower))
        .then_with(|| left_lower.nfd().cmp(right_lower.nfd()))
        .then_with(|| compare_case(left, right))
}

fn base_letters(word: &str) -> impl Iterator<Item = char> + '_ {
    word.nfd().filter(|c| !is_combining_mark(*c))
}

fn compare_case(left: &str, right: &str) -> Ordering {
    for (l, r) in left.chars().zip(right.chars()) {
        if l == r {
            continue;
        }
        return match (l.is_lowercase(), r.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => l.cmp(&r),
        };
    }
    left.len().cmp(&right.len())
}

/// Stable sort; ties keep their incoming order in both directions.
pub fn sort_entries(entries: &mut [&VocabularyEntry], key: SortKey, direction: SortDirection) {
    entries.sort_by(|left, right| {
        let ordering = match key {
            SortKey::Word => compare_words(&left.word, &right.word),
            SortKey::CreatedAt => left.created_at.cmp(&right.created_at),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Filter first, then sort.
pub fn project<'a>(
    entries: &'a [VocabularyEntry],
    term: &str,
    key: SortKey,
    direction: SortDirection,
) -> Vec<&'a VocabularyEntry> {
    let mut visible = filter_entries(entries, term);
    sort_entries(&mut visible, key, direction);
    visible
}
