use chrono::{DateTime, Duration, TimeZone, Utc};
use lexi_rs_store::{EntryId, VocabularyEntry};

/// Fixed origin so fixture timestamps are deterministic.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Entry with an English meaning, created `offset_secs` after the fixture origin.
pub fn entry(id: &str, word: &str, offset_secs: i64) -> VocabularyEntry {
    EntryBuilder::new(id, word)
        .english(format!("meaning of {word}"))
        .created_after(offset_secs)
        .build()
}

#[derive(Debug, Clone)]
pub struct EntryBuilder {
    entry: VocabularyEntry,
}

impl EntryBuilder {
    pub fn new(id: &str, word: &str) -> Self {
        Self {
            entry: VocabularyEntry {
                id: EntryId::new(id),
                word: word.to_string(),
                meaning_bangla: None,
                meaning_english: None,
                example_sentence: None,
                created_at: base_time(),
            },
        }
    }

    pub fn bangla(mut self, meaning: impl Into<String>) -> Self {
        self.entry.meaning_bangla = Some(meaning.into());
        self
    }

    pub fn english(mut self, meaning: impl Into<String>) -> Self {
        self.entry.meaning_english = Some(meaning.into());
        self
    }

    pub fn example(mut self, sentence: impl Into<String>) -> Self {
        self.entry.example_sentence = Some(sentence.into());
        self
    }

    pub fn created_after(mut self, offset_secs: i64) -> Self {
        self.entry.created_at = base_time() + Duration::seconds(offset_secs);
        self
    }

    pub fn build(self) -> VocabularyEntry {
        self.entry
    }
}
