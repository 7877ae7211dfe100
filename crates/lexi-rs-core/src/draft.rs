//! Add-entry form model.

use chrono::{DateTime, Utc};
use lexi_rs_store::NewEntry;
use thiserror::Error;

/// Reasons a draft cannot be submitted. The messages are shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a word")]
    MissingWord,
    #[error("Please provide at least one meaning (Bangla or English)")]
    MissingMeaning,
}

/// Editable fields of the form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Word,
    MeaningBangla,
    MeaningEnglish,
    ExampleSentence,
}

impl DraftField {
    pub const ALL: [DraftField; 4] = [
        DraftField::Word,
        DraftField::MeaningBangla,
        DraftField::MeaningEnglish,
        DraftField::ExampleSentence,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Word => "Word",
            DraftField::MeaningBangla => "Meaning (Bangla)",
            DraftField::MeaningEnglish => "Meaning (English)",
            DraftField::ExampleSentence => "Example sentence",
        }
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub word: String,
    pub meaning_bangla: String,
    pub meaning_english: String,
    pub example_sentence: String,
    pub focused: DraftField,
    /// Set while an insert is in flight.
    pub submitting: bool,
}

impl EntryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Word => &self.word,
            DraftField::MeaningBangla => &self.meaning_bangla,
            DraftField::MeaningEnglish => &self.meaning_english,
            DraftField::ExampleSentence => &self.example_sentence,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Word => &mut self.word,
            DraftField::MeaningBangla => &mut self.meaning_bangla,
            DraftField::MeaningEnglish => &mut self.meaning_english,
            DraftField::ExampleSentence => &mut self.example_sentence,
        }
    }

    /// Text of the focused field.
    pub fn focused_mut(&mut self) -> &mut String {
        self.field_mut(self.focused)
    }

    pub fn focus_next(&mut self) {
        let next = (self.focused.index() + 1) % DraftField::ALL.len();
        self.focused = DraftField::ALL[next];
    }

    pub fn focus_previous(&mut self) {
        let len = DraftField::ALL.len();
        let previous = (self.focused.index() + len - 1) % len;
        self.focused = DraftField::ALL[previous];
    }

    /// Clear every field and return focus to the word.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check the draft after trimming; the word wins over the meanings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.word.trim().is_empty() {
            return Err(ValidationError::MissingWord);
        }
        if self.meaning_bangla.trim().is_empty() && self.meaning_english.trim().is_empty() {
            return Err(ValidationError::MissingMeaning);
        }
        Ok(())
    }

    /// Validate and build the insert payload stamped with `created_at`.
    pub fn to_new_entry(&self, created_at: DateTime<Utc>) -> Result<NewEntry, ValidationError> {
        self.validate()?;
        Ok(NewEntry::from_fields(
            &self.word,
            &self.meaning_bangla,
            &self.meaning_english,
            &self.example_sentence,
            created_at,
        ))
    }
}
