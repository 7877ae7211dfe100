//! Vocabulary entry model and its remote/snapshot representations.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque entry identifier assigned by the store.
///
/// Remote tables may use numeric keys; those are stringified on read so the
/// id stays a single join key between the remote rows and the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Signed(number) => Self(number.to_string()),
            RawId::Unsigned(number) => Self(number.to_string()),
        })
    }
}

/// A single vocabulary entry.
///
/// Serializes in the camelCase layout used by the local snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub id: EntryId,
    pub word: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub meaning_bangla: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub meaning_english: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub example_sentence: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl VocabularyEntry {
    /// Case-insensitive containment over word and both meanings.
    ///
    /// `needle` must already be lowercased. The example sentence is not searched.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let contains = |field: &str| field.to_lowercase().contains(needle);
        contains(&self.word)
            || self.meaning_bangla.as_deref().is_some_and(contains)
            || self.meaning_english.as_deref().is_some_and(contains)
    }
}

/// Row layout of the remote `vocabulary` table.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRecord {
    pub id: EntryId,
    pub word: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub meaning_bangla: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub meaning_english: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub example_sentence: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl From<RemoteRecord> for VocabularyEntry {
    fn from(record: RemoteRecord) -> Self {
        Self {
            id: record.id,
            word: record.word,
            meaning_bangla: record.meaning_bangla,
            meaning_english: record.meaning_english,
            example_sentence: record.example_sentence,
            created_at: record.created_at,
        }
    }
}

/// Insert payload for a new entry; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEntry {
    pub word: String,
    pub meaning_bangla: Option<String>,
    pub meaning_english: Option<String>,
    pub example_sentence: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewEntry {
    /// Build a payload from raw field text, trimming and dropping blanks.
    pub fn from_fields(
        word: &str,
        meaning_bangla: &str,
        meaning_english: &str,
        example_sentence: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            word: word.trim().to_string(),
            meaning_bangla: non_blank(meaning_bangla),
            meaning_english: non_blank(meaning_english),
            example_sentence: non_blank(example_sentence),
            created_at,
        }
    }

    /// Attach a store-assigned id.
    pub fn into_entry(self, id: EntryId) -> VocabularyEntry {
        VocabularyEntry {
            id,
            word: self.word,
            meaning_bangla: self.meaning_bangla,
            meaning_english: self.meaning_english,
            example_sentence: self.example_sentence,
            created_at: self.created_at,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Map `null`, missing and empty strings to `None`.
fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.is_empty()))
}

/// Parse RFC 3339, falling back to an offset-less timestamp read as UTC.
fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
