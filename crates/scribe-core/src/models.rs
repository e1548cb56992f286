//! Data models for scribe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// =============================================================================
// NOTE
// =============================================================================

/// A persisted text note.
///
/// Field names are camelCase on the wire and in the note document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        with = "iso_millis::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// The timestamp a note is ordered by: last update, else creation.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }

    /// Case-insensitive substring match over title and content.
    ///
    /// An empty query matches every note.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.content.to_lowercase().contains(&needle)
    }
}

/// Sort notes most recently modified first.
///
/// The sort is stable, so notes with equal timestamps keep their relative order.
pub fn sort_most_recent_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.last_modified().cmp(&a.last_modified()));
}

// =============================================================================
// REQUESTS
// =============================================================================

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Body of a create request. Both fields are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl CreateNoteRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// Returns the (title, content) pair if both are present and non-blank.
    pub fn validate(self) -> Result<(String, String)> {
        validate_full(self.title, self.content)
    }
}

/// Body of a full-replace update. Both fields are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateNoteRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    pub fn validate(self) -> Result<(String, String)> {
        validate_full(self.title, self.content)
    }
}

fn validate_full(title: Option<String>, content: Option<String>) -> Result<(String, String)> {
    if is_blank(&title) || is_blank(&content) {
        return Err(Error::Validation(
            "Title and content are required".to_string(),
        ));
    }
    // Both present: checked above.
    Ok((title.unwrap_or_default(), content.unwrap_or_default()))
}

/// Body of a partial update. At least one field must be supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchNoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PatchNoteRequest {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.is_none() && self.content.is_none() {
            return Err(Error::Validation(
                "At least one of title or content is required".to_string(),
            ));
        }
        if self.title.is_some() && is_blank(&self.title) {
            return Err(Error::Validation("Title cannot be empty".to_string()));
        }
        if self.content.is_some() && is_blank(&self.content) {
            return Err(Error::Validation("Content cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Apply the supplied fields to a note. Does not touch timestamps.
    pub fn apply_to(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
    }
}

/// Response body of a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedNote {
    pub message: String,
    pub note: Note,
}

impl DeletedNote {
    pub fn new(note: Note) -> Self {
        Self {
            message: "Note deleted".to_string(),
            note,
        }
    }
}

// =============================================================================
// TIMESTAMP FORMAT
// =============================================================================

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix.
///
/// Parsing accepts any RFC 3339 value.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            ts: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => super::serialize(ts, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.map(|raw| {
                DateTime::parse_from_rfc3339(&raw)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn note(title: &str, content: &str) -> Note {
        Note {
            id: "n1".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn test_note_serializes_camel_case_without_updated_at() {
        let json = serde_json::to_value(note("A", "B")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "n1",
                "title": "A",
                "content": "B",
                "createdAt": "2024-05-01T09:30:00.000Z"
            })
        );
    }

    #[test]
    fn test_note_deserializes_foreign_timestamps() {
        let json = r#"{"id":"x","title":"T","content":"C",
            "createdAt":"2024-05-01T11:30:00+02:00","updatedAt":"2024-05-02T00:00:00.123456Z"}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());
        assert!(note.updated_at.is_some());
    }

    #[test]
    fn test_note_rejects_bad_timestamp() {
        let json = r#"{"id":"x","title":"T","content":"C","createdAt":"yesterday"}"#;
        assert!(serde_json::from_str::<Note>(json).is_err());
    }

    #[test]
    fn test_matches_is_case_insensitive_over_title_and_content() {
        let shopping = note("Shopping", "milk");
        let work = note("Work", "Report");

        assert!(shopping.matches("MIL"));
        assert!(!work.matches("MIL"));
        assert!(work.matches("port"));
        assert!(shopping.matches("shop"));
        assert!(shopping.matches(""));
        assert!(work.matches(""));
    }

    #[test]
    fn test_sort_most_recent_first_prefers_updated_at() {
        let mut old = note("old", "x");
        old.id = "old".into();
        old.updated_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());

        let mut newer = note("newer", "x");
        newer.id = "newer".into();
        newer.created_at = Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap();

        let mut notes = vec![newer, old];
        sort_most_recent_first(&mut notes);
        assert_eq!(notes[0].id, "old");
        assert_eq!(notes[1].id, "newer");
    }

    #[test]
    fn test_create_request_validation() {
        assert!(CreateNoteRequest::new("A", "B").validate().is_ok());
        assert!(CreateNoteRequest::new("  ", "B").validate().is_err());
        assert!(CreateNoteRequest::new("A", "\n\t").validate().is_err());
        let missing = CreateNoteRequest {
            title: Some("A".into()),
            content: None,
        };
        match missing.validate() {
            Err(Error::Validation(msg)) => assert_eq!(msg, "Title and content are required"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_create_request_keeps_values_untrimmed() {
        let (title, content) = CreateNoteRequest::new(" A ", "B\n").validate().unwrap();
        assert_eq!(title, " A ");
        assert_eq!(content, "B\n");
    }

    #[test]
    fn test_patch_request_validation_messages() {
        let cases = vec![
            (PatchNoteRequest::default(), "At least one of title or content is required"),
            (PatchNoteRequest::title(" "), "Title cannot be empty"),
            (PatchNoteRequest::content(""), "Content cannot be empty"),
        ];
        for (req, expected) in cases {
            match req.validate() {
                Err(Error::Validation(msg)) => assert_eq!(msg, expected),
                other => panic!("expected '{}', got {:?}", expected, other),
            }
        }
        assert!(PatchNoteRequest::title("ok").validate().is_ok());
    }

    #[test]
    fn test_patch_apply_only_supplied_fields() {
        let mut n = note("A", "B");
        PatchNoteRequest::content("C").apply_to(&mut n);
        assert_eq!(n.title, "A");
        assert_eq!(n.content, "C");
    }

    #[test]
    fn test_patch_request_null_is_absent() {
        let req: PatchNoteRequest = serde_json::from_str(r#"{"title": null, "content": "x"}"#).unwrap();
        assert!(req.title.is_none());
        assert!(req.validate().is_ok());
    }
}
