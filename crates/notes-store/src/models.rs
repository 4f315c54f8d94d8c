//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for sqlx
//! queries. They are separate from the domain types in notes-core so the
//! row shapes can follow the schema.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use notes_core::{Note, NoteId, NoteType, Tag, UserPublicId};

use crate::error::StoreError;

/// Database row for a note joined with its type name and tag names.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub user_public_id: String,
    pub text: String,
    pub type_name: Option<String>,
    pub tags: Vec<String>,
    pub is_archived: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl TryFrom<NoteRow> for Note {
    type Error = StoreError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        let user_public_id = owner_from_row(row.user_public_id, "notes", row.id)?;

        Ok(Note {
            id: NoteId::from_uuid(row.id),
            user_public_id,
            text: row.text,
            type_name: row.type_name,
            tags: row.tags.into_iter().collect(),
            is_archived: row.is_archived,
            created: row.created,
            modified: row.modified,
        })
    }
}

/// Database row for the `note_types` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteTypeRow {
    pub id: i64,
    pub name: String,
}

impl From<NoteTypeRow> for NoteType {
    fn from(row: NoteTypeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// Database row for the `tags` table.
#[derive(Debug, Clone, FromRow)]
pub struct TagRow {
    pub id: i64,
    pub user_public_id: String,
    pub name: String,
}

impl TryFrom<TagRow> for Tag {
    type Error = StoreError;

    fn try_from(row: TagRow) -> Result<Self, Self::Error> {
        let user_public_id = owner_from_row(row.user_public_id, "tags", row.id)?;
        Ok(Tag {
            id: row.id,
            user_public_id,
            name: row.name,
        })
    }
}

fn owner_from_row(
    raw: String,
    table: &str,
    id: impl std::fmt::Display,
) -> Result<UserPublicId, StoreError> {
    UserPublicId::new(raw)
        .ok_or_else(|| StoreError::CorruptRow(format!("{} row {} has a blank owner", table, id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(owner: &str) -> NoteRow {
        let now = Utc::now();
        NoteRow {
            id: Uuid::new_v4(),
            user_public_id: owner.to_string(),
            text: "hello".to_string(),
            type_name: Some("note".to_string()),
            tags: vec!["b".to_string(), "a".to_string(), "a".to_string()],
            is_archived: false,
            created: now,
            modified: now,
        }
    }

    #[test]
    fn note_row_converts_and_dedupes_tags() {
        let note = Note::try_from(row("u1")).unwrap();
        assert_eq!(note.user_public_id.as_str(), "u1");
        assert_eq!(note.tags.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn note_row_with_blank_owner_is_corrupt() {
        let err = Note::try_from(row("")).unwrap_err();
        assert!(matches!(err, StoreError::CorruptRow(_)));
    }
}
