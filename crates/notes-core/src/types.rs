//! Core data types for the notes backend.
//!
//! A note is a user-owned text record carrying an optional type label and
//! a set of tag labels. Ownership is expressed with [`UserPublicId`], the
//! stable public identifier the identity layer resolves for every request.
//!
//! All types derive `Debug`, `Clone`, `Serialize`, and `Deserialize` for
//! inspection, copying, and JSON serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Type label given to notes created without an explicit type.
pub const DEFAULT_NOTE_TYPE: &str = "note";

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a note.
///
/// Wraps a UUID v4 so note ids cannot be confused with other UUIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Uuid);

impl NoteId {
    /// Creates a new random NoteId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a NoteId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Public identifier of a user.
///
/// Opaque to this crate: whatever the identity layer puts in the token
/// subject. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserPublicId(String);

impl UserPublicId {
    /// Wraps a public id, rejecting blank strings.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserPublicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Note Types
// ============================================================================

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Owner of the note.
    pub user_public_id: UserPublicId,
    pub text: String,
    /// Type label, serialized as `type`.
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    /// Tag labels, sorted and unique.
    pub tags: BTreeSet<String>,
    pub is_archived: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Note {
    /// Applies every field set in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &NotePatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(type_name) = &patch.type_name {
            self.type_name = Some(type_name.clone());
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        if let Some(is_archived) = patch.is_archived {
            self.is_archived = is_archived;
        }
    }

    /// Whether the note carries every tag in `tags`.
    #[must_use]
    pub fn has_all_tags(&self, tags: &BTreeSet<String>) -> bool {
        tags.is_subset(&self.tags)
    }
}

/// Input for creating a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub user_public_id: UserPublicId,
    pub text: String,
    pub type_name: Option<String>,
    pub tags: BTreeSet<String>,
}

impl NewNote {
    /// A note with only text; type and tags take their defaults.
    pub fn new(user_public_id: UserPublicId, text: impl Into<String>) -> Self {
        Self {
            user_public_id,
            text: text.into(),
            type_name: None,
            tags: BTreeSet::new(),
        }
    }

    /// Sets the type label.
    #[must_use]
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Sets the tag labels.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// The type label the note will be stored with.
    #[must_use]
    pub fn effective_type(&self) -> &str {
        self.type_name.as_deref().unwrap_or(DEFAULT_NOTE_TYPE)
    }
}

/// Field changes applied by a bulk update. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub text: Option<String>,
    pub type_name: Option<String>,
    /// Replaces the whole tag set.
    pub tags: Option<BTreeSet<String>>,
    pub is_archived: Option<bool>,
}

impl NotePatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.type_name.is_none()
            && self.tags.is_none()
            && self.is_archived.is_none()
    }
}

// ============================================================================
// Registry Types
// ============================================================================

/// A note type label. Types are global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteType {
    pub id: i64,
    pub name: String,
}

/// A tag label, unique per owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub user_public_id: UserPublicId,
    pub name: String,
}
