//! The `NoteStore` abstraction the HTTP layer talks to.
//!
//! Every note read, update, and delete is scoped to an owner: reads go
//! through a [`NoteFilter`], which always carries one, and single-note
//! writes name the owner explicitly. Implementations:
//!
//! - [`crate::PgStore`]: PostgreSQL
//! - [`crate::MemoryStore`]: in-process, for tests and local runs

use async_trait::async_trait;

use notes_core::{NewNote, Note, NoteFilter, NoteId, NoteType, Tag, UserPublicId};

use crate::error::StoreResult;

/// Persistence operations over user-owned notes, types, and tags.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a note, creating its type and tags on first use.
    ///
    /// Notes without a type get [`notes_core::DEFAULT_NOTE_TYPE`].
    async fn create_note(&self, note: &NewNote) -> StoreResult<Note>;

    /// All notes matching `filter`, oldest first.
    async fn find_notes(&self, filter: &NoteFilter) -> StoreResult<Vec<Note>>;

    /// Persist text, type, tags, and archive flag of an existing note.
    ///
    /// Bumps `modified` and returns the stored note. Fails with
    /// `NoteNotFound` if the note is gone or owned by someone else.
    async fn save_note(&self, note: &Note) -> StoreResult<Note>;

    /// Delete one note owned by `owner`.
    async fn delete_note(&self, owner: &UserPublicId, id: NoteId) -> StoreResult<()>;

    /// Create a type, or return the existing one with that name.
    async fn create_type(&self, name: &str) -> StoreResult<NoteType>;

    /// Look up a type by name.
    async fn find_type(&self, name: &str) -> StoreResult<Option<NoteType>>;

    /// Create a tag for `owner`, or return the existing one.
    async fn create_tag(&self, owner: &UserPublicId, name: &str) -> StoreResult<Tag>;

    /// All tags of `owner`, by name.
    async fn list_tags(&self, owner: &UserPublicId) -> StoreResult<Vec<Tag>>;
}
