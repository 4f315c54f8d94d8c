//! In-process [`NoteStore`] with the same semantics as the PostgreSQL store.
//!
//! Used by the server's tests and for running without a database.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use notes_core::{NewNote, Note, NoteFilter, NoteId, NoteType, Tag, UserPublicId};

use crate::error::{StoreError, StoreResult};
use crate::repository::NoteStore;

#[derive(Debug, Default)]
struct Inner {
    notes: BTreeMap<NoteId, Note>,
    types: Vec<NoteType>,
    tags: Vec<Tag>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn upsert_type(&mut self, name: &str) -> NoteType {
        if let Some(existing) = self.types.iter().find(|t| t.name == name) {
            return existing.clone();
        }
        let note_type = NoteType {
            id: self.next_id(),
            name: name.to_string(),
        };
        self.types.push(note_type.clone());
        note_type
    }

    fn upsert_tag(&mut self, owner: &UserPublicId, name: &str) -> Tag {
        if let Some(existing) = self
            .tags
            .iter()
            .find(|t| &t.user_public_id == owner && t.name == name)
        {
            return existing.clone();
        }
        let tag = Tag {
            id: self.next_id(),
            user_public_id: owner.clone(),
            name: name.to_string(),
        };
        self.tags.push(tag.clone());
        tag
    }

    fn upsert_tags(&mut self, owner: &UserPublicId, names: &BTreeSet<String>) {
        for name in names {
            self.upsert_tag(owner, name);
        }
    }
}

/// Note store held in memory behind a `tokio::sync::RwLock`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notes across all owners.
    pub async fn len(&self) -> usize {
        self.inner.read().await.notes.len()
    }

    /// Whether the store holds no notes.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create_note(&self, note: &NewNote) -> StoreResult<Note> {
        let mut inner = self.inner.write().await;

        let note_type = inner.upsert_type(note.effective_type());
        inner.upsert_tags(&note.user_public_id, &note.tags);

        let now = Utc::now();
        let stored = Note {
            id: NoteId::new(),
            user_public_id: note.user_public_id.clone(),
            text: note.text.clone(),
            type_name: Some(note_type.name),
            tags: note.tags.clone(),
            is_archived: false,
            created: now,
            modified: now,
        };
        inner.notes.insert(stored.id, stored.clone());

        tracing::debug!(note_id = %stored.id, owner = %stored.user_public_id, "Created note");
        Ok(stored)
    }

    async fn find_notes(&self, filter: &NoteFilter) -> StoreResult<Vec<Note>> {
        let inner = self.inner.read().await;

        let mut notes: Vec<Note> = inner
            .notes
            .values()
            .filter(|note| filter.matches(note))
            .cloned()
            .collect();
        notes.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));

        Ok(notes)
    }

    async fn save_note(&self, note: &Note) -> StoreResult<Note> {
        let mut inner = self.inner.write().await;

        let owned = inner
            .notes
            .get(&note.id)
            .is_some_and(|n| n.user_public_id == note.user_public_id);
        if !owned {
            return Err(StoreError::NoteNotFound(note.id.0));
        }

        if let Some(name) = &note.type_name {
            inner.upsert_type(name);
        }
        inner.upsert_tags(&note.user_public_id, &note.tags);

        let Some(stored) = inner.notes.get_mut(&note.id) else {
            return Err(StoreError::NoteNotFound(note.id.0));
        };
        stored.text = note.text.clone();
        stored.type_name = note.type_name.clone();
        stored.tags = note.tags.clone();
        stored.is_archived = note.is_archived;
        stored.modified = Utc::now();

        tracing::debug!(note_id = %note.id, "Saved note");
        Ok(stored.clone())
    }

    async fn delete_note(&self, owner: &UserPublicId, id: NoteId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;

        let owned = inner
            .notes
            .get(&id)
            .is_some_and(|n| &n.user_public_id == owner);
        if !owned {
            return Err(StoreError::NoteNotFound(id.0));
        }

        inner.notes.remove(&id);
        tracing::debug!(note_id = %id, "Deleted note");
        Ok(())
    }

    async fn create_type(&self, name: &str) -> StoreResult<NoteType> {
        Ok(self.inner.write().await.upsert_type(name))
    }

    async fn find_type(&self, name: &str) -> StoreResult<Option<NoteType>> {
        let inner = self.inner.read().await;
        Ok(inner.types.iter().find(|t| t.name == name).cloned())
    }

    async fn create_tag(&self, owner: &UserPublicId, name: &str) -> StoreResult<Tag> {
        Ok(self.inner.write().await.upsert_tag(owner, name))
    }

    async fn list_tags(&self, owner: &UserPublicId) -> StoreResult<Vec<Tag>> {
        let inner = self.inner.read().await;
        let mut tags: Vec<Tag> = inner
            .tags
            .iter()
            .filter(|t| &t.user_public_id == owner)
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}
