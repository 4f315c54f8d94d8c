//! notes-core: domain types for the notes backend.
//!
//! This crate provides:
//! - Note, type, and tag types shared by the store and the server
//! - [`NoteFilter`], the owner-scoped selection used by every read,
//!   bulk update, and bulk delete
//!
//! No I/O happens here.

pub mod filter;
pub mod types;

pub use filter::{ALLOWED_FILTERS, FilterError, NoteFilter, OWNER_FILTER, parse_tag_list};
pub use types::{
    DEFAULT_NOTE_TYPE, NewNote, Note, NoteId, NotePatch, NoteType, Tag, UserPublicId,
};
