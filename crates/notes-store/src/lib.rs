//! notes-store: Storage layer for the notes backend
//!
//! This crate provides:
//! - The [`NoteStore`] trait the HTTP layer depends on
//! - [`PgStore`], a PostgreSQL implementation via sqlx
//! - [`MemoryStore`], an in-process implementation
//! - Embedded schema migration
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_core::{NewNote, NoteFilter, UserPublicId};
//! use notes_store::{NoteStore, PgStore, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = PgStore::connect(config).await?;
//!
//! let owner = UserPublicId::new("user-1").unwrap();
//! store.create_note(&NewNote::new(owner.clone(), "buy milk")).await?;
//! let notes = store.find_notes(&NoteFilter::for_owner(owner)).await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use repository::NoteStore;
pub use store::{PgStore, StoreConfig};

// Re-export notes-core for downstream crates
pub use notes_core;
