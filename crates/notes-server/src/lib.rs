//! notes-server: HTTP API server for the notes backend
//!
//! This crate provides:
//! - The `/notes` resource (create, list, bulk update, bulk delete)
//! - Bearer-token identity extraction
//! - JSON error responses
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//!
//! Handlers talk to storage only through [`notes_store::NoteStore`], so the
//! router runs the same over PostgreSQL or the in-memory store.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use notes_server::{AppState, ServerConfig, routes};
//! use notes_store::MemoryStore;
//!
//! let config = ServerConfig::from_env()?;
//! let app = routes::build_router(AppState::new(Arc::new(MemoryStore::new()), config));
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use notes_core;
pub use notes_store;
