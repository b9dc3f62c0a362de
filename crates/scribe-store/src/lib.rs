//! # Scribe Store
//!
//! Storage abstraction for Scribe documents. Provides a trait-based
//! interface for document persistence with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The store module abstracts document storage behind the
//! [`DocumentStore`] trait, keeping the gateway storage-agnostic. The
//! primary implementation is [`SqliteStore`], with [`MemoryStore`] for
//! testing.
//!
//! ## Key Types
//!
//! - [`DocumentStore`] - the async trait for all storage operations
//! - [`DocScope`] - the owner/organization index a listing runs over
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - in-memory storage for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scribe_store::{DocumentStore, SqliteStore};
//!
//! async fn example() {
//!     // Open a SQLite database
//!     let store = SqliteStore::open("documents.db").unwrap();
//!
//!     // Or use an in-memory database for testing
//!     let store = SqliteStore::open_memory().unwrap();
//!
//!     // let doc: Document = ...;
//!     // store.insert(&doc).await.unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Insertion-ordered cursors**: pagination walks a monotonic insertion
//!   sequence; concurrent inserts never duplicate already-returned items
//! - **Missing is not an error**: absent ids come back as `None`/`false`
//! - **No permission logic**: access decisions live above this crate

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{DocScope, DocumentStore};
