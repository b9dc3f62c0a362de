//! # Scribe
//!
//! The unified API for the Scribe document system: multi-tenant document
//! CRUD behind a permission funnel, plus the session authorizer that
//! gates access to real-time collaboration rooms.
//!
//! ## Overview
//!
//! - **Gateway**: create, list, look up, update, and delete documents,
//!   with every mutation funneled through the permission evaluator and
//!   listings routed by principal scope and query shape.
//! - **Session authorizer**: a capability-issuance gate that re-validates
//!   document permission on every room join and mints time-boxed grants.
//! - **HTTP surface**: a thin axum layer exposing the
//!   `/session-authorize` boundary.
//!
//! Rich-text merging, presence sync, and search-index internals live in
//! external services behind the [`session::RoomService`] and store seams.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scribe::{CreateDocument, DocumentGateway};
//! use scribe::store::SqliteStore;
//! use scribe::core::Principal;
//!
//! async fn example(principal: &Principal) {
//!     let store = SqliteStore::open("documents.db").unwrap();
//!     let gateway = DocumentGateway::new(store);
//!
//!     let id = gateway
//!         .create(Some(principal), CreateDocument::default())
//!         .await
//!         .unwrap();
//!
//!     let doc = gateway.get_by_id(&id).await.unwrap();
//!     assert_eq!(doc.title, "Untitled Document");
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `scribe::core` - ids, documents, principals, pagination
//! - `scribe::authz` - the permission evaluator and grant payloads
//! - `scribe::store` - storage abstraction and SQLite

pub mod error;
pub mod gateway;
pub mod http;
pub mod session;

// Re-export component crates
pub use scribe_authz as authz;
pub use scribe_core as core;
pub use scribe_store as store;

// Re-export main types for convenience
pub use error::{GatewayError, Result};
pub use gateway::{CreateDocument, DocumentGateway, ListQuery, MAX_PAGE_SIZE};
pub use session::{
    AuthenticatedUser, AuthorizeRequest, AuthorizeResponse, DelegatedToken, DocumentQuery,
    GatewayQuery, IdentityProvider, IssuedGrant, RoomService, RoomServiceError, SessionAuthorizer,
};

// Re-export commonly used core types
pub use scribe_core::{
    Cursor, Document, DocumentId, DocumentInfo, DocumentPatch, OrgId, Page, PageRequest,
    PageStatus, Principal, SubjectId, UserProfile,
};
