//! DocumentStore trait: the abstract interface for document persistence.
//!
//! This trait keeps the gateway storage-agnostic. Implementations include
//! SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use scribe_core::{Document, DocumentId, DocumentPatch, OrgId, Page, PageRequest, SubjectId};

use crate::error::Result;

/// Which slice of the document table a listing runs over.
///
/// Exactly one of the two index branches of the gateway's routing rule:
/// org-scoped principals list their organization, personal principals
/// list what they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocScope {
    /// Documents owned by this subject.
    Owner(SubjectId),
    /// Documents scoped to this organization.
    Organization(OrgId),
}

impl DocScope {
    /// Whether `doc` falls inside this scope.
    pub fn contains(&self, doc: &Document) -> bool {
        match self {
            DocScope::Owner(subject) => doc.owner == *subject,
            DocScope::Organization(org) => doc.org.as_ref() == Some(org),
        }
    }
}

/// The DocumentStore trait: async interface for document persistence.
///
/// # Design Notes
///
/// - **Insertion order**: every insert gets a monotonically increasing
///   sequence. Pages are served in sequence order and cursors are stable
///   under concurrent inserts: new rows only ever land at higher
///   sequences, so already-returned items never reappear.
/// - **Missing is not an error**: `get` returns `None`, `patch`/`delete`
///   return `false` for absent ids. The error type is reserved for
///   transport and data corruption.
/// - **No permission logic**: scoping here is an index choice, not an
///   access decision. The evaluator runs in the gateway, above this trait.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document.
    ///
    /// Fails with `InvalidData` if the id already exists; the gateway
    /// mints fresh ids so a collision means a caller bug.
    async fn insert(&self, doc: &Document) -> Result<()>;

    /// Get a document by id.
    async fn get(&self, id: &DocumentId) -> Result<Option<Document>>;

    /// Batch lookup, position-aligned with `ids`.
    ///
    /// Missing ids yield `None` at their position; the call itself never
    /// fails for a missing id.
    async fn get_many(&self, ids: &[DocumentId]) -> Result<Vec<Option<Document>>>;

    /// One page of documents in `scope`, in insertion order.
    async fn list_page(&self, scope: &DocScope, page: &PageRequest) -> Result<Page<Document>>;

    /// One page of documents in `scope` whose title contains `term`
    /// (case-insensitive), in insertion order.
    async fn search_page(
        &self,
        scope: &DocScope,
        term: &str,
        page: &PageRequest,
    ) -> Result<Page<Document>>;

    /// Apply a partial update. Returns `false` if the document is absent.
    async fn patch(&self, id: &DocumentId, patch: &DocumentPatch) -> Result<bool>;

    /// Delete a document permanently. Returns `false` if already absent.
    async fn delete(&self, id: &DocumentId) -> Result<bool>;
}
