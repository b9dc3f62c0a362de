//! The document record and its mutation payloads.

use serde::{Deserialize, Serialize};

use crate::types::{DocumentId, OrgId, SubjectId};

/// Title given to documents created without one.
pub const UNTITLED_TITLE: &str = "Untitled Document";

/// Name reported for documents that no longer exist in batch lookups.
pub const REMOVED_LABEL: &str = "[Removed]";

/// A stored document.
///
/// `id`, `owner`, `org` and `created_at` are set once at creation and
/// never change; in particular a document is never re-parented into a
/// different organization. Visibility derives solely from `(owner, org)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique id, assigned at creation.
    pub id: DocumentId,

    /// Document title, mutable by any principal the evaluator admits.
    pub title: String,

    /// Reference to the initial rich-text payload, if any. The rich-text
    /// data model itself lives in the collaboration service.
    pub content: Option<String>,

    /// The creating principal's subject id.
    pub owner: SubjectId,

    /// The tenant the document was scoped to at creation, if any.
    pub org: Option<OrgId>,

    /// Creation timestamp (Unix ms), set once at insert.
    pub created_at: i64,
}

impl Document {
    /// Apply a partial update in place.
    ///
    /// Omitted fields keep their prior value; there is no way to null a
    /// field through a patch.
    pub fn apply_patch(&mut self, patch: &DocumentPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(content) = &patch.content {
            self.content = Some(content.clone());
        }
    }
}

/// A partial update to a document's mutable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPatch {
    /// New title, or `None` to leave it unchanged.
    pub title: Option<String>,
    /// New content reference, or `None` to leave it unchanged.
    pub content: Option<String>,
}

impl DocumentPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// A row of the batch-info lookup.
///
/// Missing documents are a valid per-item result, reported with
/// [`REMOVED_LABEL`] as the name rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// The id that was looked up.
    pub id: DocumentId,
    /// The document title, or [`REMOVED_LABEL`] if the id no longer exists.
    pub name: String,
}

impl DocumentInfo {
    /// Info row for a document that was found.
    pub fn found(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            name: doc.title.clone(),
        }
    }

    /// Info row for an id with no backing document.
    pub fn missing(id: DocumentId) -> Self {
        Self {
            id,
            name: REMOVED_LABEL.to_string(),
        }
    }
}
