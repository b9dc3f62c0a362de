//! The Document Store Gateway: CRUD over the document table with the
//! permission evaluator funneling every mutation.
//!
//! The gateway owns the query-routing rule for listings (full-text search
//! path vs indexed lookup, organization scope vs personal scope) and the
//! auth/lookup/permission sequencing for mutations. It holds no state of
//! its own beyond the injected store handle; every permission check
//! re-reads fresh document state rather than caching it across awaits.

use std::sync::Arc;

use scribe_authz::can_mutate;
use scribe_core::{
    now_millis, Cursor, Document, DocumentId, DocumentInfo, DocumentPatch, Page, Principal,
    UNTITLED_TITLE,
};
use scribe_store::{DocScope, DocumentStore};

use crate::error::{GatewayError, Result};

/// Hard cap on page sizes; larger requests are clamped, not rejected.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Parameters for creating a document.
#[derive(Debug, Clone, Default)]
pub struct CreateDocument {
    /// Title; defaults to "Untitled Document" when absent.
    pub title: Option<String>,
    /// Initial rich-text payload reference.
    pub content: Option<String>,
}

/// Parameters for a paginated listing.
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// Continue after this cursor.
    pub cursor: Option<Cursor>,
    /// Requested page size; must be positive.
    pub page_size: u32,
    /// When present (and non-blank), route through the title search path.
    pub search_term: Option<String>,
}

impl ListQuery {
    /// A first-page listing with no search term.
    pub fn first(page_size: u32) -> Self {
        Self {
            cursor: None,
            page_size,
            search_term: None,
        }
    }
}

/// The Document Store Gateway.
///
/// Generic over the storage backend; all mutation paths funnel through
/// the permission evaluator before touching the store. There is no
/// direct-write path that bypasses the check.
pub struct DocumentGateway<S: DocumentStore> {
    /// The storage backend.
    store: Arc<S>,
}

impl<S: DocumentStore> DocumentGateway<S> {
    /// Create a gateway over a store.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a gateway sharing an existing store handle.
    pub fn from_arc(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Create a document owned by `principal`.
    ///
    /// The organization scope is captured from the principal once, here,
    /// and never recomputed. Not idempotent: retrying creates a second
    /// document.
    pub async fn create(
        &self,
        principal: Option<&Principal>,
        req: CreateDocument,
    ) -> Result<DocumentId> {
        let principal = require_principal(principal)?;

        let doc = Document {
            id: DocumentId::generate(),
            title: req.title.unwrap_or_else(|| UNTITLED_TITLE.to_string()),
            content: req.content,
            owner: principal.subject.clone(),
            org: principal.org.clone(),
            created_at: now_millis(),
        };

        self.store.insert(&doc).await?;
        Ok(doc.id)
    }

    /// Patch a document's mutable fields.
    ///
    /// Omitted fields retain their prior value. Fails `NotFound` before
    /// `Forbidden`: the lookup happens first, and the permission check
    /// runs against the freshly fetched document.
    pub async fn update(
        &self,
        principal: Option<&Principal>,
        id: &DocumentId,
        patch: DocumentPatch,
    ) -> Result<()> {
        let principal = require_principal(principal)?;

        let doc = self
            .store
            .get(id)
            .await?
            .ok_or(GatewayError::NotFound)?;

        if !can_mutate(&doc, principal) {
            tracing::warn!(document = %id, subject = %principal.subject, "update denied");
            return Err(GatewayError::Forbidden);
        }

        // A concurrent delete between the check and the patch surfaces as
        // NotFound, same as a stale id.
        if !self.store.patch(id, &patch).await? {
            return Err(GatewayError::NotFound);
        }
        Ok(())
    }

    /// Delete a document permanently. No soft delete; re-deleting an
    /// already-deleted id yields `NotFound`.
    pub async fn remove(&self, principal: Option<&Principal>, id: &DocumentId) -> Result<()> {
        let principal = require_principal(principal)?;

        let doc = self
            .store
            .get(id)
            .await?
            .ok_or(GatewayError::NotFound)?;

        if !can_mutate(&doc, principal) {
            tracing::warn!(document = %id, subject = %principal.subject, "remove denied");
            return Err(GatewayError::Forbidden);
        }

        if !self.store.delete(id).await? {
            return Err(GatewayError::NotFound);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    /// One page of documents visible to `principal`.
    ///
    /// Routing rule: a non-blank search term takes the title-search path,
    /// otherwise the indexed path; an org-scoped principal lists the
    /// organization, a personal principal lists what they own. The two
    /// branches are mutually exclusive.
    pub async fn list(
        &self,
        principal: Option<&Principal>,
        query: ListQuery,
    ) -> Result<Page<Document>> {
        let principal = require_principal(principal)?;

        if query.page_size == 0 {
            return Err(GatewayError::BadRequest(
                "page size must be positive".to_string(),
            ));
        }

        let page = scribe_core::PageRequest {
            cursor: query.cursor,
            page_size: query.page_size.min(MAX_PAGE_SIZE),
        };
        let scope = scope_for(principal);

        let term = query
            .search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let result = match term {
            Some(term) => self.store.search_page(&scope, term, &page).await?,
            None => self.store.list_page(&scope, &page).await?,
        };
        Ok(result)
    }

    /// Direct lookup by id.
    ///
    /// Deliberately unauthenticated at this layer: authorization is the
    /// caller's job (the session authorizer re-checks permission against
    /// the returned document before using it).
    pub async fn get_by_id(&self, id: &DocumentId) -> Result<Document> {
        self.store
            .get(id)
            .await?
            .ok_or(GatewayError::NotFound)
    }

    /// Batch info lookup. Missing ids are reported as `"[Removed]"` rows,
    /// never as errors.
    pub async fn get_many_info(&self, ids: &[DocumentId]) -> Result<Vec<DocumentInfo>> {
        let docs = self.store.get_many(ids).await?;

        Ok(ids
            .iter()
            .zip(docs)
            .map(|(id, doc)| match doc {
                Some(doc) => DocumentInfo::found(&doc),
                None => DocumentInfo::missing(id.clone()),
            })
            .collect())
    }
}

/// Reject callers with no authenticated principal.
fn require_principal(principal: Option<&Principal>) -> Result<&Principal> {
    principal.ok_or(GatewayError::Unauthenticated)
}

/// The index branch a principal's listings run over.
fn scope_for(principal: &Principal) -> DocScope {
    match &principal.org {
        Some(org) => DocScope::Organization(org.clone()),
        None => DocScope::Owner(principal.subject.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::{OrgId, SubjectId, REMOVED_LABEL};
    use scribe_store::MemoryStore;

    fn gateway() -> DocumentGateway<MemoryStore> {
        DocumentGateway::new(MemoryStore::new())
    }

    fn personal(subject: &str) -> Principal {
        Principal::personal(SubjectId::new(subject))
    }

    fn member(subject: &str, org: &str) -> Principal {
        Principal::in_org(SubjectId::new(subject), OrgId::new(org))
    }

    #[tokio::test]
    async fn test_create_requires_principal() {
        let gw = gateway();
        let err = gw.create(None, CreateDocument::default()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_create_defaults_title() {
        let gw = gateway();
        let id = gw
            .create(Some(&personal("u1")), CreateDocument::default())
            .await
            .unwrap();
        let doc = gw.get_by_id(&id).await.unwrap();
        assert_eq!(doc.title, UNTITLED_TITLE);
        assert_eq!(doc.owner.as_str(), "u1");
        assert!(doc.org.is_none());
    }

    #[tokio::test]
    async fn test_create_captures_org_scope_once() {
        let gw = gateway();
        let id = gw
            .create(Some(&member("u1", "org1")), CreateDocument::default())
            .await
            .unwrap();
        let doc = gw.get_by_id(&id).await.unwrap();
        assert_eq!(doc.org.as_ref().unwrap().as_str(), "org1");
    }

    #[tokio::test]
    async fn test_list_rejects_zero_page_size() {
        let gw = gateway();
        let err = gw
            .list(Some(&personal("u1")), ListQuery::first(0))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_personal_listing_never_shows_foreign_documents() {
        let gw = gateway();
        gw.create(Some(&personal("u1")), CreateDocument::default())
            .await
            .unwrap();
        gw.create(Some(&personal("u2")), CreateDocument::default())
            .await
            .unwrap();

        let page = gw
            .list(Some(&personal("u1")), ListQuery::first(10))
            .await
            .unwrap();
        assert!(page.items.iter().all(|d| d.owner.as_str() == "u1"));
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_org_listing_shows_tenant_documents_only() {
        let gw = gateway();
        gw.create(Some(&member("u1", "org1")), CreateDocument::default())
            .await
            .unwrap();
        gw.create(Some(&member("u2", "org1")), CreateDocument::default())
            .await
            .unwrap();
        gw.create(Some(&member("u3", "org2")), CreateDocument::default())
            .await
            .unwrap();
        // u1's personal document is invisible in org context.
        gw.create(Some(&personal("u1")), CreateDocument::default())
            .await
            .unwrap();

        let page = gw
            .list(Some(&member("u1", "org1")), ListQuery::first(10))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page
            .items
            .iter()
            .all(|d| d.org.as_ref().unwrap().as_str() == "org1"));
    }

    #[tokio::test]
    async fn test_search_routes_by_org_scope() {
        let gw = gateway();
        gw.create(
            Some(&member("u1", "org1")),
            CreateDocument {
                title: Some("Roadmap".to_string()),
                content: None,
            },
        )
        .await
        .unwrap();
        gw.create(
            Some(&member("u2", "org2")),
            CreateDocument {
                title: Some("Roadmap".to_string()),
                content: None,
            },
        )
        .await
        .unwrap();

        let page = gw
            .list(
                Some(&member("u1", "org1")),
                ListQuery {
                    cursor: None,
                    page_size: 10,
                    search_term: Some("roadmap".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].org.as_ref().unwrap().as_str(), "org1");
    }

    #[tokio::test]
    async fn test_blank_search_term_takes_indexed_path() {
        let gw = gateway();
        gw.create(
            Some(&personal("u1")),
            CreateDocument {
                title: Some("Anything".to_string()),
                content: None,
            },
        )
        .await
        .unwrap();

        let page = gw
            .list(
                Some(&personal("u1")),
                ListQuery {
                    cursor: None,
                    page_size: 10,
                    search_term: Some("   ".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_update_partial_patch() {
        let gw = gateway();
        let owner = personal("u1");
        let id = gw
            .create(
                Some(&owner),
                CreateDocument {
                    title: Some("Draft".to_string()),
                    content: Some("body".to_string()),
                },
            )
            .await
            .unwrap();

        gw.update(
            Some(&owner),
            &id,
            DocumentPatch {
                title: Some("Final".to_string()),
                content: None,
            },
        )
        .await
        .unwrap();

        let doc = gw.get_by_id(&id).await.unwrap();
        assert_eq!(doc.title, "Final");
        assert_eq!(doc.content.as_deref(), Some("body"));
    }

    #[tokio::test]
    async fn test_update_by_stranger_is_forbidden_and_unchanged() {
        let gw = gateway();
        let owner = personal("u1");
        let id = gw
            .create(
                Some(&owner),
                CreateDocument {
                    title: Some("Mine".to_string()),
                    content: None,
                },
            )
            .await
            .unwrap();

        let err = gw
            .update(
                Some(&personal("u2")),
                &id,
                DocumentPatch {
                    title: Some("Stolen".to_string()),
                    content: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Forbidden));

        let doc = gw.get_by_id(&id).await.unwrap();
        assert_eq!(doc.title, "Mine");
    }

    #[tokio::test]
    async fn test_same_org_member_may_mutate() {
        let gw = gateway();
        let id = gw
            .create(Some(&member("u1", "org1")), CreateDocument::default())
            .await
            .unwrap();

        gw.update(
            Some(&member("u2", "org1")),
            &id,
            DocumentPatch {
                title: Some("Shared".to_string()),
                content: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(gw.get_by_id(&id).await.unwrap().title, "Shared");
    }

    #[tokio::test]
    async fn test_remove_then_remove_again_is_not_found() {
        let gw = gateway();
        let owner = personal("u1");
        let id = gw
            .create(Some(&owner), CreateDocument::default())
            .await
            .unwrap();

        gw.remove(Some(&owner), &id).await.unwrap();
        let err = gw.remove(Some(&owner), &id).await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound));
    }

    #[tokio::test]
    async fn test_remove_foreign_org_forbidden() {
        let gw = gateway();
        let id = gw
            .create(Some(&member("u1", "org1")), CreateDocument::default())
            .await
            .unwrap();

        let err = gw
            .remove(Some(&member("u2", "org2")), &id)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Forbidden));
        assert!(gw.get_by_id(&id).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_many_info_mixes_found_and_removed() {
        let gw = gateway();
        let id = gw
            .create(
                Some(&personal("u1")),
                CreateDocument {
                    title: Some("Kept".to_string()),
                    content: None,
                },
            )
            .await
            .unwrap();

        let ghost = DocumentId::parse("ghost").unwrap();
        let infos = gw.get_many_info(&[id.clone(), ghost.clone()]).await.unwrap();

        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].id, id);
        assert_eq!(infos[0].name, "Kept");
        assert_eq!(infos[1].id, ghost);
        assert_eq!(infos[1].name, REMOVED_LABEL);
    }
}
