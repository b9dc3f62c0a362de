//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a memory-backed gateway,
//! canned principals for each tenant arrangement, and stub collaborators
//! for the session-authorize seams.

use std::sync::Arc;

use async_trait::async_trait;

use scribe::session::{
    AuthenticatedUser, DelegatedToken, IdentityProvider, IssuedGrant, RoomService,
    RoomServiceError,
};
use scribe::{CreateDocument, DocumentGateway};
use scribe_authz::SessionGrant;
use scribe_core::{DocumentId, OrgId, Principal, SubjectId, UserProfile};
use scribe_store::MemoryStore;

/// A test fixture with a memory-backed gateway.
pub struct TestFixture {
    pub gateway: Arc<DocumentGateway<MemoryStore>>,
}

impl TestFixture {
    /// Create a new fixture over an empty store.
    pub fn new() -> Self {
        Self {
            gateway: Arc::new(DocumentGateway::new(MemoryStore::new())),
        }
    }

    /// A principal acting in a personal context.
    pub fn personal(subject: &str) -> Principal {
        Principal::personal(SubjectId::new(subject))
    }

    /// A principal acting inside an organization.
    pub fn member(subject: &str, org: &str) -> Principal {
        Principal::in_org(SubjectId::new(subject), OrgId::new(org))
    }

    /// Create a titled document as `principal` and return its id.
    pub async fn create_doc(&self, principal: &Principal, title: &str) -> DocumentId {
        self.gateway
            .create(
                Some(principal),
                CreateDocument {
                    title: Some(title.to_string()),
                    content: None,
                },
            )
            .await
            .expect("fixture create failed")
    }

    /// Create `count` untitled documents as `principal`.
    pub async fn seed_docs(&self, principal: &Principal, count: usize) -> Vec<DocumentId> {
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            ids.push(
                self.gateway
                    .create(Some(principal), CreateDocument::default())
                    .await
                    .expect("fixture create failed"),
            );
        }
        ids
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity provider with a single known credential.
pub struct StubIdentity {
    credential: String,
    user: AuthenticatedUser,
}

impl StubIdentity {
    /// Accept `credential` as `principal` with an empty profile.
    pub fn single(credential: &str, principal: Principal) -> Self {
        Self {
            credential: credential.to_string(),
            user: AuthenticatedUser {
                principal,
                profile: UserProfile::default(),
            },
        }
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn authenticate(&self, credentials: &str) -> Option<AuthenticatedUser> {
        (credentials == self.credential).then(|| self.user.clone())
    }

    async fn delegated_token(&self, _user: &AuthenticatedUser) -> Option<DelegatedToken> {
        Some(DelegatedToken::new("stub-delegated"))
    }
}

/// Room service that issues `200` with the grant serialized as the body.
pub struct StubRooms;

#[async_trait]
impl RoomService for StubRooms {
    async fn issue(&self, grant: &SessionGrant) -> Result<IssuedGrant, RoomServiceError> {
        Ok(IssuedGrant {
            status: 200,
            body: serde_json::to_string(grant).map_err(|e| RoomServiceError(e.to_string()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_creates_visible_documents() {
        let fixture = TestFixture::new();
        let owner = TestFixture::personal("u1");
        let id = fixture.create_doc(&owner, "Notes").await;

        let doc = fixture.gateway.get_by_id(&id).await.unwrap();
        assert_eq!(doc.title, "Notes");
        assert_eq!(doc.owner.as_str(), "u1");
    }

    #[tokio::test]
    async fn test_stub_identity_rejects_unknown_credential() {
        let identity = StubIdentity::single("good", TestFixture::personal("u1"));
        assert!(identity.authenticate("good").await.is_some());
        assert!(identity.authenticate("bad").await.is_none());
    }
}
