//! The Session Authorizer: the capability-issuance gate in front of the
//! collaboration room service.
//!
//! A caller asking to join a room must clear, in order: authentication,
//! room-id validation, delegated-credential acquisition, a fresh document
//! fetch, and the permission evaluator. Only then is a time-boxed grant
//! minted and handed to the room service; the room service's status and
//! body are returned verbatim. Permission is re-validated on every join
//! rather than trusting any cached decision, because ownership or
//! org-scope may have changed since the document was last listed.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use scribe_authz::{can_access, SessionGrant, DEFAULT_GRANT_TTL_MS};
use scribe_core::{now_millis, Document, DocumentId, Principal, UserProfile};
use scribe_store::{DocumentStore, StoreError};

use crate::error::GatewayError;
use crate::gateway::DocumentGateway;

/// A fully authenticated caller: validated principal plus profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The typed principal, built from validated claims.
    pub principal: Principal,
    /// Profile fields for the room display identity.
    pub profile: UserProfile,
}

/// A short-lived credential scoped to the document-query service.
///
/// Opaque to this layer; obtained per request and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegatedToken(String);

impl DelegatedToken {
    /// Wrap a token issued by the identity provider.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The authentication provider boundary.
///
/// Any failure on this seam is treated as unauthenticated; the authorizer
/// never distinguishes "no such user" from "provider down".
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the caller's credentials into an authenticated user.
    async fn authenticate(&self, credentials: &str) -> Option<AuthenticatedUser>;

    /// Obtain a short-lived credential for the document-query service.
    async fn delegated_token(&self, user: &AuthenticatedUser) -> Option<DelegatedToken>;
}

/// The document-query boundary the authorizer reads through.
///
/// The delegated token is the capability for the query; in-process
/// implementations delegate to the gateway, remote ones would send it on
/// the wire.
#[async_trait]
pub trait DocumentQuery: Send + Sync {
    /// Fetch a document by id. `None` means the document does not exist;
    /// `Err` is a transport/backend failure.
    async fn fetch(
        &self,
        token: &DelegatedToken,
        id: &DocumentId,
    ) -> Result<Option<Document>, StoreError>;
}

/// In-process [`DocumentQuery`] over the gateway's read path.
///
/// The delegated token is accepted as the capability for the call; with
/// the gateway in the same process there is nothing to send it to, but
/// the seam stays identical to a remote query service.
pub struct GatewayQuery<S: DocumentStore> {
    gateway: Arc<DocumentGateway<S>>,
}

impl<S: DocumentStore> GatewayQuery<S> {
    /// Wrap a shared gateway handle.
    pub fn new(gateway: Arc<DocumentGateway<S>>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentQuery for GatewayQuery<S> {
    async fn fetch(
        &self,
        _token: &DelegatedToken,
        id: &DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        match self.gateway.get_by_id(id).await {
            Ok(doc) => Ok(Some(doc)),
            Err(GatewayError::NotFound) => Ok(None),
            Err(GatewayError::Upstream(e)) => Err(e),
            Err(other) => Err(StoreError::InvalidData(other.to_string())),
        }
    }
}

/// What the room service returned for a grant: an opaque body plus the
/// status code to pass through to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedGrant {
    /// Status code from the grant-issuance step.
    pub status: u16,
    /// Opaque grant body.
    pub body: String,
}

/// Failure while talking to the room service.
#[derive(Debug, Error)]
#[error("room service error: {0}")]
pub struct RoomServiceError(pub String);

/// The collaboration room service boundary.
///
/// This system only issues grants; it never participates in the sync
/// protocol behind this seam.
#[async_trait]
pub trait RoomService: Send + Sync {
    /// Exchange a minted grant for the room service's response.
    async fn issue(&self, grant: &SessionGrant) -> Result<IssuedGrant, RoomServiceError>;
}

/// A transport-agnostic authorize request.
#[derive(Debug, Clone, Default)]
pub struct AuthorizeRequest {
    /// Caller credentials (e.g. a bearer token), if any were presented.
    pub credentials: Option<String>,
    /// The requested room id, if any was supplied.
    pub room_id: Option<String>,
}

/// A transport-agnostic authorize response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizeResponse {
    /// HTTP-equivalent status code.
    pub status: u16,
    /// Short diagnostic string or opaque grant body.
    pub body: String,
}

/// Why an authorize attempt was refused. Each variant maps to exactly one
/// externally observable status; bodies are short diagnostics, and the
/// forbidden body deliberately reveals nothing about the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizeError {
    /// No valid principal or no delegated credential.
    #[error("unauthorized")]
    Unauthenticated,

    /// Missing or malformed room id.
    #[error("roomId is required")]
    BadRequest,

    /// The document behind the room does not exist.
    #[error("document not found")]
    NotFound,

    /// The evaluator denied access.
    #[error("access denied")]
    Forbidden,

    /// The document-query service failed.
    #[error("error querying document")]
    Upstream,

    /// The room service failed after a valid grant was minted.
    #[error("internal server error")]
    Internal,
}

impl AuthorizeError {
    /// HTTP-equivalent status.
    pub fn status(&self) -> u16 {
        match self {
            AuthorizeError::BadRequest => 400,
            AuthorizeError::Unauthenticated => 401,
            AuthorizeError::Forbidden => 403,
            AuthorizeError::NotFound => 404,
            AuthorizeError::Upstream | AuthorizeError::Internal => 500,
        }
    }
}

impl From<AuthorizeError> for AuthorizeResponse {
    fn from(err: AuthorizeError) -> Self {
        Self {
            status: err.status(),
            body: err.to_string(),
        }
    }
}

/// The session authorizer.
///
/// Stateless per request; every collaborator is injected, none are
/// ambient singletons.
pub struct SessionAuthorizer<Q, I, R> {
    documents: Q,
    identity: I,
    rooms: R,
    grant_ttl_ms: i64,
}

impl<Q, I, R> SessionAuthorizer<Q, I, R>
where
    Q: DocumentQuery,
    I: IdentityProvider,
    R: RoomService,
{
    /// Build an authorizer with the default one-hour grant TTL.
    pub fn new(documents: Q, identity: I, rooms: R) -> Self {
        Self {
            documents,
            identity,
            rooms,
            grant_ttl_ms: DEFAULT_GRANT_TTL_MS,
        }
    }

    /// Override the grant TTL.
    pub fn with_grant_ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.grant_ttl_ms = ttl_ms;
        self
    }

    /// Run the full authorize protocol and flatten the outcome into a
    /// status/body pair.
    pub async fn authorize(&self, req: AuthorizeRequest) -> AuthorizeResponse {
        match self.try_authorize(req).await {
            Ok(issued) => AuthorizeResponse {
                status: issued.status,
                body: issued.body,
            },
            Err(err) => err.into(),
        }
    }

    /// The gate itself. No grant is minted unless every step succeeds.
    async fn try_authorize(&self, req: AuthorizeRequest) -> Result<IssuedGrant, AuthorizeError> {
        // 1. Authenticate the caller.
        let credentials = req
            .credentials
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(AuthorizeError::Unauthenticated)?;
        let user = self
            .identity
            .authenticate(credentials)
            .await
            .ok_or(AuthorizeError::Unauthenticated)?;

        // 2. Validate the requested room id.
        let room_id = req
            .room_id
            .as_deref()
            .and_then(DocumentId::parse)
            .ok_or(AuthorizeError::BadRequest)?;

        // 3. Obtain the delegated document-query credential.
        let token = self
            .identity
            .delegated_token(&user)
            .await
            .ok_or(AuthorizeError::Unauthenticated)?;

        // 4. Fetch fresh document state.
        let doc = self
            .documents
            .fetch(&token, &room_id)
            .await
            .map_err(|e| {
                tracing::error!(room = %room_id, error = %e, "document query failed");
                AuthorizeError::Upstream
            })?
            .ok_or(AuthorizeError::NotFound)?;

        // 5. Re-run the evaluator against what was just fetched.
        if !can_access(&doc, &user.principal) {
            tracing::warn!(room = %room_id, subject = %user.principal.subject, "join denied");
            return Err(AuthorizeError::Forbidden);
        }

        // 6. Mint the grant. The room scope is the fetched document's id,
        // not the caller-supplied string.
        let grant = SessionGrant::full_access(
            user.principal.subject.clone(),
            doc.id.clone(),
            user.profile.display_identity(),
            now_millis(),
            self.grant_ttl_ms,
        );

        // 7. Pass the room service's answer through verbatim.
        self.rooms.issue(&grant).await.map_err(|e| {
            tracing::error!(room = %grant.room, error = %e, "grant issuance failed");
            AuthorizeError::Internal
        })
    }
}
