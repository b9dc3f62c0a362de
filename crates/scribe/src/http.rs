//! The HTTP surface: a thin axum layer over the session authorizer.
//!
//! One boundary route, `GET|POST /session-authorize?roomId=<id>`, plus an
//! internal health probe. Responses are a status code and a short
//! diagnostic string (or the opaque grant body) - never structured JSON.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::session::{
    AuthorizeRequest, DocumentQuery, IdentityProvider, RoomService, SessionAuthorizer,
};

/// Query parameters of the session-authorize route.
#[derive(Debug, Deserialize)]
pub struct SessionAuthorizeParams {
    /// The room (document) id being joined.
    #[serde(rename = "roomId")]
    pub room_id: Option<String>,
}

/// Optional JSON body of a POSTed session-authorize request.
#[derive(Debug, Default, Deserialize)]
pub struct SessionAuthorizeBody {
    /// The room (document) id being joined.
    #[serde(rename = "roomId")]
    pub room_id: Option<String>,
}

/// Build the router for the session-authorize boundary.
pub fn router<Q, I, R>(authorizer: Arc<SessionAuthorizer<Q, I, R>>) -> Router
where
    Q: DocumentQuery + 'static,
    I: IdentityProvider + 'static,
    R: RoomService + 'static,
{
    Router::new()
        .route(
            "/session-authorize",
            get(session_authorize_handler::<Q, I, R>).post(session_authorize_handler::<Q, I, R>),
        )
        .route("/internal/health", get(health_handler))
        .with_state(authorizer)
}

/// Pull a bearer credential out of the Authorization header.
fn bearer_credentials(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    Some(token.to_string())
}

#[tracing::instrument(skip_all)]
async fn session_authorize_handler<Q, I, R>(
    State(authorizer): State<Arc<SessionAuthorizer<Q, I, R>>>,
    Query(params): Query<SessionAuthorizeParams>,
    headers: HeaderMap,
    body: Option<Json<SessionAuthorizeBody>>,
) -> (StatusCode, String)
where
    Q: DocumentQuery + 'static,
    I: IdentityProvider + 'static,
    R: RoomService + 'static,
{
    // roomId may arrive as a query parameter or, on POST, in the body.
    let room_id = params
        .room_id
        .or_else(|| body.and_then(|Json(b)| b.room_id));

    let response = authorizer
        .authorize(AuthorizeRequest {
            credentials: bearer_credentials(&headers),
            room_id,
        })
        .await;

    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, response.body)
}

async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use scribe_authz::SessionGrant;
    use scribe_core::{
        Document, DocumentId, Principal, SubjectId, UserProfile,
    };
    use scribe_store::StoreError;

    use crate::session::{
        AuthenticatedUser, DelegatedToken, IssuedGrant, RoomServiceError,
    };

    struct OneUserIdentity;

    #[async_trait]
    impl IdentityProvider for OneUserIdentity {
        async fn authenticate(&self, credentials: &str) -> Option<AuthenticatedUser> {
            (credentials == "valid-token").then(|| AuthenticatedUser {
                principal: Principal::personal(SubjectId::new("u1")),
                profile: UserProfile::default(),
            })
        }

        async fn delegated_token(&self, _user: &AuthenticatedUser) -> Option<DelegatedToken> {
            Some(DelegatedToken::new("delegated"))
        }
    }

    struct OneDocQuery;

    #[async_trait]
    impl DocumentQuery for OneDocQuery {
        async fn fetch(
            &self,
            _token: &DelegatedToken,
            id: &DocumentId,
        ) -> Result<Option<Document>, StoreError> {
            if id.as_str() != "doc-1" {
                return Ok(None);
            }
            Ok(Some(Document {
                id: id.clone(),
                title: "t".to_string(),
                content: None,
                owner: SubjectId::new("u1"),
                org: None,
                created_at: 0,
            }))
        }
    }

    struct EchoRooms;

    #[async_trait]
    impl RoomService for EchoRooms {
        async fn issue(&self, grant: &SessionGrant) -> Result<IssuedGrant, RoomServiceError> {
            Ok(IssuedGrant {
                status: 200,
                body: serde_json::to_string(grant)
                    .map_err(|e| RoomServiceError(e.to_string()))?,
            })
        }
    }

    fn test_router() -> Router {
        let authorizer = SessionAuthorizer::new(OneDocQuery, OneUserIdentity, EchoRooms);
        router(Arc::new(authorizer))
    }

    async fn send(
        app: Router,
        uri: &str,
        auth: Option<&str>,
    ) -> (StatusCode, String) {
        let mut req = axum::http::Request::builder().method("GET").uri(uri);
        if let Some(auth) = auth {
            req = req.header("authorization", format!("Bearer {auth}"));
        }
        let response = app
            .oneshot(req.body(axum::body::Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_authorize_roundtrip_over_http() {
        let (status, body) =
            send(test_router(), "/session-authorize?roomId=doc-1", Some("valid-token")).await;
        assert_eq!(status, StatusCode::OK);
        let grant: SessionGrant = serde_json::from_str(&body).unwrap();
        assert_eq!(grant.room.as_str(), "doc-1");
    }

    #[tokio::test]
    async fn test_missing_room_id_is_bad_request() {
        let (status, body) =
            send(test_router(), "/session-authorize", Some("valid-token")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "roomId is required");
    }

    #[tokio::test]
    async fn test_missing_bearer_is_unauthorized() {
        let (status, _) = send(test_router(), "/session-authorize?roomId=doc-1", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_room_is_not_found() {
        let (status, _) =
            send(test_router(), "/session-authorize?roomId=ghost", Some("valid-token")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_body_room_id_accepted() {
        let app = test_router();
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/session-authorize")
            .header("authorization", "Bearer valid-token")
            .header("content-type", "application/json")
            .body(axum::body::Body::from(r#"{"roomId":"doc-1"}"#))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_probe() {
        let (status, body) = send(test_router(), "/internal/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }
}
