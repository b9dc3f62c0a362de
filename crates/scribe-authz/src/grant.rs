//! Session-grant payloads.
//!
//! A grant is the ephemeral capability the session authorizer mints after
//! re-validating document permission. It is handed to the collaboration
//! room service, consumed once to establish a connection, and never
//! persisted; each connection attempt mints a fresh one.

use serde::{Deserialize, Serialize};

use scribe_core::{DisplayIdentity, DocumentId, SubjectId};

/// Default grant lifetime: one hour.
pub const DEFAULT_GRANT_TTL_MS: i64 = 60 * 60 * 1000;

/// Access level inside a collaboration room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomAccess {
    /// Full read/write presence in the room.
    Full,
    /// Read-only presence.
    Read,
}

/// An ephemeral authorization for one principal to join one room.
///
/// Rooms are identified 1:1 with documents, so `room` is a document id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGrant {
    /// The principal the grant is issued to.
    pub subject: SubjectId,

    /// The room (document) the grant is scoped to.
    pub room: DocumentId,

    /// Identity shown to other room participants.
    pub identity: DisplayIdentity,

    /// Access level inside the room.
    pub access: RoomAccess,

    /// When the grant was minted (Unix ms).
    pub issued_at: i64,

    /// When the grant stops being accepted (Unix ms).
    pub expires_at: i64,
}

impl SessionGrant {
    /// Mint a full-access grant valid for `ttl_ms` starting at `now`.
    pub fn full_access(
        subject: SubjectId,
        room: DocumentId,
        identity: DisplayIdentity,
        now: i64,
        ttl_ms: i64,
    ) -> Self {
        Self {
            subject,
            room,
            identity,
            access: RoomAccess::Full,
            issued_at: now,
            expires_at: now + ttl_ms,
        }
    }

    /// Whether the grant has expired as of `now`.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::DisplayIdentity;

    fn grant(now: i64, ttl: i64) -> SessionGrant {
        SessionGrant::full_access(
            SubjectId::new("u1"),
            DocumentId::parse("d1").unwrap(),
            DisplayIdentity {
                name: "Ada".to_string(),
                avatar: String::new(),
            },
            now,
            ttl,
        )
    }

    #[test]
    fn test_grant_is_time_boxed() {
        let g = grant(1_000, 500);
        assert_eq!(g.expires_at, 1_500);
        assert!(!g.is_expired(1_499));
        assert!(g.is_expired(1_500));
    }

    #[test]
    fn test_grant_serializes_with_snake_case_access() {
        let g = grant(0, DEFAULT_GRANT_TTL_MS);
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("\"access\":\"full\""));
        let back: SessionGrant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}
