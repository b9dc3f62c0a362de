//! Strong type definitions for the Scribe kernel.
//!
//! All identifiers are newtypes to prevent misuse at compile time. Ids are
//! opaque strings assigned by whatever system minted them (the store for
//! documents, the identity provider for subjects and organizations).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest identifier we accept from the outside world.
///
/// Anything longer is treated as malformed input rather than an id.
pub const MAX_ID_LEN: usize = 128;

/// Opaque identifier of a document. Assigned once at creation, immutable.
///
/// A document id doubles as the collaboration room id: rooms are 1:1 with
/// documents.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Mint a fresh random document id (16 random bytes, hex-encoded).
    pub fn generate() -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Parse an externally supplied id, rejecting malformed input.
    ///
    /// Returns `None` for empty (after trimming) or oversized strings.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > MAX_ID_LEN {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// The raw string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an authenticated subject (a user).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Wrap a subject id handed to us by the identity provider.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubjectId({})", self.0)
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a tenant organization.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(String);

impl OrgId {
    /// Wrap an organization id handed to us by the identity provider.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrgId({})", self.0)
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An authenticated caller.
///
/// Constructed once at the authentication boundary from validated claims
/// and passed by value into every downstream check. There is deliberately
/// no way to build one from an untyped claims bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The subject (user) this principal authenticates as.
    pub subject: SubjectId,

    /// The organization context the caller is acting in, if any.
    ///
    /// `None` means a personal context: the caller sees only documents
    /// they own.
    pub org: Option<OrgId>,
}

impl Principal {
    /// A principal acting in a personal (no organization) context.
    pub fn personal(subject: SubjectId) -> Self {
        Self { subject, org: None }
    }

    /// A principal acting within an organization.
    pub fn in_org(subject: SubjectId, org: OrgId) -> Self {
        Self {
            subject,
            org: Some(org),
        }
    }
}

/// Profile fields supplied by the identity provider for a subject.
///
/// Every field is optional; the provider may know nothing beyond the
/// subject id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Full display name.
    pub name: Option<String>,
    /// Primary email address.
    pub email: Option<String>,
    /// Avatar image URL.
    pub avatar: Option<String>,
}

impl UserProfile {
    /// Derive the identity shown to other room participants.
    ///
    /// Name falls back through email to "Anonymous"; a missing avatar
    /// becomes the empty string.
    pub fn display_identity(&self) -> DisplayIdentity {
        DisplayIdentity {
            name: self
                .name
                .clone()
                .or_else(|| self.email.clone())
                .unwrap_or_else(|| "Anonymous".to_string()),
            avatar: self.avatar.clone().unwrap_or_default(),
        }
    }
}

/// The identity carried inside a session grant and shown in the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayIdentity {
    /// Display name, never empty.
    pub name: String,
    /// Avatar URL, possibly empty.
    pub avatar: String,
}
