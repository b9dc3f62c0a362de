//! The permission evaluator.
//!
//! A single pure rule decides every document access in the system:
//!
//! ```text
//! is_owner    = document.owner == principal.subject
//! is_same_org = principal.org != None
//!               AND document.org != None
//!               AND principal.org == document.org
//! granted     = is_owner OR is_same_org
//! ```
//!
//! There is no wildcard or admin override. The evaluator never fails;
//! callers translate `false` into an authorization failure.

use scribe_core::{Document, Principal};

/// The two factors the rule evaluates, kept separate so callers can log
/// which one admitted the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    /// The principal is the document's owner.
    pub is_owner: bool,
    /// Both sides carry an organization scope and they match.
    pub is_same_org: bool,
}

impl Access {
    /// Evaluate the rule for a document/principal pair.
    pub fn evaluate(doc: &Document, principal: &Principal) -> Self {
        let is_owner = doc.owner == principal.subject;

        let is_same_org = match (&principal.org, &doc.org) {
            (Some(p), Some(d)) => p == d,
            _ => false,
        };

        Self {
            is_owner,
            is_same_org,
        }
    }

    /// Whether access is granted.
    pub fn granted(&self) -> bool {
        self.is_owner || self.is_same_org
    }
}

/// May `principal` read `doc`?
pub fn can_access(doc: &Document, principal: &Principal) -> bool {
    Access::evaluate(doc, principal).granted()
}

/// May `principal` mutate (update, delete) `doc`?
///
/// Same rule as [`can_access`]: ownership or shared organization scope.
/// Kept as a separate entry point so mutation sites read as mutation
/// checks and the rule can diverge later without touching callers.
pub fn can_mutate(doc: &Document, principal: &Principal) -> bool {
    can_access(doc, principal)
}
