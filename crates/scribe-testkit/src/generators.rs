//! Proptest generators for property-based testing.

use proptest::prelude::*;

use scribe_core::{Document, DocumentId, OrgId, Principal, SubjectId};

/// Generate a random subject id.
pub fn subject_id() -> impl Strategy<Value = SubjectId> {
    "[a-z][a-z0-9]{3,11}".prop_map(SubjectId::new)
}

/// Generate a random organization id.
pub fn org_id() -> impl Strategy<Value = OrgId> {
    "org-[a-z0-9]{4,8}".prop_map(OrgId::new)
}

/// Generate an optional organization id (roughly half present).
pub fn maybe_org() -> impl Strategy<Value = Option<OrgId>> {
    prop::option::of(org_id())
}

/// Generate a random principal.
pub fn principal() -> impl Strategy<Value = Principal> {
    (subject_id(), maybe_org()).prop_map(|(subject, org)| Principal { subject, org })
}

/// Generate a document title.
pub fn title() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ]{0,40}"
}

/// Generate a random document.
pub fn document() -> impl Strategy<Value = Document> {
    (
        "[a-f0-9]{32}",
        title(),
        prop::option::of("[ -~]{0,64}"),
        subject_id(),
        maybe_org(),
        0i64..=i64::MAX / 2,
    )
        .prop_map(|(id, title, content, owner, org, created_at)| Document {
            id: DocumentId::parse(&id).expect("generated id is well-formed"),
            title,
            content,
            owner,
            org,
            created_at,
        })
}
