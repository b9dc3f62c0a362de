//! # Scribe Core
//!
//! Strong types and the data model shared by every Scribe crate.
//!
//! ## Key Types
//!
//! - [`DocumentId`], [`SubjectId`], [`OrgId`] - opaque id newtypes
//! - [`Principal`] - an authenticated caller, built once at the auth boundary
//! - [`Document`], [`DocumentPatch`], [`DocumentInfo`] - the document record
//! - [`Page`], [`PageRequest`], [`Cursor`], [`PageStatus`] - forward pagination
//!
//! ## Design Notes
//!
//! - Ids are opaque strings; nothing in this workspace inspects their shape
//!   beyond malformed-input rejection.
//! - A [`Principal`] carries `(subject, org?)` by value. Downstream code
//!   never reaches back into raw auth claims.
//! - [`DocumentPatch`] is a partial update: `None` means "keep", never
//!   "clear".

pub mod document;
pub mod page;
pub mod types;

pub use document::{Document, DocumentInfo, DocumentPatch, REMOVED_LABEL, UNTITLED_TITLE};
pub use page::{Cursor, Page, PageRequest, PageStatus};
pub use types::{
    DisplayIdentity, DocumentId, OrgId, Principal, SubjectId, UserProfile, MAX_ID_LEN,
};

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
