//! # Scribe Testkit
//!
//! Testing utilities for the Scribe document kernel.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a memory-backed gateway, canned principals, and stub
//!   identity/room collaborators for exercising the session authorizer
//! - **Generators**: proptest strategies for principals and documents
//!
//! ## Test Fixtures
//!
//! Quickly set up tenant scenarios:
//!
//! ```rust
//! use scribe_testkit::TestFixture;
//!
//! # async fn example() {
//! let fixture = TestFixture::new();
//! let owner = TestFixture::member("ada", "org1");
//! let id = fixture.create_doc(&owner, "Launch plan").await;
//! # }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use scribe_testkit::generators::{document, principal};
//!
//! proptest! {
//!     #[test]
//!     fn owner_is_admitted(mut doc in document(), p in principal()) {
//!         doc.owner = p.subject.clone();
//!         prop_assert!(scribe_authz::can_access(&doc, &p));
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{StubIdentity, StubRooms, TestFixture};
