//! # Scribe Authz
//!
//! The permission evaluator and session-grant payloads.
//!
//! ## Overview
//!
//! Every document access in Scribe reduces to one pure rule over
//! `(document.owner, document.org)` and `(principal.subject, principal.org)`:
//! the owner always gets in, and a shared organization scope gets in. See
//! [`access`] for the rule and [`grant`] for the ephemeral room capability
//! minted once the rule admits a join.
//!
//! ## Key Types
//!
//! - [`Access`] - the evaluated rule factors
//! - [`can_access`] / [`can_mutate`] - the evaluator entry points
//! - [`SessionGrant`] - a time-boxed, single-room capability
//! - [`RoomAccess`] - access level carried by a grant

pub mod access;
pub mod grant;

pub use access::{can_access, can_mutate, Access};
pub use grant::{RoomAccess, SessionGrant, DEFAULT_GRANT_TTL_MS};
