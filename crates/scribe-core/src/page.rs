//! Forward pagination: opaque cursors and page envelopes.
//!
//! Cursors order by insertion sequence. A cursor handed back from one page
//! stays valid under concurrent inserts: new rows land at higher sequences
//! and can only show up in later pages, so already-returned items never
//! reappear. Nothing re-sorts between pages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque continuation cursor.
///
/// Internally the insertion sequence of the last item returned; callers
/// must treat it as opaque and only feed it back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(pub u64);

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cursor {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A forward-pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Continue after this cursor, or start from the beginning.
    pub cursor: Option<Cursor>,
    /// Maximum number of items to return.
    pub page_size: u32,
}

impl PageRequest {
    /// Request the first page.
    pub fn first(page_size: u32) -> Self {
        Self {
            cursor: None,
            page_size,
        }
    }

    /// Request the page after `cursor`.
    pub fn after(cursor: Cursor, page_size: u32) -> Self {
        Self {
            cursor: Some(cursor),
            page_size,
        }
    }
}

/// Where a page sits in the overall result stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageStatus {
    /// First page (no cursor supplied) and more results remain.
    FirstPage,
    /// Continuation page and more results remain.
    HasMore,
    /// No further results after this page.
    Exhausted,
}

impl PageStatus {
    /// Classify a page from the request shape and whether items remain.
    pub fn classify(had_cursor: bool, has_more: bool) -> Self {
        match (has_more, had_cursor) {
            (false, _) => Self::Exhausted,
            (true, false) => Self::FirstPage,
            (true, true) => Self::HasMore,
        }
    }
}

/// One page of results plus its continuation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items of this page, in insertion order.
    pub items: Vec<T>,
    /// Cursor for the next page; `None` once exhausted.
    pub next_cursor: Option<Cursor>,
    /// Continuation status.
    pub status: PageStatus,
}

impl<T> Page<T> {
    /// An exhausted page with no items.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
            status: PageStatus::Exhausted,
        }
    }

    /// Assemble a page from sequence-tagged rows.
    ///
    /// `rows` must be in ascending sequence order and contain at most one
    /// row beyond `page_size` (the lookahead row used to detect more).
    pub fn assemble(mut rows: Vec<(u64, T)>, page_size: u32, had_cursor: bool) -> Self {
        let has_more = rows.len() > page_size as usize;
        rows.truncate(page_size as usize);

        let next_cursor = if has_more {
            rows.last().map(|(seq, _)| Cursor(*seq))
        } else {
            None
        };

        Self {
            items: rows.into_iter().map(|(_, item)| item).collect(),
            next_cursor,
            status: PageStatus::classify(had_cursor, has_more),
        }
    }
}
