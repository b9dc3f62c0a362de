//! In-memory implementation of the DocumentStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use scribe_core::{
    Document, DocumentId, DocumentPatch, Page, PageRequest,
};

use crate::error::{Result, StoreError};
use crate::traits::{DocScope, DocumentStore};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Documents indexed by id, tagged with their insertion sequence.
    docs: HashMap<DocumentId, (u64, Document)>,

    /// Insertion order: seq -> document id.
    order: BTreeMap<u64, DocumentId>,

    /// Next insertion sequence.
    next_seq: u64,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                docs: HashMap::new(),
                order: BTreeMap::new(),
                next_seq: 1,
            }),
        }
    }

    /// Collect one page of scoped rows, optionally title-filtered.
    fn page_rows(
        inner: &MemoryStoreInner,
        scope: &DocScope,
        term: Option<&str>,
        page: &PageRequest,
    ) -> Page<Document> {
        let start = page.cursor.map(|c| c.0 + 1).unwrap_or(0);
        let needle = term.map(str::to_lowercase);

        let rows: Vec<(u64, Document)> = inner
            .order
            .range(start..)
            .filter_map(|(&seq, id)| {
                let (_, doc) = inner.docs.get(id)?;
                if !scope.contains(doc) {
                    return None;
                }
                if let Some(needle) = &needle {
                    if !doc.title.to_lowercase().contains(needle) {
                        return None;
                    }
                }
                Some((seq, doc.clone()))
            })
            .take(page.page_size as usize + 1)
            .collect();

        Page::assemble(rows, page.page_size, page.cursor.is_some())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, doc: &Document) -> Result<()> {
        let mut inner = self.inner.write().unwrap();

        if inner.docs.contains_key(&doc.id) {
            return Err(StoreError::InvalidData(format!(
                "duplicate document id: {}",
                doc.id
            )));
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.order.insert(seq, doc.id.clone());
        inner.docs.insert(doc.id.clone(), (seq, doc.clone()));

        Ok(())
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<Document>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.docs.get(id).map(|(_, doc)| doc.clone()))
    }

    async fn get_many(&self, ids: &[DocumentId]) -> Result<Vec<Option<Document>>> {
        let inner = self.inner.read().unwrap();
        Ok(ids
            .iter()
            .map(|id| inner.docs.get(id).map(|(_, doc)| doc.clone()))
            .collect())
    }

    async fn list_page(&self, scope: &DocScope, page: &PageRequest) -> Result<Page<Document>> {
        let inner = self.inner.read().unwrap();
        Ok(Self::page_rows(&inner, scope, None, page))
    }

    async fn search_page(
        &self,
        scope: &DocScope,
        term: &str,
        page: &PageRequest,
    ) -> Result<Page<Document>> {
        let inner = self.inner.read().unwrap();
        Ok(Self::page_rows(&inner, scope, Some(term), page))
    }

    async fn patch(&self, id: &DocumentId, patch: &DocumentPatch) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();

        match inner.docs.get_mut(id) {
            Some((_, doc)) => {
                doc.apply_patch(patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &DocumentId) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();

        match inner.docs.remove(id) {
            Some((seq, _)) => {
                inner.order.remove(&seq);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
