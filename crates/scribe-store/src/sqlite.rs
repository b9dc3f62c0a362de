//! SQLite implementation of the DocumentStore trait.
//!
//! This is the primary storage backend for Scribe. It uses rusqlite with
//! bundled SQLite behind a mutex-guarded connection.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use scribe_core::{
    Document, DocumentId, DocumentPatch, Page, PageRequest,
};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{DocScope, DocumentStore};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Execute a blocking operation on the connection.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| {
            StoreError::InvalidData(format!("connection mutex poisoned: {}", e))
        })?;
        f(&conn)
    }

    /// One page of rows for `scope`, optionally title-filtered by `term`.
    fn query_page(
        &self,
        scope: &DocScope,
        term: Option<&str>,
        page: &PageRequest,
    ) -> Result<Page<Document>> {
        // The scope column is one of two fixed names; only values are bound.
        let (scope_col, scope_val) = match scope {
            DocScope::Owner(subject) => ("owner_id", subject.as_str()),
            DocScope::Organization(org) => ("organization_id", org.as_str()),
        };

        // seq starts at 1, so "after 0" means "from the beginning".
        let after = page.cursor.map(|c| c.0 as i64).unwrap_or(0);
        let limit = page.page_size as i64 + 1;

        let rows = self.with_conn(|conn| {
            let mut out: Vec<(u64, Document)> = Vec::new();

            if let Some(term) = term {
                let sql = format!(
                    "SELECT seq, id, title, content, owner_id, organization_id, created_at
                     FROM documents
                     WHERE {scope_col} = ?1 AND seq > ?2
                       AND instr(lower(title), lower(?3)) > 0
                     ORDER BY seq ASC LIMIT ?4"
                );
                let mut stmt = conn.prepare(&sql)?;
                let mapped = stmt.query_map(params![scope_val, after, term, limit], |row| {
                    Ok((row.get::<_, i64>("seq")? as u64, row_to_document(row)?))
                })?;
                for row in mapped {
                    out.push(row?);
                }
            } else {
                let sql = format!(
                    "SELECT seq, id, title, content, owner_id, organization_id, created_at
                     FROM documents
                     WHERE {scope_col} = ?1 AND seq > ?2
                     ORDER BY seq ASC LIMIT ?3"
                );
                let mut stmt = conn.prepare(&sql)?;
                let mapped = stmt.query_map(params![scope_val, after, limit], |row| {
                    Ok((row.get::<_, i64>("seq")? as u64, row_to_document(row)?))
                })?;
                for row in mapped {
                    out.push(row?);
                }
            }

            Ok(out)
        })?;

        Ok(Page::assemble(rows, page.page_size, page.cursor.is_some()))
    }
}

/// Helper to convert a row to a Document.
fn row_to_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<Document> {
    let id: String = row.get("id")?;
    let owner: String = row.get("owner_id")?;
    let org: Option<String> = row.get("organization_id")?;

    Ok(Document {
        id: DocumentId::parse(&id).ok_or_else(|| {
            rusqlite::Error::InvalidColumnType(1, "id".into(), rusqlite::types::Type::Text)
        })?,
        title: row.get("title")?,
        content: row.get("content")?,
        owner: scribe_core::SubjectId::new(owner),
        org: org.map(scribe_core::OrgId::new),
        created_at: row.get("created_at")?,
    })
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert(&self, doc: &Document) -> Result<()> {
        self.with_conn(|conn| {
            let exists: Option<i64> = conn
                .query_row(
                    "SELECT seq FROM documents WHERE id = ?1",
                    params![doc.id.as_str()],
                    |row| row.get(0),
                )
                .optional()?;
            if exists.is_some() {
                return Err(StoreError::InvalidData(format!(
                    "duplicate document id: {}",
                    doc.id
                )));
            }

            conn.execute(
                "INSERT INTO documents (id, title, content, owner_id, organization_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    doc.id.as_str(),
                    doc.title,
                    doc.content,
                    doc.owner.as_str(),
                    doc.org.as_ref().map(|o| o.as_str()),
                    doc.created_at,
                ],
            )?;
            Ok(())
        })
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<Document>> {
        self.with_conn(|conn| {
            let doc = conn
                .query_row(
                    "SELECT seq, id, title, content, owner_id, organization_id, created_at
                     FROM documents WHERE id = ?1",
                    params![id.as_str()],
                    row_to_document,
                )
                .optional()?;
            Ok(doc)
        })
    }

    async fn get_many(&self, ids: &[DocumentId]) -> Result<Vec<Option<Document>>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT seq, id, title, content, owner_id, organization_id, created_at
                 FROM documents WHERE id = ?1",
            )?;

            let mut out = Vec::with_capacity(ids.len());
            for id in ids {
                let doc = stmt
                    .query_row(params![id.as_str()], row_to_document)
                    .optional()?;
                out.push(doc);
            }
            Ok(out)
        })
    }

    async fn list_page(&self, scope: &DocScope, page: &PageRequest) -> Result<Page<Document>> {
        self.query_page(scope, None, page)
    }

    async fn search_page(
        &self,
        scope: &DocScope,
        term: &str,
        page: &PageRequest,
    ) -> Result<Page<Document>> {
        self.query_page(scope, Some(term), page)
    }

    async fn patch(&self, id: &DocumentId, patch: &DocumentPatch) -> Result<bool> {
        self.with_conn(|conn| {
            // COALESCE keeps the stored value for omitted fields.
            let changed = conn.execute(
                "UPDATE documents
                 SET title = COALESCE(?2, title),
                     content = COALESCE(?3, content)
                 WHERE id = ?1",
                params![id.as_str(), patch.title, patch.content],
            )?;
            Ok(changed > 0)
        })
    }

    async fn delete(&self, id: &DocumentId) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "DELETE FROM documents WHERE id = ?1",
                params![id.as_str()],
            )?;
            Ok(changed > 0)
        })
    }
}
