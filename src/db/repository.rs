use log::debug;
use rusqlite::Connection;
use thiserror::Error;

use crate::config::DbConfig;
use crate::models::{Book, LibraryStats, SearchField};

use super::books::{
    count_books, count_read_books, delete_books_by_title, fetch_all_books, insert_book,
    search_books,
};
use super::connection::{connect, ConnectError};

/// Failure of a single catalog operation.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No connection could be opened; nothing was attempted.
    #[error(transparent)]
    Connection(#[from] ConnectError),
    /// The driver rejected or failed a statement.
    #[error(transparent)]
    Query(#[from] anyhow::Error),
}

/// Entry point for the five catalog operations. Every operation runs on its
/// own connection: either call [`BookRepository::open`] and work through the
/// returned session, or use the one-shot helpers that open and drop one.
#[derive(Debug, Clone)]
pub struct BookRepository {
    config: DbConfig,
}

impl BookRepository {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    /// Open the connection for one operation. Interactive callers do this
    /// before asking for input so an unreachable database is reported first.
    pub fn open(&self) -> Result<CatalogSession, ConnectError> {
        Ok(CatalogSession {
            conn: connect(&self.config)?,
        })
    }

    pub fn list_all(&self) -> Result<Vec<Book>, CatalogError> {
        self.open()?.list_all()
    }

    pub fn add(&self, book: &Book) -> Result<(), CatalogError> {
        self.open()?.add(book)
    }

    pub fn remove(&self, title: &str) -> Result<usize, CatalogError> {
        self.open()?.remove(title)
    }

    pub fn search(&self, field: SearchField, term: &str) -> Result<Vec<Book>, CatalogError> {
        self.open()?.search(field, term)
    }

    pub fn stats(&self) -> Result<LibraryStats, CatalogError> {
        self.open()?.stats()
    }
}

/// One open connection. Dropping the session closes it.
#[derive(Debug)]
pub struct CatalogSession {
    conn: Connection,
}

impl CatalogSession {
    pub fn list_all(&self) -> Result<Vec<Book>, CatalogError> {
        Ok(fetch_all_books(&self.conn)?)
    }

    /// Insert `book` and commit. A failed insert rolls back when the
    /// transaction is dropped.
    pub fn add(&mut self, book: &Book) -> Result<(), CatalogError> {
        let tx = self.conn.transaction().map_err(anyhow::Error::from)?;
        insert_book(&tx, book)?;
        tx.commit().map_err(anyhow::Error::from)?;
        debug!("added {:?}", book.title);
        Ok(())
    }

    /// Remove every book titled `title` (case-insensitive) and return how
    /// many were deleted.
    pub fn remove(&mut self, title: &str) -> Result<usize, CatalogError> {
        let tx = self.conn.transaction().map_err(anyhow::Error::from)?;
        let deleted = delete_books_by_title(&tx, title)?;
        tx.commit().map_err(anyhow::Error::from)?;
        debug!("removed {deleted} row(s) titled {title:?}");
        Ok(deleted)
    }

    pub fn search(&self, field: SearchField, term: &str) -> Result<Vec<Book>, CatalogError> {
        Ok(search_books(&self.conn, field, term)?)
    }

    pub fn stats(&self) -> Result<LibraryStats, CatalogError> {
        let total = count_books(&self.conn)?;
        let read = count_read_books(&self.conn)?;
        Ok(LibraryStats { total, read })
    }
}
