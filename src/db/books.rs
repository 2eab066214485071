use anyhow::{Context, Result};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, Row};

use crate::models::{Book, SearchField};

const SELECT_BOOKS: &str = "SELECT title, author, year, genre, read_status FROM books";

const SEARCH_BY_TITLE: &str = "SELECT title, author, year, genre, read_status FROM books
     WHERE unicode_lower(title) LIKE '%' || unicode_lower(?1) || '%' ESCAPE '\\'";

const SEARCH_BY_AUTHOR: &str = "SELECT title, author, year, genre, read_status FROM books
     WHERE unicode_lower(author) LIKE '%' || unicode_lower(?1) || '%' ESCAPE '\\'";

/// Register `unicode_lower(text)`, a full Unicode lowercase. SQLite's own
/// `LOWER` only folds ASCII, so `É` would never match `é`. Every connection
/// that runs the statements below needs it.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "unicode_lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            Ok(match ctx.get_raw(0) {
                ValueRef::Null => None,
                ValueRef::Integer(value) => Some(value.to_string()),
                ValueRef::Real(value) => Some(value.to_string()),
                ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                    Some(String::from_utf8_lossy(bytes).to_lowercase())
                }
            })
        },
    )
}

/// Retrieve every book in the order the database returns them. No `ORDER BY`
/// on purpose: the listing mirrors insertion order.
pub fn fetch_all_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn
        .prepare(SELECT_BOOKS)
        .context("failed to prepare book query")?;

    let books = stmt
        .query_map([], book_from_row)
        .context("failed to load books")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect books")?;

    Ok(books)
}

/// Insert a single book with every field bound as a parameter.
pub fn insert_book(conn: &Connection, book: &Book) -> Result<()> {
    conn.execute(
        "INSERT INTO books (title, author, year, genre, read_status) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            book.title,
            book.author,
            book.year,
            book.genre,
            book.read_status
        ],
    )
    .context("failed to insert book")?;
    Ok(())
}

/// Delete every book whose title matches case-insensitively and report how
/// many rows went away. Zero is a normal outcome, not an error.
pub fn delete_books_by_title(conn: &Connection, title: &str) -> Result<usize> {
    let deleted = conn
        .execute(
            "DELETE FROM books WHERE unicode_lower(title) = unicode_lower(?1)",
            params![title],
        )
        .context("failed to delete book")?;
    Ok(deleted)
}

/// Case-insensitive substring search on one allow-listed column. Wildcards in
/// the term are escaped so `%` and `_` match themselves.
pub fn search_books(conn: &Connection, field: SearchField, term: &str) -> Result<Vec<Book>> {
    let sql = match field {
        SearchField::Title => SEARCH_BY_TITLE,
        SearchField::Author => SEARCH_BY_AUTHOR,
    };

    let mut stmt = conn
        .prepare(sql)
        .with_context(|| format!("failed to prepare {field} search"))?;

    let books = stmt
        .query_map([escape_like(term)], book_from_row)
        .with_context(|| format!("failed to search by {field}"))?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect search results")?;

    Ok(books)
}

pub fn count_books(conn: &Connection) -> Result<u64> {
    conn.query_row("SELECT COUNT(*) FROM books", [], count_from_row)
        .context("failed to count books")
}

pub fn count_read_books(conn: &Connection) -> Result<u64> {
    conn.query_row(
        "SELECT COUNT(*) FROM books WHERE read_status = TRUE",
        [],
        count_from_row,
    )
    .context("failed to count read books")
}

// COUNT(*) is never negative.
fn count_from_row(row: &Row<'_>) -> rusqlite::Result<u64> {
    row.get::<_, i64>(0).map(|count| count.max(0) as u64)
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        title: row.get(0)?,
        author: row.get(1)?,
        year: loose_text(row, 2)?,
        genre: loose_text(row, 3)?,
        read_status: row.get(4)?,
    })
}

/// Read a column as text whatever its storage class. Catalogs created
/// elsewhere may declare `year` as an integer column.
fn loose_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(value) => value.to_string(),
        ValueRef::Real(value) => value.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    })
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
