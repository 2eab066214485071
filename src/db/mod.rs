//! Persistence module split across logical submodules.

mod books;
mod connection;
mod repository;

pub use books::{
    count_books, count_read_books, delete_books_by_title, fetch_all_books, insert_book,
    register_functions, search_books,
};
pub use connection::{connect, database_path, ensure_schema, ConnectError};
pub use repository::{BookRepository, CatalogError, CatalogSession};
