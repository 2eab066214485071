//! Core library surface for the Library Catalog manager.
//!
//! The binary only wires these pieces together; tests and other tooling can
//! drive the same repository and menu with their own configuration and input.
pub mod config;
pub mod db;
pub mod models;
pub mod ui;

/// Startup configuration read from the environment.
pub use config::{load_dotenv, DbConfig};

/// Persistence entry points.
pub use db::{connect, ensure_schema, BookRepository, CatalogError, CatalogSession, ConnectError};

/// The domain types other layers pass around.
pub use models::{Book, LibraryStats, SearchField};

/// The interactive menu and the input sources it can read from.
pub use ui::{LineSource, Menu, MenuChoice, Outcome, ScriptedInput, StdinInput, TerminalInput};
