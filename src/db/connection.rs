use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use log::debug;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use crate::config::{DbConfig, HOST_VAR, NAME_VAR, PASSWORD_VAR, USER_VAR};

use super::books::register_functions;

/// Folder name used beneath the user's home directory when `DB_HOST` is
/// `localhost`.
const DATA_DIR_NAME: &str = ".library-catalog";
/// Extension appended to `DB_NAME` to form the SQLite file name.
const DB_FILE_EXTENSION: &str = "sqlite";
/// Host alias that resolves to the per-user data directory.
const LOCAL_HOST: &str = "localhost";

/// Reasons a connection could not be handed out.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("{0} is not set")]
    MissingSetting(&'static str),
    #[error("could not locate home directory")]
    NoHomeDirectory,
    #[error("cannot create data directory {path}: {source}")]
    DataDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("cannot prepare schema in {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

/// Open a connection to an existing catalog database. The file is never
/// created here, so a missing directory or file behaves like an unreachable
/// server. The caller owns the handle; dropping it closes the connection.
pub fn connect(config: &DbConfig) -> Result<Connection, ConnectError> {
    let user = require(&config.user, USER_VAR)?;
    require(&config.password, PASSWORD_VAR)?;
    let path = database_path(config)?;

    debug!("opening {} as {user}", path.display());
    let conn = Connection::open_with_flags(
        &path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| ConnectError::Open {
        path: path.clone(),
        source,
    })?;

    register_functions(&conn).map_err(|source| ConnectError::Open { path, source })?;
    Ok(conn)
}

/// Make sure the database file and the `books` table exist. Runs once at
/// startup, never from [`connect`]. Only the default per-user directory is
/// created; an explicit `DB_HOST` directory must already be there. Existing
/// tables are left untouched.
pub fn ensure_schema(config: &DbConfig) -> Result<(), ConnectError> {
    let path = database_path(config)?;

    if is_local_host(config) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConnectError::DataDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let conn = Connection::open(&path).map_err(|source| ConnectError::Open {
        path: path.clone(),
        source,
    })?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            year TEXT,
            genre TEXT,
            read_status BOOLEAN NOT NULL DEFAULT FALSE
        )",
        [],
    )
    .map_err(|source| ConnectError::Schema { path, source })?;

    Ok(())
}

/// Resolve `<host dir>/<name>.sqlite` from the configured host and name.
pub fn database_path(config: &DbConfig) -> Result<PathBuf, ConnectError> {
    let host = require(&config.host, HOST_VAR)?;
    let name = require(&config.name, NAME_VAR)?;

    let dir = if host.eq_ignore_ascii_case(LOCAL_HOST) {
        let base_dirs = BaseDirs::new().ok_or(ConnectError::NoHomeDirectory)?;
        base_dirs.home_dir().join(DATA_DIR_NAME)
    } else {
        PathBuf::from(host)
    };

    Ok(dir.join(format!("{name}.{DB_FILE_EXTENSION}")))
}

fn is_local_host(config: &DbConfig) -> bool {
    config
        .host
        .as_deref()
        .is_some_and(|host| host.eq_ignore_ascii_case(LOCAL_HOST))
}

fn require<'a>(value: &'a Option<String>, key: &'static str) -> Result<&'a str, ConnectError> {
    value.as_deref().ok_or(ConnectError::MissingSetting(key))
}
