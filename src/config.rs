//! Startup configuration. The environment is read exactly once, into an
//! immutable [`DbConfig`] that is handed to every connection explicitly.

use std::fmt;

use log::{debug, info};

pub const HOST_VAR: &str = "DB_HOST";
pub const NAME_VAR: &str = "DB_NAME";
pub const USER_VAR: &str = "DB_USER";
pub const PASSWORD_VAR: &str = "DB_PASSWORD";

/// Load a `.env` file from the working directory when one exists. Variables
/// already present in the environment win over the file.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded configuration from {}", path.display()),
        Err(err) if err.not_found() => debug!("No .env file found, using environment only"),
        Err(err) => debug!("Ignoring unreadable .env file: {err}"),
    }
}

/// Database settings captured at startup. Missing values are kept as `None`
/// and only reported when a connection is attempted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DbConfig {
    pub host: Option<String>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl DbConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            host: read(HOST_VAR),
            name: read(NAME_VAR),
            user: read(USER_VAR),
            password: read(PASSWORD_VAR),
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
