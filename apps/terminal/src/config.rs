//! # Terminal Configuration
//!
//! Resolution order for the database path: `--db` flag, then the
//! `DYQAN_DB` environment variable (possibly loaded from `.env`), then
//! a `dyqan.db` file in the working directory.

use std::env;

/// Environment variable naming the SQLite database file.
pub const DB_ENV_VAR: &str = "DYQAN_DB";

/// Default database filename when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "dyqan.db";

/// Resolves the database path for this invocation.
pub fn database_path(flag: Option<&str>) -> String {
    if let Some(path) = flag {
        return path.to_string();
    }

    env::var(DB_ENV_VAR).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string())
}
