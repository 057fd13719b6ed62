// Storage: a single SQLite file holding the `users` and `books` tables.
// Each operation opens its own connection and drops it when done, so no
// handle is held across prompts.

use crate::credentials::{self, DEFAULT_PASSWORD, DEFAULT_USERNAME};
use crate::error::Result;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        username TEXT PRIMARY KEY,
        password TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS books (
        isbn TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        year INTEGER
    );
";

/// Handle to the catalog database file.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Open (creating if needed) the database at `path`, make sure both
    /// tables exist and that the bootstrap account is present.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Database {
            path: path.as_ref().to_path_buf(),
        };
        db.init()?;
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fresh connection for one operation.
    pub(crate) fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    fn init(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        self.ensure_default_account(&conn)?;
        tracing::info!(path = %self.path.display(), "catalog database ready");
        Ok(())
    }

    /// Insert the well-known `admin` account unless a row for it already
    /// exists. An existing admin password is left alone.
    fn ensure_default_account(&self, conn: &Connection) -> Result<()> {
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO users (username, password) VALUES (?1, ?2)",
            params![DEFAULT_USERNAME, credentials::hash_password(DEFAULT_PASSWORD)],
        )?;
        if inserted > 0 {
            tracing::info!(username = DEFAULT_USERNAME, "created default account");
        }
        Ok(())
    }
}
