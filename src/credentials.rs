// Credential store: username -> password hash.
//
// Hashes are unsalted lowercase hex SHA-256, the format existing
// `library.db` files were written with. That scheme is weak against
// offline guessing; a deployment that does not need to read old files
// should move to a salted password hash.

use crate::db::Database;
use crate::error::Result;
use rusqlite::{params, OptionalExtension};
use sha2::{Digest, Sha256};

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "password";

/// What `upsert_user` did to the `users` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl UpsertOutcome {
    pub fn verb(self) -> &'static str {
        match self {
            UpsertOutcome::Created => "added",
            UpsertOutcome::Updated => "updated",
        }
    }
}

pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Create `username` with `password`, or replace the stored hash if the
/// user already exists.
pub fn upsert_user(db: &Database, username: &str, password: &str) -> Result<UpsertOutcome> {
    let mut conn = db.connect()?;
    let tx = conn.transaction()?;
    let hashed = hash_password(password);

    let exists = tx
        .query_row(
            "SELECT username FROM users WHERE username = ?1",
            [username],
            |row| row.get::<_, String>(0),
        )
        .optional()?
        .is_some();

    let outcome = if exists {
        tx.execute(
            "UPDATE users SET password = ?1 WHERE username = ?2",
            params![hashed, username],
        )?;
        UpsertOutcome::Updated
    } else {
        tx.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            params![username, hashed],
        )?;
        UpsertOutcome::Created
    };
    tx.commit()?;

    tracing::debug!(username, ?outcome, "upserted user");
    Ok(outcome)
}

/// True when `username` exists and `password` hashes to its stored value.
/// Unknown users and wrong passwords are indistinguishable.
pub fn verify_credentials(db: &Database, username: &str, password: &str) -> Result<bool> {
    let conn = db.connect()?;
    let found = conn
        .query_row(
            "SELECT username FROM users WHERE username = ?1 AND password = ?2",
            params![username, hash_password(password)],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    tracing::debug!(username, verified = found.is_some(), "checked credentials");
    Ok(found.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_db() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(dir.path().join("library.db")).unwrap();
        (dir, db)
    }

    #[test]
    fn hash_is_hex_sha256() {
        assert_eq!(
            hash_password("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn default_account_verifies_on_fresh_store() {
        let (_dir, db) = temp_db();
        assert!(verify_credentials(&db, DEFAULT_USERNAME, DEFAULT_PASSWORD).unwrap());
    }

    #[test]
    fn upsert_then_change_password() {
        let (_dir, db) = temp_db();

        assert_eq!(upsert_user(&db, "alice", "pw1").unwrap(), UpsertOutcome::Created);
        assert!(verify_credentials(&db, "alice", "pw1").unwrap());

        assert_eq!(upsert_user(&db, "alice", "pw2").unwrap(), UpsertOutcome::Updated);
        assert!(!verify_credentials(&db, "alice", "pw1").unwrap());
        assert!(verify_credentials(&db, "alice", "pw2").unwrap());
    }

    #[test]
    fn unknown_user_and_wrong_password_both_fail() {
        let (_dir, db) = temp_db();
        upsert_user(&db, "bob", "secret").unwrap();

        assert!(!verify_credentials(&db, "bob", "guess").unwrap());
        assert!(!verify_credentials(&db, "nobody", "secret").unwrap());
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let (_dir, db) = temp_db();
        upsert_user(&db, "Carol", "pw").unwrap();
        assert!(!verify_credentials(&db, "carol", "pw").unwrap());
    }
}
