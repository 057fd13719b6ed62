// Error type shared by the storage layer and the session controller.
// Console flows and binaries wrap it in `anyhow` like the rest of the CLI.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Anything the SQLite layer reports that is not an expected outcome
    /// (a duplicate ISBN is an expected outcome and never lands here).
    #[error("Unexpected error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("{field} cannot be empty")]
    EmptyInput { field: &'static str },

    #[error("Invalid year format.")]
    InvalidYear,

    #[error("You must be logged in to do that")]
    NotLoggedIn,

    #[error("Console error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

/// Reject blank required input before it reaches the store.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(CatalogError::EmptyInput { field });
    }
    Ok(())
}

/// Parse a publication year typed at the prompt.
pub fn parse_year(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::InvalidYear)
}
