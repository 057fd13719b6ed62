// Library root
// -----------
// This crate exposes the catalog as a library; the two binaries
// (`main.rs` and `bin/add_user.rs`) are thin wrappers around `ui`.
//
// Module responsibilities:
// - `db`: opens the SQLite file, creates the schema and the default account.
// - `credentials`: password hashing, user upsert and verification.
// - `catalog`: book records, insertion and substring search.
// - `session`: the logged-in/logged-out state and the menu commands.
// - `ui`: terminal flows (login, menu, add, search, user provisioning).
pub mod catalog;
pub mod config;
pub mod credentials;
pub mod db;
pub mod error;
pub mod logging;
pub mod session;
pub mod ui;

pub use catalog::Book;
pub use config::Config;
pub use credentials::UpsertOutcome;
pub use db::Database;
pub use error::CatalogError;
pub use session::{BookManager, MenuChoice, Session};
