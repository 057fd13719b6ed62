// Session state and the controller that gates catalog access on it.

use crate::catalog::{self, Book};
use crate::credentials;
use crate::db::Database;
use crate::error::{CatalogError, Result};

/// Who, if anyone, is authenticated in this process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn { username: String },
}

/// A command typed at the main menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Search,
    Logout,
    Unrecognized(String),
}

impl MenuChoice {
    pub const COMMANDS: [&'static str; 3] = ["add", "search", "logout"];

    pub fn parse(input: &str) -> Self {
        let normalized = input.trim().to_lowercase();
        match normalized.as_str() {
            "add" => MenuChoice::Add,
            "search" => MenuChoice::Search,
            "logout" => MenuChoice::Logout,
            _ => MenuChoice::Unrecognized(normalized),
        }
    }
}

/// Owns the database handle and the current session.
#[derive(Debug)]
pub struct BookManager {
    db: Database,
    session: Session,
}

impl BookManager {
    pub fn new(db: Database) -> Self {
        BookManager {
            db,
            session: Session::LoggedOut,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Option<&str> {
        match &self.session {
            Session::LoggedIn { username } => Some(username.as_str()),
            Session::LoggedOut => None,
        }
    }

    /// Start a session for `username` if the credentials verify. A failed
    /// attempt leaves the session untouched.
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool> {
        if !credentials::verify_credentials(&self.db, username, password)? {
            tracing::info!(username, "login rejected");
            return Ok(false);
        }
        tracing::info!(username, "logged in");
        self.session = Session::LoggedIn {
            username: username.to_string(),
        };
        Ok(true)
    }

    pub fn logout(&mut self) {
        if let Session::LoggedIn { username } = &self.session {
            tracing::info!(username = %username, "logged out");
        }
        self.session = Session::LoggedOut;
    }

    pub fn add_book(&self, book: &Book) -> Result<bool> {
        self.require_login()?;
        catalog::add_book(&self.db, book)
    }

    pub fn search_books(&self, term: &str) -> Result<Vec<Book>> {
        self.require_login()?;
        catalog::search_books(&self.db, term)
    }

    fn require_login(&self) -> Result<()> {
        match self.session {
            Session::LoggedIn { .. } => Ok(()),
            Session::LoggedOut => Err(CatalogError::NotLoggedIn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{DEFAULT_PASSWORD, DEFAULT_USERNAME};
    use tempfile::TempDir;

    fn manager() -> (TempDir, BookManager) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(dir.path().join("library.db")).unwrap();
        (dir, BookManager::new(db))
    }

    #[test]
    fn menu_choice_parsing() {
        assert_eq!(MenuChoice::parse("add"), MenuChoice::Add);
        assert_eq!(MenuChoice::parse("  SEARCH \n"), MenuChoice::Search);
        assert_eq!(MenuChoice::parse("Logout"), MenuChoice::Logout);
        assert_eq!(
            MenuChoice::parse("delete"),
            MenuChoice::Unrecognized("delete".to_string())
        );
        assert_eq!(MenuChoice::parse(""), MenuChoice::Unrecognized(String::new()));
    }

    #[test]
    fn wrong_password_stays_logged_out() {
        let (_dir, mut manager) = manager();
        assert!(!manager.login(DEFAULT_USERNAME, "nope").unwrap());
        assert_eq!(manager.session(), &Session::LoggedOut);
        assert_eq!(manager.current_user(), None);
    }

    #[test]
    fn catalog_requires_login() {
        let (_dir, manager) = manager();
        let book = Book::new("111", "Dune", "Herbert", 1965);

        assert!(matches!(manager.add_book(&book), Err(CatalogError::NotLoggedIn)));
        assert!(matches!(manager.search_books(""), Err(CatalogError::NotLoggedIn)));
    }

    #[test]
    fn login_add_search_logout() {
        let (_dir, mut manager) = manager();
        assert!(manager.login(DEFAULT_USERNAME, DEFAULT_PASSWORD).unwrap());
        assert_eq!(manager.current_user(), Some(DEFAULT_USERNAME));

        let book = Book::new("111", "Dune", "Herbert", 1965);
        assert!(manager.add_book(&book).unwrap());
        assert!(!manager.add_book(&Book::new("111", "X", "Y", 2000)).unwrap());
        assert_eq!(manager.search_books("Dune").unwrap(), vec![book]);

        manager.logout();
        assert_eq!(manager.session(), &Session::LoggedOut);
        assert!(matches!(manager.search_books("Dune"), Err(CatalogError::NotLoggedIn)));
    }
}
