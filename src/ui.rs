// UI layer: the interactive flows, built on `dialoguer` prompts.
// Everything goes through the `Console` trait so a scripted console can
// drive the same flows in tests.

use crate::catalog::Book;
use crate::credentials;
use crate::db::Database;
use crate::error::{parse_year, require_non_empty, CatalogError};
use crate::session::{BookManager, MenuChoice};
use anyhow::Result;
use crossterm::style::{style, Stylize};
use crossterm::tty::IsTty;
use dialoguer::{Input, Password};
use std::io;

/// How a line should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Failure,
}

/// Line-oriented prompt/print surface used by the flows below.
pub trait Console {
    /// Read a line of text. Empty answers are returned, not re-prompted.
    fn input(&mut self, prompt: &str) -> io::Result<String>;
    /// Read a line without echoing it.
    fn password(&mut self, prompt: &str) -> io::Result<String>;
    fn say(&mut self, tone: Tone, line: &str);
}

/// The real terminal. Success and failure lines are coloured only when
/// stdout is a tty, so piped output stays free of escape codes.
#[derive(Debug)]
pub struct Terminal {
    color: bool,
}

impl Terminal {
    pub fn new() -> Self {
        Terminal {
            color: io::stdout().is_tty(),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Terminal::new()
    }
}

/// Format `line` for display, adding colour for non-plain tones.
pub fn render(tone: Tone, line: &str, color: bool) -> String {
    match (tone, color) {
        (Tone::Success, true) => style(line).green().to_string(),
        (Tone::Failure, true) => style(line).red().to_string(),
        _ => line.to_string(),
    }
}

impl Console for Terminal {
    fn input(&mut self, prompt: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
    }

    fn password(&mut self, prompt: &str) -> io::Result<String> {
        // `Password` hides input in terminal for passwords.
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
    }

    fn say(&mut self, tone: Tone, line: &str) {
        println!("{}", render(tone, line, self.color));
    }
}

/// What the main program should do after handling a menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Logout,
}

/// Main interactive loop: log in, serve the menu until logout, then go
/// back to the login prompt. Only returns when the console fails (for
/// example when stdin is closed).
pub fn main_menu<C: Console>(console: &mut C, manager: &mut BookManager) -> Result<()> {
    loop {
        run_session(console, manager)?;
    }
}

/// One login followed by menu rounds until the user logs out.
pub fn run_session<C: Console>(console: &mut C, manager: &mut BookManager) -> Result<()> {
    login(console, manager)?;
    while menu_round(console, manager)? == Flow::Continue {}
    Ok(())
}

/// Prompt for credentials until they verify.
fn login<C: Console>(console: &mut C, manager: &mut BookManager) -> Result<()> {
    loop {
        console.say(Tone::Plain, "\n=== Login ===");
        let username = console.input("Username")?;
        let password = console.password("Password")?;

        match manager.login(&username, &password) {
            Ok(true) => {
                console.say(Tone::Success, &format!("Welcome, {}!", username));
                return Ok(());
            }
            Ok(false) => console.say(Tone::Failure, "Invalid credentials!"),
            Err(e) => console.say(Tone::Failure, &format!("Login failed: {}", e)),
        }
    }
}

fn show_menu<C: Console>(console: &mut C) {
    console.say(Tone::Plain, "\n=== Book Management System ===");
    console.say(Tone::Plain, "add    - Add Book");
    console.say(Tone::Plain, "search - Search Book");
    console.say(Tone::Plain, "logout - Log Out");
}

/// Show the menu, read one choice and dispatch it.
pub fn menu_round<C: Console>(console: &mut C, manager: &mut BookManager) -> Result<Flow> {
    show_menu(console);
    let choice = MenuChoice::parse(&console.input("Enter your choice")?);
    handle_choice(console, manager, choice)
}

pub fn handle_choice<C: Console>(
    console: &mut C,
    manager: &mut BookManager,
    choice: MenuChoice,
) -> Result<Flow> {
    match choice {
        MenuChoice::Add => handle_add(console, manager)?,
        MenuChoice::Search => handle_search(console, manager)?,
        MenuChoice::Logout => {
            manager.logout();
            console.say(Tone::Plain, "Logged out.");
            return Ok(Flow::Logout);
        }
        MenuChoice::Unrecognized(_) => console.say(
            Tone::Failure,
            &format!(
                "Invalid choice. Please choose from: {}",
                MenuChoice::COMMANDS.join(", ")
            ),
        ),
    }
    Ok(Flow::Continue)
}

/// Read a trimmed text field that must not be blank.
fn read_required<C: Console>(
    console: &mut C,
    prompt: &str,
    field: &'static str,
) -> Result<String, CatalogError> {
    let value = console.input(prompt)?.trim().to_string();
    require_non_empty(field, &value)?;
    Ok(value)
}

/// Collect the four book fields. Validation failures come back as the
/// matching `CatalogError`; console failures as `CatalogError::Io`.
fn read_book<C: Console>(console: &mut C) -> Result<Book, CatalogError> {
    let isbn = read_required(console, "Enter ISBN", "ISBN")?;
    let title = read_required(console, "Enter Title", "Title")?;
    let author = read_required(console, "Enter Author", "Author")?;
    let year = parse_year(&console.input("Enter Year")?)?;
    Ok(Book::new(isbn, title, author, year))
}

fn handle_add<C: Console>(console: &mut C, manager: &BookManager) -> Result<()> {
    let book = match read_book(console) {
        Ok(book) => book,
        Err(CatalogError::Io(e)) => return Err(e.into()),
        Err(e) => {
            console.say(Tone::Failure, &e.to_string());
            return Ok(());
        }
    };

    match manager.add_book(&book) {
        Ok(true) => console.say(Tone::Success, "Book added successfully!"),
        Ok(false) => console.say(
            Tone::Failure,
            "Failed to add book. ISBN might already exist.",
        ),
        Err(e) => console.say(Tone::Failure, &format!("Failed to add book: {}", e)),
    }
    Ok(())
}

fn handle_search<C: Console>(console: &mut C, manager: &BookManager) -> Result<()> {
    let term = console.input("Enter search term")?;
    match manager.search_books(&term) {
        Ok(books) if books.is_empty() => console.say(Tone::Plain, "No books found."),
        Ok(books) => {
            console.say(Tone::Plain, "\n\nSearch Results:");
            let separator = "-".repeat(30);
            for book in &books {
                console.say(Tone::Plain, &book.to_string());
                console.say(Tone::Plain, &separator);
            }
        }
        Err(e) => console.say(Tone::Failure, &format!("Search failed: {}", e)),
    }
    Ok(())
}

/// The `add-user` flow: ask for a username and a hidden password, then
/// create or update that account.
pub fn provision_user<C: Console>(console: &mut C, db: &Database) -> Result<()> {
    let username = match read_required(console, "Enter new username", "Username") {
        Ok(username) => username,
        Err(CatalogError::Io(e)) => return Err(e.into()),
        Err(e) => {
            console.say(Tone::Failure, &format!("Error: {}", e));
            return Ok(());
        }
    };

    let password = console.password("Enter password")?;
    if let Err(e) = require_non_empty("Password", &password) {
        console.say(Tone::Failure, &format!("Error: {}", e));
        return Ok(());
    }

    match credentials::upsert_user(db, &username, &password) {
        Ok(outcome) => console.say(
            Tone::Success,
            &format!("User '{}' {} successfully", username, outcome.verb()),
        ),
        Err(e) => console.say(Tone::Failure, &format!("Failed to modify user: {}", e)),
    }
    Ok(())
}
