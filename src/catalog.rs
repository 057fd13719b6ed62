// Catalog store: book records keyed by ISBN.

use crate::db::Database;
use crate::error::Result;
use rusqlite::params;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl Book {
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i64,
    ) -> Self {
        Book {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            year,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ISBN: {}", self.isbn)?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Author: {}", self.author)?;
        write!(f, "Year: {}", self.year)
    }
}

/// Insert `book`. Returns `Ok(false)` without touching the stored record
/// when the ISBN is already catalogued.
pub fn add_book(db: &Database, book: &Book) -> Result<bool> {
    let conn = db.connect()?;
    let inserted = conn.execute(
        "INSERT INTO books (isbn, title, author, year) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(isbn) DO NOTHING",
        params![book.isbn, book.title, book.author, book.year],
    )?;

    if inserted == 0 {
        tracing::debug!(isbn = %book.isbn, "isbn already catalogued");
        return Ok(false);
    }
    tracing::debug!(isbn = %book.isbn, "added book");
    Ok(true)
}

/// Every book whose title, author, ISBN or year (as decimal text) contains
/// `term`, case-sensitively, in insertion order. An empty term matches all.
pub fn search_books(db: &Database, term: &str) -> Result<Vec<Book>> {
    let conn = db.connect()?;
    // instr() rather than LIKE: LIKE folds ASCII case and treats % and _ as
    // wildcards.
    let mut stmt = conn.prepare(
        "SELECT isbn, title, author, year FROM books
         WHERE ?1 = ''
            OR instr(title, ?1) > 0
            OR instr(author, ?1) > 0
            OR instr(isbn, ?1) > 0
            OR instr(CAST(year AS TEXT), ?1) > 0
         ORDER BY rowid",
    )?;

    let books = stmt
        .query_map([term], |row| {
            Ok(Book {
                isbn: row.get(0)?,
                title: row.get(1)?,
                author: row.get(2)?,
                year: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::debug!(term, hits = books.len(), "searched catalog");
    Ok(books)
}
