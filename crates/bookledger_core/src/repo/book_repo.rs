//! Book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `books` table, one row per book.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `BookRecord::validate()` before SQL mutations.
//! - Updates are keyed by title and never change the title column.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::book::{BookRecord, BookValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT title, author, book_id FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    NotFound(String),
    InvalidData(String),
}

impl RepoError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "invalid_input",
            Self::Db(_) => "db_error",
            Self::NotFound(_) => "row_not_found",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(title) => write!(f, "book row not found: {title}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract used to save and reload books.
pub trait BookRepository {
    fn create_book(&self, book: &BookRecord) -> RepoResult<()>;
    /// Replaces author and id of the row keyed by `book.title`.
    fn update_book(&self, book: &BookRecord) -> RepoResult<()>;
    fn delete_book(&self, title: &str) -> RepoResult<()>;
    fn get_book(&self, title: &str) -> RepoResult<Option<BookRecord>>;
    fn list_books(&self) -> RepoResult<Vec<BookRecord>>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create_book(&self, book: &BookRecord) -> RepoResult<()> {
        book.validate()?;

        self.conn.execute(
            "INSERT INTO books (title, author, book_id) VALUES (?1, ?2, ?3);",
            params![book.title.as_str(), book.author.as_str(), book.id],
        )?;

        Ok(())
    }

    fn update_book(&self, book: &BookRecord) -> RepoResult<()> {
        book.validate()?;

        let changed = self.conn.execute(
            "UPDATE books SET author = ?1, book_id = ?2 WHERE title = ?3;",
            params![book.author.as_str(), book.id, book.title.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(book.title.clone()));
        }

        Ok(())
    }

    fn delete_book(&self, title: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE title = ?1;", [title])?;

        if changed == 0 {
            return Err(RepoError::NotFound(title.to_string()));
        }

        Ok(())
    }

    fn get_book(&self, title: &str) -> RepoResult<Option<BookRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE title = ?1;"))?;
        let row = stmt
            .query_row([title], |row| Ok(read_book_row(row)))
            .optional()?;

        row.transpose()
    }

    fn list_books(&self) -> RepoResult<Vec<BookRecord>> {
        let mut stmt = self.conn.prepare(&format!("{BOOK_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(read_book_row(row)?);
        }

        Ok(books)
    }
}

fn read_book_row(row: &Row<'_>) -> RepoResult<BookRecord> {
    let book = BookRecord {
        title: row.get("title")?,
        author: row.get("author")?,
        id: row.get("book_id")?,
    };
    book.validate().map_err(|err| {
        RepoError::InvalidData(format!("{err} in books.title `{}`", book.title))
    })?;
    Ok(book)
}
