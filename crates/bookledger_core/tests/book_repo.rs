use bookledger_core::db::open_db_in_memory;
use bookledger_core::{BookRecord, BookRepository, BookValidationError, RepoError, SqliteBookRepository};

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let book = BookRecord::new("Emma", "Jane Austen", 1);
    repo.create_book(&book).unwrap();

    let loaded = repo.get_book("Emma").unwrap().unwrap();
    assert_eq!(loaded, book);
    assert!(repo.get_book("Dune").unwrap().is_none());
}

#[test]
fn create_rejects_blank_title_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let err = repo.create_book(&BookRecord::new("", "A", 1)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(BookValidationError::EmptyTitle)
    ));
}

#[test]
fn create_duplicate_title_is_db_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    repo.create_book(&BookRecord::new("Emma", "A", 1)).unwrap();

    let err = repo.create_book(&BookRecord::new("Emma", "B", 2)).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn update_replaces_author_and_id_keyed_by_title() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    repo.create_book(&BookRecord::new("Emma", "Unknown", 1)).unwrap();

    repo.update_book(&BookRecord::new("Emma", "Jane Austen", 7))
        .unwrap();

    let loaded = repo.get_book("Emma").unwrap().unwrap();
    assert_eq!(loaded, BookRecord::new("Emma", "Jane Austen", 7));
}

#[test]
fn update_and_delete_missing_title_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let err = repo
        .update_book(&BookRecord::new("Missing", "A", 1))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(title) if title == "Missing"));

    let err = repo.delete_book("Missing").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn delete_removes_row_and_list_returns_remaining_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    repo.create_book(&BookRecord::new("Emma", "A", 1)).unwrap();
    repo.create_book(&BookRecord::new("Dune", "B", 2)).unwrap();

    repo.delete_book("Emma").unwrap();

    let books = repo.list_books().unwrap();
    assert_eq!(books, vec![BookRecord::new("Dune", "B", 2)]);
}

#[test]
fn list_rejects_invalid_persisted_rows() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO books (title, author, book_id) VALUES ('', 'A', 1);",
    )
    .unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let err = repo.list_books().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
