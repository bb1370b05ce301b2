use bookstore::{BookstoreError, CatalogService, JsonStore};

mod common;
use common::*;

fn catalog() -> (tempfile::TempDir, CatalogService<JsonStore>) {
    let (temp_dir, store) = seeded_store();
    (temp_dir, CatalogService::new(store))
}

#[test]
fn get_all_returns_seed_books_in_order() {
    let (_dir, catalog) = catalog();
    let isbns: Vec<String> = catalog.get_all().into_iter().map(|b| b.isbn).collect();
    assert_eq!(isbns, vec![MARTIAN, SHORT_HISTORY, KITE_RUNNER]);
}

#[test]
fn get_by_isbn_is_exact() {
    let (_dir, catalog) = catalog();

    let book = catalog.get_by_isbn(MARTIAN).unwrap();
    assert_eq!(book.title, "The Martian");
    assert_eq!(book.author, "Andy Weir");

    assert!(matches!(
        catalog.get_by_isbn("nonexistent"),
        Err(BookstoreError::NotFound(_))
    ));
    assert!(matches!(
        catalog.get_by_isbn("978014312774"),
        Err(BookstoreError::NotFound(_))
    ));
}

#[test]
fn get_by_author_ignores_case() {
    let (_dir, catalog) = catalog();

    for needle in &["weir", "WEIR", "Andy Weir"] {
        let books = catalog.get_by_author(needle);
        assert_eq!(books.len(), 1, "searching for {}", needle);
        assert_eq!(books[0].isbn, MARTIAN);
    }
    assert!(catalog.get_by_author("tolkien").is_empty());
}

#[test]
fn get_by_title_matches_substrings_in_collection_order() {
    let (_dir, catalog) = catalog();

    let books = catalog.get_by_title("the");
    let isbns: Vec<&str> = books.iter().map(|b| b.isbn.as_str()).collect();
    assert_eq!(isbns, vec![MARTIAN, KITE_RUNNER]);

    assert_eq!(catalog.get_by_title("martian")[0].isbn, MARTIAN);
}

#[test]
fn get_reviews() {
    let (_dir, catalog) = catalog();

    assert!(catalog.get_reviews(SHORT_HISTORY).unwrap().is_empty());
    assert_eq!(users(&catalog.get_reviews(MARTIAN).unwrap()), vec!["alice", "bob"]);
    assert!(matches!(
        catalog.get_reviews("nonexistent"),
        Err(BookstoreError::NotFound(_))
    ));
}
