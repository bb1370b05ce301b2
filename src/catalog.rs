use tracing::instrument;

use crate::model::{Book, Review};
use crate::store::{Books, Store};
use crate::{BookstoreError, Result};

/// Read-only queries over the book catalog.
///
/// Every query re-reads the Books collection from the [`Store`]; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct CatalogService<S: Store> {
    store: S,
}

impl<S: Store> CatalogService<S> {
    /// creates a catalog over the given `store`
    pub fn new(store: S) -> Self {
        CatalogService { store }
    }

    /// returns every book in the catalog, in collection order
    pub fn get_all(&self) -> Vec<Book> {
        self.store.load::<Books>().0
    }

    /// returns the book with exactly the given `isbn`
    ///
    /// # Errors
    /// returns `BookstoreError::NotFound` if no such book exists
    #[instrument(skip(self))]
    pub fn get_by_isbn(&self, isbn: &str) -> Result<Book> {
        self.store
            .load::<Books>()
            .0
            .into_iter()
            .find(|b| b.isbn == isbn)
            .ok_or_else(book_not_found)
    }

    /// returns the books whose author contains `author`, ignoring case
    pub fn get_by_author(&self, author: &str) -> Vec<Book> {
        self.filter(author, |b| &b.author)
    }

    /// returns the books whose title contains `title`, ignoring case
    pub fn get_by_title(&self, title: &str) -> Vec<Book> {
        self.filter(title, |b| &b.title)
    }

    /// returns the reviews of the book with the given `isbn`
    ///
    /// # Errors
    /// returns `BookstoreError::NotFound` if no such book exists
    pub fn get_reviews(&self, isbn: &str) -> Result<Vec<Review>> {
        self.get_by_isbn(isbn).map(|b| b.reviews)
    }

    fn filter<F>(&self, needle: &str, field: F) -> Vec<Book>
    where
        F: Fn(&Book) -> &String,
    {
        let needle = needle.to_lowercase();
        self.store
            .load::<Books>()
            .0
            .into_iter()
            .filter(|b| field(b).to_lowercase().contains(&needle))
            .collect()
    }
}

pub(crate) fn book_not_found() -> BookstoreError {
    BookstoreError::NotFound("Book not found".to_string())
}
