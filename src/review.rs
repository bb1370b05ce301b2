use serde_json::Number;
use tracing::{debug, instrument};

use crate::catalog::book_not_found;
use crate::model::Review;
use crate::store::{Books, Store};
use crate::{BookstoreError, Result};

/// Adds, modifies and deletes the reviews users write about books.
///
/// A user holds at most one review per book. Each mutation loads the whole Books collection,
/// changes the one book and writes the whole collection back, serialized against every other
/// mutation of the collection by [`Store::update`].
///
/// Callers are expected to have authenticated `username` already.
#[derive(Debug, Clone)]
pub struct ReviewService<S: Store> {
    store: S,
}

impl<S: Store> ReviewService<S> {
    /// creates a review service over the given `store`
    pub fn new(store: S) -> Self {
        ReviewService { store }
    }

    /// Adds `username`'s review of the book with the given `isbn`, or replaces the `rating` and
    /// `comment` of the review they already wrote. A replaced review keeps its position among
    /// the other reviews; a new review is appended.
    ///
    /// Returns all reviews of the book after the change.
    ///
    /// # Errors
    /// returns `BookstoreError::NotFound` if the book does not exist, in which case nothing is
    /// written
    #[instrument(skip(self, comment))]
    pub fn upsert(
        &self,
        isbn: &str,
        username: &str,
        rating: Number,
        comment: String,
    ) -> Result<Vec<Review>> {
        self.store.update::<Books, _, _>(|books| {
            let book = books.find_mut(isbn).ok_or_else(book_not_found)?;
            match book.review_position(username) {
                Some(pos) => {
                    let existing = &mut book.reviews[pos];
                    existing.rating = rating;
                    existing.comment = comment;
                    debug!(pos, "modified review");
                }
                None => {
                    book.reviews.push(Review {
                        user: username.to_string(),
                        rating,
                        comment,
                    });
                    debug!("added review");
                }
            }
            Ok(book.reviews.clone())
        })
    }

    /// Deletes `username`'s review of the book with the given `isbn`.
    ///
    /// Returns the remaining reviews of the book.
    ///
    /// # Errors
    /// returns `BookstoreError::NotFound` if the book does not exist or `username` has no review
    /// on it; nothing is written in either case
    #[instrument(skip(self))]
    pub fn delete(&self, isbn: &str, username: &str) -> Result<Vec<Review>> {
        self.store.update::<Books, _, _>(|books| {
            let book = books.find_mut(isbn).ok_or_else(book_not_found)?;
            let before = book.reviews.len();
            book.reviews.retain(|r| r.user != username);
            if book.reviews.len() == before {
                return Err(BookstoreError::NotFound(
                    "Review by user not found".to_string(),
                ));
            }
            debug!(removed = before - book.reviews.len(), "deleted review");
            Ok(book.reviews.clone())
        })
    }
}
