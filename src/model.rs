//! The records kept by the bookstore and the bodies exchanged with its HTTP api.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A book in the catalog, keyed by its `isbn`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// the unique key of the book
    pub isbn: String,
    /// the title of the book
    pub title: String,
    /// the author(s) of the book
    pub author: String,
    /// user reviews, in the order they were first written. At most one review per user.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Book {
    /// returns the position of the review written by `username`, if there is one
    pub fn review_position(&self, username: &str) -> Option<usize> {
        self.reviews.iter().position(|r| r.user == username)
    }
}

/// A single user's review of a [`Book`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// username of the reviewer
    pub user: String,
    /// the rating given to the book, kept exactly as the client sent it
    pub rating: Number,
    /// free text comment
    pub comment: String,
}

/// A registered user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// the unique key of the account
    pub username: String,
    /// the password, stored as given
    pub password: String,
}

/// The body of a register or login request.
///
/// Fields are optional on the wire so that a missing field can be reported as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[allow(missing_docs)]
    #[serde(default)]
    pub username: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub password: Option<String>,
}

/// The body of an add/modify review request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewRequest {
    #[allow(missing_docs)]
    #[serde(default)]
    pub rating: Option<Number>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub comment: Option<String>,
}

/// Returned by a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// the session token to send as `Authorization: Bearer <token>`
    pub token: String,
    /// the user the session belongs to
    pub username: String,
}

/// A plain acknowledgement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[allow(missing_docs)]
    pub message: String,
}

/// Returned by the review mutation endpoints: an acknowledgement plus the book's reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewsResponse {
    #[allow(missing_docs)]
    pub message: String,
    #[allow(missing_docs)]
    pub reviews: Vec<Review>,
}

/// The body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[allow(missing_docs)]
    pub error: String,
}
