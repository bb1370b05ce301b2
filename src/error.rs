use std::io;
use thiserror::Error;

/// type alias for all operations on the bookstore that could fail with a [`BookstoreError`]
pub type Result<T> = std::result::Result<T, BookstoreError>;

/// The Error variants used throughout the bookstore.
///
/// The first five variants are "domain" errors that are recovered at the request boundary and
/// turned into a structured `{ "error": ... }` response. The rest wrap lower level errors from
/// the standard library and third party crates.
#[derive(Error, Debug)]
pub enum BookstoreError {
    /// a book, or a user's review on a book, does not exist
    #[error("{0}")]
    NotFound(String),

    /// a user with the same username is already registered
    #[error("{0}")]
    AlreadyExists(String),

    /// the username/password pair did not match a registered user
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// the bearer token was missing or is not bound to a session
    #[error("{0}")]
    Unauthenticated(String),

    /// a required request field was missing
    #[error("{0}")]
    Validation(String),

    /// variant for errors caused by file IO
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// serde_json errors
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// errors that occur while parsing command line input
    #[error("{0}")]
    Parsing(String),

    /// transport errors raised by the http client
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// an error message returned by a remote bookstore server
    #[error("{0}")]
    Remote(String),

    /// a background task failed to complete
    #[error("internal error: {0}")]
    Internal(String),
}
