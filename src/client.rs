use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Number;
use tracing::debug;

use crate::model::{
    Book, Credentials, ErrorResponse, LoginResponse, MessageResponse, Review, ReviewRequest,
    ReviewsResponse,
};
use crate::{BookstoreError, Result};

/// `BookstoreClient` contains the functionality for communication with a [`BookstoreServer`]
///
/// [`BookstoreServer`]: ./struct.BookstoreServer.html
#[derive(Debug, Clone)]
pub struct BookstoreClient {
    http: Client,
    base_url: Url,
}

impl BookstoreClient {
    /// creates a client for the server whose api is rooted at `base_url`,
    /// for example `http://127.0.0.1:3000/api`
    ///
    /// # Errors
    /// returns `BookstoreError::Parsing` if `base_url` is not an absolute http(s) url
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BookstoreError::Parsing(format!("invalid url {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(BookstoreError::Parsing(format!(
                "{} cannot be used as a base url",
                base_url
            )));
        }
        Ok(BookstoreClient {
            http: Client::new(),
            base_url,
        })
    }

    /// gets every book in the catalog
    pub fn books(&self) -> Result<Vec<Book>> {
        self.send(self.http.get(self.url(&["books"])))
    }

    /// gets the book with the given `isbn`
    /// # Errors
    /// `Err<BookstoreError::Remote>` if the book does not exist
    pub fn book_by_isbn(&self, isbn: &str) -> Result<Book> {
        self.send(self.http.get(self.url(&["books", "isbn", isbn])))
    }

    /// gets the books whose author contains `author`, ignoring case
    pub fn books_by_author(&self, author: &str) -> Result<Vec<Book>> {
        self.send(self.http.get(self.url(&["books", "author", author])))
    }

    /// gets the books whose title contains `title`, ignoring case
    pub fn books_by_title(&self, title: &str) -> Result<Vec<Book>> {
        self.send(self.http.get(self.url(&["books", "title", title])))
    }

    /// gets the reviews of the book with the given `isbn`
    pub fn reviews(&self, isbn: &str) -> Result<Vec<Review>> {
        self.send(self.http.get(self.url(&["books", isbn, "reviews"])))
    }

    /// registers a new user account
    pub fn register(&self, username: &str, password: &str) -> Result<MessageResponse> {
        let body = credentials(username, password);
        self.send(self.http.post(self.url(&["register"])).json(&body))
    }

    /// logs in, returning a session token to pass to the review methods
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = credentials(username, password);
        self.send(self.http.post(self.url(&["login"])).json(&body))
    }

    /// adds, or modifies, the logged in user's review of the book with the given `isbn`
    /// # Returns
    /// all reviews of the book after the change
    pub fn put_review(
        &self,
        token: &str,
        isbn: &str,
        rating: Number,
        comment: &str,
    ) -> Result<ReviewsResponse> {
        let body = ReviewRequest {
            rating: Some(rating),
            comment: Some(comment.to_string()),
        };
        let req = self
            .http
            .post(self.url(&["books", isbn, "reviews"]))
            .bearer_auth(token)
            .json(&body);
        self.send(req)
    }

    /// deletes the logged in user's review of the book with the given `isbn`
    /// # Errors
    /// `Err<BookstoreError::Remote>` if the user has no review on the book
    pub fn delete_review(&self, token: &str, isbn: &str) -> Result<ReviewsResponse> {
        let req = self
            .http
            .delete(self.url(&["books", isbn, "reviews"]))
            .bearer_auth(token);
        self.send(req)
    }

    /// joins `segments` onto the base url, percent-encoding each one
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// sends the request and decodes a success body into `T`, or the error body into
    /// `BookstoreError::Remote`
    fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let resp = req.send()?;
        let status = resp.status();
        debug!("response status: {}", status);

        if status.is_success() {
            Ok(resp.json::<T>()?)
        } else {
            let message = match resp.json::<ErrorResponse>() {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            Err(BookstoreError::Remote(message))
        }
    }
}

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials {
        username: Some(username.to_string()),
        password: Some(password.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_joined_and_encoded() {
        let client = BookstoreClient::new("http://localhost:3000/api/").unwrap();
        assert_eq!(
            client.url(&["books", "author", "Andy Weir"]).as_str(),
            "http://localhost:3000/api/books/author/Andy%20Weir"
        );
        assert_eq!(
            client.url(&["books", "title", "a/b"]).as_str(),
            "http://localhost:3000/api/books/title/a%2Fb"
        );
    }

    #[test]
    fn relative_base_url_is_rejected() {
        assert!(matches!(
            BookstoreClient::new("localhost/api"),
            Err(BookstoreError::Parsing(_))
        ));
    }
}
