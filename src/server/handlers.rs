use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;

use super::{AppState, AuthenticatedUser};
use crate::model::{
    Book, Credentials, LoginResponse, MessageResponse, Review, ReviewRequest, ReviewsResponse,
};
use crate::store::Store;
use crate::{BookstoreError, Result};

pub async fn list_books<S: Store>(State(state): State<AppState<S>>) -> Result<Json<Vec<Book>>> {
    let books = state.blocking(|s| Ok(s.catalog.get_all())).await?;
    Ok(Json(books))
}

pub async fn book_by_isbn<S: Store>(
    State(state): State<AppState<S>>,
    isbn: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Book>> {
    let Path(isbn) = isbn?;
    let book = state.blocking(move |s| s.catalog.get_by_isbn(&isbn)).await?;
    Ok(Json(book))
}

pub async fn books_by_author<S: Store>(
    State(state): State<AppState<S>>,
    author: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Book>>> {
    let Path(author) = author?;
    let books = state
        .blocking(move |s| Ok(s.catalog.get_by_author(&author)))
        .await?;
    Ok(Json(books))
}

pub async fn books_by_title<S: Store>(
    State(state): State<AppState<S>>,
    title: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Book>>> {
    let Path(title) = title?;
    let books = state
        .blocking(move |s| Ok(s.catalog.get_by_title(&title)))
        .await?;
    Ok(Json(books))
}

pub async fn list_reviews<S: Store>(
    State(state): State<AppState<S>>,
    isbn: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Review>>> {
    let Path(isbn) = isbn?;
    let reviews = state.blocking(move |s| s.catalog.get_reviews(&isbn)).await?;
    Ok(Json(reviews))
}

pub async fn register<S: Store>(
    State(state): State<AppState<S>>,
    payload: std::result::Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let (username, password) = required_credentials(payload)?;
    state
        .blocking(move |s| s.accounts.register(&username, &password))
        .await?;
    Ok(Json(MessageResponse {
        message: "Registered".to_string(),
    }))
}

pub async fn login<S: Store>(
    State(state): State<AppState<S>>,
    payload: std::result::Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let (username, password) = required_credentials(payload)?;
    let session = state
        .blocking(move |s| s.accounts.login(&username, &password))
        .await?;
    Ok(Json(session))
}

pub async fn put_review<S: Store>(
    State(state): State<AppState<S>>,
    isbn: std::result::Result<Path<String>, PathRejection>,
    user: AuthenticatedUser,
    payload: std::result::Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<ReviewsResponse>> {
    let Path(isbn) = isbn?;
    let Json(req) = payload.map_err(invalid_body)?;
    let rating = req
        .rating
        .ok_or_else(|| BookstoreError::Validation("rating required".to_string()))?;
    let comment = req.comment.unwrap_or_default();

    let reviews = state
        .blocking(move |s| s.reviews.upsert(&isbn, &user.username, rating, comment))
        .await?;
    Ok(Json(ReviewsResponse {
        message: "Review added/updated".to_string(),
        reviews,
    }))
}

pub async fn delete_review<S: Store>(
    State(state): State<AppState<S>>,
    isbn: std::result::Result<Path<String>, PathRejection>,
    user: AuthenticatedUser,
) -> Result<Json<ReviewsResponse>> {
    let Path(isbn) = isbn?;
    let reviews = state
        .blocking(move |s| s.reviews.delete(&isbn, &user.username))
        .await?;
    Ok(Json(ReviewsResponse {
        message: "Review deleted".to_string(),
        reviews,
    }))
}

/// unwraps a register/login body, requiring a non-empty username and password
fn required_credentials(
    payload: std::result::Result<Json<Credentials>, JsonRejection>,
) -> Result<(String, String)> {
    let Json(credentials) = payload.map_err(invalid_body)?;
    match (credentials.username, credentials.password) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            Ok((username, password))
        }
        _ => Err(BookstoreError::Validation(
            "username and password required".to_string(),
        )),
    }
}

fn invalid_body(rejection: JsonRejection) -> BookstoreError {
    BookstoreError::Validation(rejection.body_text())
}
