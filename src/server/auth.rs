use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tracing::debug;

use crate::session::SessionRegistry;
use crate::BookstoreError;

/// The user a request was authenticated as, resolved from its `Authorization: Bearer <token>`
/// header. Handlers that take this extractor reject unauthenticated requests with a 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// the username the bearer token was issued to
    pub username: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    SessionRegistry: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BookstoreError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| BookstoreError::Unauthenticated("Missing token".to_string()))?;

        match SessionRegistry::from_ref(state).resolve(token) {
            Some(username) => Ok(AuthenticatedUser { username }),
            None => {
                debug!("rejected unknown session token");
                Err(BookstoreError::Unauthenticated("Invalid token".to_string()))
            }
        }
    }
}

/// extracts the token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
