use axum::extract::FromRef;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::account::AccountService;
use crate::catalog::CatalogService;
use crate::review::ReviewService;
use crate::session::SessionRegistry;
use crate::store::Store;
use crate::{BookstoreError, Result};

mod auth;
mod handlers;
mod response;

pub use self::auth::AuthenticatedUser;

/// An HTTP server exposing the bookstore services under `/api`.
///
/// Each request runs its service call on tokio's blocking thread pool, since the stores perform
/// synchronous file IO.
///
/// # Example
/// Create and run a new server listening on "127.0.0.1:3000", keeping its data in `./data`
/// ```rust
/// use std::path::Path;
/// use bookstore::{BookstoreServer, JsonStore, SessionRegistry};
/// # async fn run() -> bookstore::Result<()> {
/// let store = JsonStore::open(Path::new("data"))?;
/// let server = BookstoreServer::new(store, SessionRegistry::new());
/// server.run("127.0.0.1:3000").await?;
/// # Ok(())
/// # }
/// ```
pub struct BookstoreServer<S: Store> {
    state: AppState<S>,
}

impl<S: Store> BookstoreServer<S> {
    /// Create a new `BookstoreServer` over the given [`Store`], issuing sessions from `sessions`
    pub fn new(store: S, sessions: SessionRegistry) -> Self {
        BookstoreServer {
            state: AppState::new(store, sessions),
        }
    }

    /// builds the router serving every bookstore route
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// starts a server listening on the given address
    ///
    /// # Errors
    /// returns `BookstoreError::Io` if the address could not be bound
    pub async fn run<A: ToSocketAddrs>(self, addr: A) -> Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// serves requests arriving on an already bound `listener` until the process stops
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Everything a request handler needs. Cloned into every request.
#[derive(Clone)]
pub struct AppState<S: Store> {
    catalog: CatalogService<S>,
    reviews: ReviewService<S>,
    accounts: AccountService<S>,
    sessions: SessionRegistry,
}

impl<S: Store> AppState<S> {
    fn new(store: S, sessions: SessionRegistry) -> Self {
        AppState {
            catalog: CatalogService::new(store.clone()),
            reviews: ReviewService::new(store.clone()),
            accounts: AccountService::new(store, sessions.clone()),
            sessions,
        }
    }

    /// runs `job` against the services on the blocking thread pool
    async fn blocking<T, F>(&self, job: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&AppState<S>) -> Result<T> + Send + 'static,
    {
        let state = self.clone();
        tokio::task::spawn_blocking(move || job(&state))
            .await
            .map_err(|e| BookstoreError::Internal(format!("request task failed: {}", e)))?
    }
}

impl<S: Store> FromRef<AppState<S>> for SessionRegistry {
    fn from_ref(state: &AppState<S>) -> Self {
        state.sessions.clone()
    }
}

fn router<S: Store>(state: AppState<S>) -> Router {
    let api_routes = Router::new()
        .route("/books", get(handlers::list_books::<S>))
        .route("/books/isbn/{isbn}", get(handlers::book_by_isbn::<S>))
        .route("/books/author/{author}", get(handlers::books_by_author::<S>))
        .route("/books/title/{title}", get(handlers::books_by_title::<S>))
        .route(
            "/books/{isbn}/reviews",
            get(handlers::list_reviews::<S>)
                .post(handlers::put_review::<S>)
                .delete(handlers::delete_review::<S>),
        )
        .route("/register", post(handlers::register::<S>))
        .route("/login", post(handlers::login::<S>));

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
