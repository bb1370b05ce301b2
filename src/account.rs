use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::model::{LoginResponse, User};
use crate::session::SessionRegistry;
use crate::store::{Store, Users};
use crate::{BookstoreError, Result};

/// Decides how passwords are kept in, and checked against, the Users collection
pub trait PasswordVerifier: Send + Sync + 'static {
    /// turns a password given at registration into the form that is stored
    fn store(&self, password: &str) -> String;

    /// returns `true` if `password` matches the `stored` form
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Keeps passwords as given and compares them for equality.
///
/// This is insecure: anyone able to read `users.json` learns every password.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl PasswordVerifier for PlaintextVerifier {
    fn store(&self, password: &str) -> String {
        password.to_string()
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        password == stored
    }
}

/// Registers user accounts and logs users in
#[derive(Clone)]
pub struct AccountService<S: Store> {
    store: S,
    sessions: SessionRegistry,
    verifier: Arc<dyn PasswordVerifier>,
}

impl<S: Store> AccountService<S> {
    /// creates an account service that checks passwords with a [`PlaintextVerifier`]
    pub fn new(store: S, sessions: SessionRegistry) -> Self {
        Self::with_verifier(store, sessions, PlaintextVerifier)
    }

    /// creates an account service that checks passwords with the given `verifier`
    pub fn with_verifier(
        store: S,
        sessions: SessionRegistry,
        verifier: impl PasswordVerifier,
    ) -> Self {
        AccountService {
            store,
            sessions,
            verifier: Arc::new(verifier),
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    /// returns `BookstoreError::AlreadyExists` if `username` is taken
    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        self.store.update::<Users, _, _>(|users| {
            if users.find(username).is_some() {
                return Err(BookstoreError::AlreadyExists(
                    "User already exists".to_string(),
                ));
            }
            users.push(User {
                username: username.to_string(),
                password: self.verifier.store(password),
            });
            Ok(())
        })?;
        info!("registered a new user");
        Ok(())
    }

    /// Checks the credentials and starts a new session for the user.
    ///
    /// Returns the new session token together with the username.
    ///
    /// # Errors
    /// returns `BookstoreError::InvalidCredentials` if there is no such user or the password does
    /// not match
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let users = self.store.load::<Users>();
        match users.find(username) {
            Some(user) if self.verifier.verify(password, &user.password) => Ok(LoginResponse {
                token: self.sessions.issue(username),
                username: username.to_string(),
            }),
            _ => {
                warn!("login rejected");
                Err(BookstoreError::InvalidCredentials)
            }
        }
    }
}
