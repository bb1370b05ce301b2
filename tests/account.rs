use std::collections::HashSet;

use bookstore::store::Users;
use bookstore::{AccountService, BookstoreError, PasswordVerifier, SessionRegistry, Store};

mod common;
use common::*;

#[test]
fn register_rejects_existing_username() {
    let (_dir, store) = seeded_store();
    let accounts = AccountService::new(store.clone(), SessionRegistry::new());

    match accounts.register("alice", "anything") {
        Err(BookstoreError::AlreadyExists(msg)) => assert_eq!(msg, "User already exists"),
        other => panic!("expected AlreadyExists, got {:?}", other),
    }
    assert_eq!(store.load::<Users>().len(), 2);
}

#[test]
fn register_persists_the_account() {
    let (_dir, store) = seeded_store();
    let accounts = AccountService::new(store.clone(), SessionRegistry::new());

    accounts.register("carol", "secret").unwrap();

    let users = store.load::<Users>();
    assert_eq!(users.len(), 3);
    assert_eq!(users.find("carol").unwrap().password, "secret");
    assert!(matches!(
        accounts.register("carol", "other"),
        Err(BookstoreError::AlreadyExists(_))
    ));
}

#[test]
fn login_issues_a_fresh_token_every_time() {
    let (_dir, store) = seeded_store();
    let sessions = SessionRegistry::new();
    let accounts = AccountService::new(store, sessions.clone());

    let mut tokens = HashSet::new();
    for _ in 0..5 {
        let session = accounts.login("alice", "password123").unwrap();
        assert_eq!(session.username, "alice");
        assert!(tokens.insert(session.token));
    }

    // earlier tokens remain valid
    for token in &tokens {
        assert_eq!(sessions.resolve(token).as_deref(), Some("alice"));
    }
}

#[test]
fn login_rejects_bad_credentials() {
    let (_dir, store) = seeded_store();
    let sessions = SessionRegistry::new();
    let accounts = AccountService::new(store, sessions.clone());

    assert!(matches!(
        accounts.login("alice", "wrong"),
        Err(BookstoreError::InvalidCredentials)
    ));
    assert!(matches!(
        accounts.login("nobody", "password123"),
        Err(BookstoreError::InvalidCredentials)
    ));
    assert!(sessions.is_empty());
}

/// stores passwords reversed, to check the verifier is used on both paths
struct Reversed;

impl PasswordVerifier for Reversed {
    fn store(&self, password: &str) -> String {
        password.chars().rev().collect()
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        self.store(password) == stored
    }
}

#[test]
fn custom_verifier_is_used_for_register_and_login() {
    let (_dir, store) = seeded_store();
    let accounts = AccountService::with_verifier(store.clone(), SessionRegistry::new(), Reversed);

    accounts.register("carol", "abc").unwrap();

    assert_eq!(store.load::<Users>().find("carol").unwrap().password, "cba");
    assert!(accounts.login("carol", "abc").is_ok());
    assert!(matches!(
        accounts.login("carol", "cba"),
        Err(BookstoreError::InvalidCredentials)
    ));
}
