#![deny(missing_docs)]
//! A small book catalog web service that lets users browse books and write reviews.
//!
//! This crate provides the services themselves, an HTTP [`BookstoreServer`] exposing them, and a
//! [`BookstoreClient`] for talking to that server. The [`bookstore-server`] and
//! [`bookstore-client`] executables wrap these for use from the command line.
//!
//! ## Supported Operations
//! Anybody may query the catalog:
//!
//! - list every book, or find books by ISBN, by author or by title
//!     - author and title searches are case-insensitive substring matches
//! - list the reviews of a book
//!
//! Users may register an account and log in. A login returns an opaque session token, which
//! must be sent as an `Authorization: Bearer <token>` header to:
//!
//! - add a review to a book, or modify the review they already wrote on it
//! - delete their review of a book
//!
//! A user holds at most one review per book. Modifying a review keeps its position among the
//! other reviews of the book; a new review is appended after them.
//!
//! ## Storage
//! Books (with their reviews) and user accounts are kept as two "collections" by a [`Store`].
//! A collection is always loaded and saved as a whole: every query re-reads it, and every
//! mutation loads it, changes it and writes all of it back. Mutations of the same collection are
//! serialized, so two concurrent reviews never overwrite each other.
//!
//! [`JsonStore`] keeps each collection in a pretty-printed JSON file, `books.json` and
//! `users.json`, within a data directory. Missing files are created with a few seed books and
//! users when the store is opened. A file that cannot be read or parsed is treated as an empty
//! collection rather than as an error. [`MemoryStore`] keeps the same documents in memory.
//!
//! ## Sessions
//! Sessions live in a [`SessionRegistry`] held by the server process; they are not persisted,
//! never expire and cannot be revoked. Restarting the server logs everybody out.
//!
//! ## Passwords
//! Passwords are stored and compared as plaintext by the [`PlaintextVerifier`]. Password
//! handling is isolated behind the [`PasswordVerifier`] trait so another scheme can be dropped in.
//!
//! [`Store`]: ./store/trait.Store.html
//! [`JsonStore`]: ./store/struct.JsonStore.html
//! [`MemoryStore`]: ./store/struct.MemoryStore.html
//! [`bookstore-server`]: ./bin/bookstore-server.rs
//! [`bookstore-client`]: ./bin/bookstore-client.rs

pub use account::{AccountService, PasswordVerifier, PlaintextVerifier};
pub use catalog::CatalogService;
pub use client::BookstoreClient;
pub use error::{BookstoreError, Result};
pub use model::{Book, Review, User};
pub use review::ReviewService;
pub use server::{AuthenticatedUser, BookstoreServer};
pub use session::SessionRegistry;
pub use store::{JsonStore, MemoryStore, Store};

mod account;
mod catalog;
mod client;
mod error;
pub mod model;
mod review;
mod server;
mod session;
pub mod store;
