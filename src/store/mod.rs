//! This module provides the storage engines for the two bookstore collections: Books and Users.
//! Collections are always read and written as a whole. The two engines that are implemented are
//! [`JsonStore`], which keeps each collection in a pretty-printed JSON file, and [`MemoryStore`],
//! which keeps the same JSON documents in memory and is mostly useful for tests and demos.
//!
//! [`JsonStore`]: ./struct.JsonStore.html
//! [`MemoryStore`]: ./struct.MemoryStore.html
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Book, Review, User};
use crate::Result;

/// Identifies one of the collections kept by a [`Store`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CollectionId {
    /// the book catalog, including reviews
    Books,
    /// registered user accounts
    Users,
}

impl CollectionId {
    /// the file name used when the collection is persisted to disk
    pub fn file_name(&self) -> &'static str {
        match self {
            CollectionId::Books => "books.json",
            CollectionId::Users => "users.json",
        }
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionId::Books => write!(f, "books"),
            CollectionId::Users => write!(f, "users"),
        }
    }
}

/// A whole set of records of one kind, as loaded from and saved to a [`Store`]
pub trait Collection: Serialize + DeserializeOwned + Default + Send + 'static {
    /// which collection this is
    const ID: CollectionId;

    /// the records a brand new store starts out with
    fn seed() -> Self;
}

/// The Books collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Books(pub Vec<Book>);

impl Books {
    /// finds the book with the given `isbn`
    pub fn find(&self, isbn: &str) -> Option<&Book> {
        self.0.iter().find(|b| b.isbn == isbn)
    }

    /// finds the book with the given `isbn` for modification
    pub fn find_mut(&mut self, isbn: &str) -> Option<&mut Book> {
        self.0.iter_mut().find(|b| b.isbn == isbn)
    }
}

impl Deref for Books {
    type Target = Vec<Book>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Books {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Collection for Books {
    const ID: CollectionId = CollectionId::Books;

    fn seed() -> Self {
        let review = |user: &str, rating: u64, comment: &str| Review {
            user: user.to_string(),
            rating: rating.into(),
            comment: comment.to_string(),
        };
        let book = |isbn: &str, title: &str, author: &str, reviews: Vec<Review>| Book {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            reviews,
        };

        Books(vec![
            book(
                "9780143127741",
                "The Martian",
                "Andy Weir",
                vec![
                    review("alice", 5, "Loved it!"),
                    review("bob", 4, "Great sci-fi."),
                ],
            ),
            book(
                "9780553382563",
                "A Short History of Nearly Everything",
                "Bill Bryson",
                vec![],
            ),
            book("9780307277671", "The Kite Runner", "Khaled Hosseini", vec![]),
        ])
    }
}

/// The Users collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Users(pub Vec<User>);

impl Users {
    /// finds the account with the given `username`
    pub fn find(&self, username: &str) -> Option<&User> {
        self.0.iter().find(|u| u.username == username)
    }
}

impl Deref for Users {
    type Target = Vec<User>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Users {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Collection for Users {
    const ID: CollectionId = CollectionId::Users;

    fn seed() -> Self {
        Users(
            ["alice", "bob"]
                .iter()
                .map(|name| User {
                    username: name.to_string(),
                    password: "password123".to_string(),
                })
                .collect(),
        )
    }
}

/// One write lock per collection. Holding a lock serializes load-modify-save sequences on that
/// collection so that concurrent mutations cannot overwrite each other.
#[derive(Debug, Default)]
pub struct WriteLocks {
    books: Mutex<()>,
    users: Mutex<()>,
}

impl WriteLocks {
    /// acquires the write lock of the given collection
    pub fn acquire(&self, id: CollectionId) -> MutexGuard<'_, ()> {
        let lock = match id {
            CollectionId::Books => &self.books,
            CollectionId::Users => &self.users,
        };
        // the lock guards no data, so a poisoned lock is still usable
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A trait for the basic functionality of a whole-collection storage engine
pub trait Store: Clone + Send + Sync + 'static {
    /// Loads the entire collection `C`.
    ///
    /// Never fails: if the collection is absent or cannot be parsed, an empty collection is
    /// returned instead.
    fn load<C: Collection>(&self) -> C;

    /// Saves `collection`, fully overwriting whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns `BookstoreError::Io` or `BookstoreError::Serde` if the collection could not be
    /// written.
    fn save<C: Collection>(&self, collection: &C) -> Result<()>;

    /// the write locks that [`Store::update`] serializes on
    fn write_locks(&self) -> &WriteLocks;

    /// Loads collection `C`, applies `f` to it and saves the result, all while holding the
    /// collection's write lock.
    ///
    /// If `f` returns an error nothing is saved and the error is returned.
    fn update<C, T, F>(&self, f: F) -> Result<T>
    where
        C: Collection,
        F: FnOnce(&mut C) -> Result<T>,
    {
        let _guard = self.write_locks().acquire(C::ID);
        let mut collection = self.load::<C>();
        let value = f(&mut collection)?;
        self.save(&collection)?;
        debug!(collection = %C::ID, "collection updated");
        Ok(value)
    }
}

mod json;
mod memory;

pub use self::json::JsonStore;
pub use self::memory::MemoryStore;
