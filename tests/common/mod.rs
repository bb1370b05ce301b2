#![allow(dead_code)]

use bookstore::model::Review;
use bookstore::JsonStore;
use tempfile::TempDir;

pub const MARTIAN: &str = "9780143127741";
pub const SHORT_HISTORY: &str = "9780553382563";
pub const KITE_RUNNER: &str = "9780307277671";

/// opens a seeded `JsonStore` in a fresh temporary directory.
/// The `TempDir` must be kept alive for as long as the store is used.
pub fn seeded_store() -> (TempDir, JsonStore) {
    let temp_dir = TempDir::new().expect("unable to create temporary working directory");
    let store = JsonStore::open(temp_dir.path()).expect("unable to open store");
    (temp_dir, store)
}

/// the users of `reviews`, in order
pub fn users(reviews: &[Review]) -> Vec<&str> {
    reviews.iter().map(|r| r.user.as_str()).collect()
}
