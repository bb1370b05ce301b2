use std::fs;
use std::thread;

use bookstore::store::{Books, Collection, CollectionId, Users};
use bookstore::{JsonStore, MemoryStore, ReviewService, Store};
use serde_json::Number;
use tempfile::TempDir;

mod common;
use common::*;

#[test]
fn unparsable_file_loads_as_empty() {
    let (_dir, store) = seeded_store();
    fs::write(store.path(CollectionId::Books), "{ not json").unwrap();

    assert!(store.load::<Books>().is_empty());
    // the other collection is unaffected
    assert_eq!(store.load::<Users>(), Users::seed());
}

#[test]
fn missing_file_loads_as_empty() {
    let (_dir, store) = seeded_store();
    fs::remove_file(store.path(CollectionId::Users)).unwrap();

    assert!(store.load::<Users>().is_empty());
}

#[test]
fn missing_reviews_field_loads_as_no_reviews() {
    let (_dir, store) = seeded_store();
    fs::write(
        store.path(CollectionId::Books),
        r#"[{"isbn":"1","title":"Untitled","author":"Anonymous"}]"#,
    )
    .unwrap();

    let books = store.load::<Books>();
    assert_eq!(books.len(), 1);
    assert!(books[0].reviews.is_empty());
}

#[test]
fn open_keeps_existing_data() {
    let temp_dir = TempDir::new().expect("unable to create temporary working directory");
    let store = JsonStore::open(temp_dir.path()).unwrap();
    store.save(&Books(vec![])).unwrap();

    let reopened = JsonStore::open(temp_dir.path()).unwrap();
    assert!(reopened.load::<Books>().is_empty());
}

#[test]
fn save_overwrites_the_whole_collection() {
    let (_dir, store) = seeded_store();
    let mut books = store.load::<Books>();
    books.truncate(1);
    store.save(&books).unwrap();

    assert_eq!(store.load::<Books>().len(), 1);
}

#[test]
fn save_into_a_removed_directory_fails() {
    let (dir, store) = seeded_store();
    let path = dir.path().to_path_buf();
    drop(dir);
    assert!(!path.exists());

    assert!(store.save(&Books::seed()).is_err());
}

#[test]
fn memory_store_round_trips_and_tolerates_garbage() {
    let store = MemoryStore::seeded().unwrap();
    assert_eq!(store.load::<Books>(), Books::seed());

    store.put_raw(CollectionId::Books, "garbage");
    assert!(store.load::<Books>().is_empty());
    assert!(MemoryStore::new().load::<Users>().is_empty());
}

#[test]
fn concurrent_reviews_are_not_lost() {
    let (_dir, store) = seeded_store();
    let isbns = [MARTIAN, SHORT_HISTORY, KITE_RUNNER];

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let reviews = ReviewService::new(store.clone());
            let isbn = isbns[i % isbns.len()];
            thread::spawn(move || {
                reviews
                    .upsert(isbn, &format!("user{}", i), Number::from(3), "concurrent".to_string())
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let books = store.load::<Books>();
    let total: usize = books.iter().map(|b| b.reviews.len()).sum();
    // two seed reviews plus one per thread
    assert_eq!(total, 14);
    for i in 0..12 {
        let book = books.find(isbns[i % isbns.len()]).unwrap();
        assert!(book.review_position(&format!("user{}", i)).is_some());
    }
}

#[test]
fn concurrent_reviews_are_not_lost_in_memory() {
    let store = MemoryStore::seeded().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let reviews = ReviewService::new(store.clone());
            thread::spawn(move || {
                reviews
                    .upsert(KITE_RUNNER, &format!("user{}", i), Number::from(1), String::new())
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.load::<Books>().find(KITE_RUNNER).unwrap().reviews.len(), 8);
}
