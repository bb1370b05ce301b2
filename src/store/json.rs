use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::{Books, Collection, CollectionId, Store, Users, WriteLocks};
use crate::Result;

/// A [`Store`] that keeps every collection in its own pretty-printed JSON file.
///
/// The directory where these files are kept, the "data dir", is given as a parameter when first
/// opening the store. Every save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    // directory containing books.json and users.json
    data_dir: PathBuf,

    // shared by all clones of this store
    locks: Arc<WriteLocks>,
}

impl JsonStore {
    /// opens a [`JsonStore`] using the given `data_dir` as the directory where the collection
    /// files will be kept. If the `data_dir` does not exist it will be created, and any
    /// collection file that does not exist is written with its seed records.
    #[instrument]
    pub fn open(data_dir: &Path) -> Result<JsonStore> {
        fs::create_dir_all(data_dir)?;
        let store = JsonStore {
            data_dir: data_dir.to_path_buf(),
            locks: Arc::new(WriteLocks::default()),
        };

        store.seed_if_missing::<Books>()?;
        store.seed_if_missing::<Users>()?;
        Ok(store)
    }

    /// the path of the file holding the collection `id`
    pub fn path(&self, id: CollectionId) -> PathBuf {
        self.data_dir.join(id.file_name())
    }

    fn seed_if_missing<C: Collection>(&self) -> Result<()> {
        let path = self.path(C::ID);
        if !path.exists() {
            info!("seeding {} into {:?}", C::ID, &path);
            self.save(&C::seed())?;
        }
        Ok(())
    }
}

impl Store for JsonStore {
    fn load<C: Collection>(&self) -> C {
        let path = self.path(C::ID);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{:?} does not exist, using an empty {}", &path, C::ID);
                return C::default();
            }
            Err(e) => {
                warn!("could not read {:?}, using an empty {}: {}", &path, C::ID, e);
                return C::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("the content of {:?} is invalid, using an empty {}: {}", &path, C::ID, e);
            C::default()
        })
    }

    fn save<C: Collection>(&self, collection: &C) -> Result<()> {
        let path = self.path(C::ID);
        let json = serde_json::to_string_pretty(collection)?;
        fs::write(&path, json)?;
        debug!("wrote {} to {:?}", C::ID, &path);
        Ok(())
    }

    fn write_locks(&self) -> &WriteLocks {
        &self.locks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_seeds_missing_files_only() {
        let temp_dir = TempDir::new().expect("unable to create temporary working directory");
        fs::write(temp_dir.path().join("users.json"), "[]").unwrap();

        let store = JsonStore::open(temp_dir.path()).unwrap();

        assert_eq!(store.load::<Books>(), Books::seed());
        assert!(store.load::<Users>().is_empty());
    }

    #[test]
    fn files_are_pretty_printed() {
        let temp_dir = TempDir::new().expect("unable to create temporary working directory");
        let store = JsonStore::open(temp_dir.path()).unwrap();

        let raw = fs::read_to_string(store.path(CollectionId::Users)).unwrap();
        assert!(raw.starts_with("[\n  {"));
        assert!(raw.contains("\"username\": \"alice\""));
    }
}
