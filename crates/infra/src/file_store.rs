//! File-backed durable local store.

use std::io::ErrorKind;
use std::path::PathBuf;

use netlease_reservation::{ReservationStore, StoreError};

/// Durable local store keeping one file per key under a directory.
///
/// Values are written verbatim, so the reservation blob on disk is the same
/// JSON the manager serializes.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the OS application data directory
    /// (`{data_dir}/netlease`).
    pub fn in_default_location() -> Result<Self, StoreError> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut home| {
                    home.push(".local");
                    home.push("share");
                    home
                })
            })
            .ok_or_else(|| {
                StoreError::Write("failed to resolve OS app data directory".to_string())
            })?;

        Ok(Self::new(base.join("netlease")))
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ReservationStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Read(err.to_string())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|err| StoreError::Write(err.to_string()))?;

        let path = self.path_for(key);
        // Write to a sibling then rename, so a crash mid-write cannot leave a
        // truncated blob behind.
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, value).map_err(|err| StoreError::Write(err.to_string()))?;
        std::fs::rename(&tmp, &path).map_err(|err| StoreError::Write(err.to_string()))?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote store entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("netlease-file-store-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn read_of_missing_key_is_none() {
        let store = FileStore::new(test_dir("missing"));
        assert!(store.read("absent").unwrap().is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let store = FileStore::new(test_dir("round-trip"));

        store.write("selectedResources", "[{\"id\":\"r1\"}]").unwrap();
        assert_eq!(
            store.read("selectedResources").unwrap().as_deref(),
            Some("[{\"id\":\"r1\"}]")
        );

        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[test]
    fn write_overwrites_previous_value() {
        let store = FileStore::new(test_dir("overwrite"));

        store.write("k", "one").unwrap();
        store.write("k", "two").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("two"));

        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[test]
    fn values_land_in_one_file_per_key() {
        let store = FileStore::new(test_dir("layout"));

        store.write("a", "1").unwrap();
        store.write("b", "2").unwrap();

        assert!(store.dir().join("a.json").is_file());
        assert!(store.dir().join("b.json").is_file());

        let _ = std::fs::remove_dir_all(store.dir());
    }
}
