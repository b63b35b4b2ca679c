//! Store backends behind the [`KnowledgeStore`] contract.

mod file;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use file::FileKnowledgeStore;
#[cfg(feature = "store-sqlite")]
pub use sqlite::SqliteKnowledgeStore;

use tracing::{info, warn};

use crate::config::Config;
use crate::knowledge::store::KnowledgeStore;

/// Open the store the configuration asks for.
///
/// When the database cannot be opened the process degrades permanently to
/// the file store for its lifetime: one warning, no automatic retry.
pub fn open_store(config: &Config) -> Box<dyn KnowledgeStore> {
    #[cfg(feature = "store-sqlite")]
    if config.knowledge.use_database {
        let file = FileKnowledgeStore::new(
            config.knowledge.file.clone(),
            config.knowledge.save_every,
        );
        match SqliteKnowledgeStore::open(&config.knowledge.database, file) {
            Ok(store) => {
                info!(path = %config.knowledge.database.display(), "knowledge store: sqlite");
                return Box::new(store);
            }
            Err(e) => {
                warn!(error = %e, "knowledge database unavailable, running file-only");
            }
        }
    }

    #[cfg(not(feature = "store-sqlite"))]
    if config.knowledge.use_database {
        warn!("built without the store-sqlite feature, running file-only");
    }

    info!(path = %config.knowledge.file.display(), "knowledge store: file");
    Box::new(FileKnowledgeStore::new(
        config.knowledge.file.clone(),
        config.knowledge.save_every,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_only_config_opens_file_store() {
        let dir = TempDir::new().unwrap();
        let config = Config::test_default(dir.path());
        let store = open_store(&config);
        assert_eq!(store.store_type(), "file");
        assert!(!store.is_durable());
    }

    #[cfg(feature = "store-sqlite")]
    #[test]
    fn database_config_opens_sqlite_store() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::test_default(dir.path());
        config.knowledge.use_database = true;
        let store = open_store(&config);
        assert_eq!(store.store_type(), "sqlite");
        assert!(store.is_durable());
    }

    #[cfg(feature = "store-sqlite")]
    #[test]
    fn unopenable_database_degrades_to_file() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::test_default(dir.path());
        config.knowledge.use_database = true;
        // A directory is not a database file.
        config.knowledge.database = dir.path().to_path_buf();
        let store = open_store(&config);
        assert_eq!(store.store_type(), "file");
    }
}
