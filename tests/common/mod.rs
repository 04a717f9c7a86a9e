//! Shared setup: a config dir and a SQLite "server" dir in one tempdir.

#![allow(dead_code)]

use identity_manager::app::database_init;
use identity_manager::domain::Engine;
use identity_manager::infra::{ConfigStore, DatabaseConfig, RecordStore};
use tempfile::TempDir;

pub const TEST_PASSWORD: &str = "db-s3cret-pw";

pub fn sqlite_config(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig::new(
        dir.path().join("server").to_string_lossy(),
        "0",
        "tester",
        TEST_PASSWORD,
    )
    .with_engine(Engine::Sqlite)
}

/// Config saved, database not yet created.
pub fn init_test_config() -> (TempDir, RecordStore) {
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigStore::new(dir.path().join("config"));
    config.init().unwrap();
    config.save(&sqlite_config(&dir)).unwrap();
    (dir, RecordStore::new(config))
}

/// Config saved and database initialized.
pub fn init_test_store() -> (TempDir, RecordStore) {
    let (dir, store) = init_test_config();
    database_init(&store).unwrap();
    (dir, store)
}
