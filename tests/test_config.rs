//! Config store integration tests

use identity_manager::domain::Engine;
use identity_manager::infra::{ConfigStore, DatabaseConfig};
use std::fs;

// ──────────────────────── Helper ────────────────────────

fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
    ConfigStore::new(dir.path().join("im"))
}

// ══════════════════════════════════════════════════════════
//  init
// ══════════════════════════════════════════════════════════

#[test]
fn init_creates_directory_and_empty_file() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    assert!(!store.exists());

    store.init().unwrap();

    assert!(store.dir().is_dir());
    assert!(store.exists());
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
}

#[test]
fn init_twice_keeps_existing_content() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    store
        .save(&DatabaseConfig::new("db.local", "5432", "admin", "pw"))
        .unwrap();
    let before = fs::read_to_string(store.path()).unwrap();

    store.init().unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn init_fails_when_directory_path_is_a_file() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("im");
    fs::write(&blocker, "not a dir").unwrap();
    let store = ConfigStore::new(&blocker);

    let err = store.init().unwrap_err();
    assert_eq!(err.code(), "DIR_ERROR");
}

#[test]
fn config_file_is_named_config_ini() {
    let store = ConfigStore::new("/some/where/im");
    assert_eq!(store.path(), std::path::Path::new("/some/where/im/config.ini"));
}

// ══════════════════════════════════════════════════════════
//  save / read
// ══════════════════════════════════════════════════════════

#[test]
fn save_then_read_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    let cfg = DatabaseConfig::new("db.example.com", "5433", "admin", "hunter2");

    store.save(&cfg).unwrap();

    assert_eq!(store.read().unwrap(), cfg);
}

#[test]
fn round_trip_keeps_empty_values() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    let cfg = DatabaseConfig::new("", "", "", "");

    store.save(&cfg).unwrap();

    assert_eq!(store.read().unwrap(), cfg);
}

#[test]
fn round_trip_keeps_unicode_values() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    let cfg = DatabaseConfig::new("hôte.exemple", "5432", "ユーザー", "pässwörd🔑");

    store.save(&cfg).unwrap();

    assert_eq!(store.read().unwrap(), cfg);
}

#[test]
fn round_trip_keeps_ini_reserved_characters() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    let cfg = DatabaseConfig::new("C:\\data\\db", "5432", "admin", "p;w#1=x:y");

    store.save(&cfg).unwrap();

    assert_eq!(store.read().unwrap(), cfg);
}

#[test]
fn save_rejects_values_with_surrounding_whitespace() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    let good = DatabaseConfig::new("db.local", "5432", "admin", "pw");
    store.save(&good).unwrap();
    let before = fs::read_to_string(store.path()).unwrap();

    for password in [" pw ", "\tpw", "pw "] {
        let err = store
            .save(&DatabaseConfig::new("db.local", "5432", "admin", password))
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("password"));
        assert!(!err.to_string().contains(password));
    }
    let err = store
        .save(&DatabaseConfig::new(" db.local", "5432", "admin", "pw"))
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");

    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    assert_eq!(store.read().unwrap(), good);
}

#[test]
fn save_keeps_inner_whitespace() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    let cfg = DatabaseConfig::new("db.local", "5432", "admin user", "p w d");

    store.save(&cfg).unwrap();

    assert_eq!(store.read().unwrap(), cfg);
}

#[test]
fn save_replaces_all_fields() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    store
        .save(&DatabaseConfig::new("old", "1", "old-user", "old-pw"))
        .unwrap();
    let new = DatabaseConfig::new("new", "2", "new-user", "new-pw");

    store.save(&new).unwrap();

    assert_eq!(store.read().unwrap(), new);
    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(!raw.contains("old"));
}

#[test]
fn saved_file_uses_database_section() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    store
        .save(&DatabaseConfig::new("localhost", "5432", "postgres", "pw"))
        .unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("[Database]"));
    assert!(raw.contains("host=localhost"));
    assert!(raw.contains("port=5432"));
    assert!(raw.contains("username=postgres"));
    assert!(raw.contains("password=pw"));
    // default engine is not written
    assert!(!raw.contains("engine"));
}

#[test]
fn sqlite_engine_is_persisted() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    let cfg = DatabaseConfig::new("/var/lib/im", "0", "u", "p").with_engine(Engine::Sqlite);

    store.save(&cfg).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("engine=sqlite"));
    assert_eq!(store.read().unwrap().engine, Engine::Sqlite);
}

#[test]
fn save_without_init_fails_with_file_error() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);

    let err = store
        .save(&DatabaseConfig::new("h", "1", "u", "p"))
        .unwrap_err();
    assert_eq!(err.code(), "FILE_ERROR");
}

#[test]
fn save_leaves_no_temporary_file() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    store.save(&DatabaseConfig::new("h", "1", "u", "p")).unwrap();

    let names: Vec<_> = fs::read_dir(store.dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["config.ini".to_string()]);
}

#[test]
fn read_missing_file_is_read_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = store_in(&tmp).read().unwrap_err();
    assert_eq!(err.code(), "DB_READ_ERROR");
}

#[test]
fn read_empty_file_is_read_error() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();

    let err = store.read().unwrap_err();
    assert_eq!(err.code(), "DB_READ_ERROR");
    assert!(err.to_string().contains("Database"));
}

#[test]
fn read_missing_key_is_read_error() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    fs::write(store.path(), "[Database]\nhost=h\nport=1\nusername=u\n").unwrap();

    let err = store.read().unwrap_err();
    assert_eq!(err.code(), "DB_READ_ERROR");
    assert!(err.to_string().contains("password"));
}

#[test]
fn read_unknown_engine_is_read_error() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    fs::write(
        store.path(),
        "[Database]\nhost=h\nport=1\nusername=u\npassword=p\nengine=oracle\n",
    )
    .unwrap();

    let err = store.read().unwrap_err();
    assert_eq!(err.code(), "DB_READ_ERROR");
}

#[test]
fn read_accepts_hand_written_file() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    fs::write(
        store.path(),
        "[Database]\nhost = localhost\nport = 5432\nusername = postgres\npassword = secret\n",
    )
    .unwrap();

    let cfg = store.read().unwrap();
    assert_eq!(cfg.host, "localhost");
    assert_eq!(cfg.port, "5432");
    assert_eq!(cfg.username, "postgres");
    assert_eq!(cfg.password, "secret");
    assert_eq!(cfg.engine, Engine::Postgres);
}

#[test]
fn debug_output_redacts_password() {
    let cfg = DatabaseConfig::new("h", "1", "u", "hunter2");
    let dbg = format!("{:?}", cfg);
    assert!(!dbg.contains("hunter2"));
    assert!(dbg.contains("<redacted>"));
}

#[test]
fn json_output_omits_password() {
    let cfg = DatabaseConfig::new("h", "1", "u", "hunter2");
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(!json.contains("hunter2"));
    assert!(json.contains("\"engine\":\"postgres\""));
}

// ══════════════════════════════════════════════════════════
//  delete
// ══════════════════════════════════════════════════════════

#[test]
fn delete_removes_file_and_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    store.save(&DatabaseConfig::new("h", "1", "u", "p")).unwrap();

    store.delete().unwrap();

    assert!(!store.exists());
    assert!(!store.dir().exists());
    assert_eq!(store.read().unwrap_err().code(), "DB_READ_ERROR");
}

#[test]
fn delete_missing_file_is_file_error() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);

    let err = store.delete().unwrap_err();
    assert_eq!(err.code(), "FILE_ERROR");
}

#[test]
fn delete_with_foreign_file_keeps_directory_and_errors() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    store.init().unwrap();
    fs::write(store.dir().join("notes.txt"), "keep me").unwrap();

    let err = store.delete().unwrap_err();

    assert_eq!(err.code(), "FILE_ERROR");
    assert!(!store.exists());
    assert!(store.dir().join("notes.txt").exists());
}
