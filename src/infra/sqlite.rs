//! SQLite backend: a local directory stands in for the database server.
//!
//! `host` names the directory. Each database is one file
//! `<host>/<name>.sqlite3`; the admin target is an in-memory connection that
//! only creates and removes those files. The directory itself is created by
//! the first `create_database`.

use crate::domain::User;
use crate::error::DriverError;
use crate::infra::config::DatabaseConfig;
use crate::infra::db::{Session, Target};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const FILE_EXTENSION: &str = "sqlite3";

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    uuid TEXT PRIMARY KEY NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    password TEXT NOT NULL
)";

pub struct SqliteSession {
    root: PathBuf,
    conn: Connection,
}

impl SqliteSession {
    pub fn connect(config: &DatabaseConfig, target: Target) -> Result<Self, DriverError> {
        let root = PathBuf::from(&config.host);
        let conn = match target {
            Target::Admin => Connection::open_in_memory()?,
            Target::App => {
                let path = database_path(&root, target.database());
                if !path.is_file() {
                    return Err(DriverError::DatabaseMissing(target.database().to_string()));
                }
                Connection::open_with_flags(
                    &path,
                    OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
                )?
            }
        };
        Ok(Self { root, conn })
    }
}

fn database_path(root: &Path, name: &str) -> PathBuf {
    root.join(format!("{}.{}", name, FILE_EXTENSION))
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let raw: String = row.get(0)?;
    let id = Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
    Ok(User {
        id,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        password: row.get(4)?,
    })
}

impl Session for SqliteSession {
    fn create_database(&mut self, name: &str) -> Result<(), DriverError> {
        let path = database_path(&self.root, name);
        if path.exists() {
            return Err(DriverError::DatabaseExists(name.to_string()));
        }
        fs::create_dir_all(&self.root)?;
        let db = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        // Force a header write so the file is a real database.
        db.execute_batch("PRAGMA user_version = 1")?;
        db.close().map_err(|(_, e)| e)?;
        log::info!("Created database {:?}", path);
        Ok(())
    }

    fn drop_database(&mut self, name: &str) -> Result<(), DriverError> {
        let path = database_path(&self.root, name);
        if !path.is_file() {
            return Err(DriverError::DatabaseMissing(name.to_string()));
        }
        fs::remove_file(&path)?;
        log::info!("Dropped database {:?}", path);
        Ok(())
    }

    fn create_users_table(&mut self) -> Result<(), DriverError> {
        self.conn.execute_batch(CREATE_USERS_TABLE)?;
        Ok(())
    }

    fn insert_user(&mut self, user: &User) -> Result<(), DriverError> {
        self.conn.execute(
            "INSERT INTO users (uuid, first_name, last_name, email, password) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id.to_string(),
                user.first_name,
                user.last_name,
                user.email,
                user.password
            ],
        )?;
        Ok(())
    }

    fn update_user(&mut self, user: &User) -> Result<u64, DriverError> {
        let n = self.conn.execute(
            "UPDATE users SET first_name = ?1, last_name = ?2, email = ?3, password = ?4 WHERE uuid = ?5",
            params![
                user.first_name,
                user.last_name,
                user.email,
                user.password,
                user.id.to_string()
            ],
        )?;
        Ok(n as u64)
    }

    fn delete_user(&mut self, id: &Uuid) -> Result<u64, DriverError> {
        let n = self
            .conn
            .execute("DELETE FROM users WHERE uuid = ?1", [id.to_string()])?;
        Ok(n as u64)
    }

    fn find_user(&mut self, id: &Uuid) -> Result<Option<User>, DriverError> {
        let user = self
            .conn
            .query_row(
                "SELECT uuid, first_name, last_name, email, password FROM users WHERE uuid = ?1",
                [id.to_string()],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn list_users(&mut self) -> Result<Vec<User>, DriverError> {
        let mut stmt = self
            .conn
            .prepare("SELECT uuid, first_name, last_name, email, password FROM users")?;
        let rows = stmt.query_map([], user_from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn ping(&mut self) -> Result<(), DriverError> {
        if !self.root.is_dir() {
            return Err(DriverError::DataDirMissing(self.root.display().to_string()));
        }
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<(), DriverError> {
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}
