//! PostgreSQL backend.
//!
//! sqlx is async; each session owns a current-thread tokio runtime and blocks
//! on it, so callers stay synchronous. The runtime is dropped with the session.

use crate::domain::User;
use crate::error::DriverError;
use crate::infra::config::DatabaseConfig;
use crate::infra::db::Session;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, Executor};
use tokio::runtime::{Builder, Runtime};
use uuid::Uuid;

// SQLSTATE codes
const DUPLICATE_DATABASE: &str = "42P04";
const INVALID_CATALOG_NAME: &str = "3D000";

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    uuid uuid PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    password TEXT NOT NULL
)";

type UserRow = (Uuid, String, String, String, String);

pub struct PgSession {
    runtime: Runtime,
    conn: PgConnection,
}

impl PgSession {
    pub fn connect(config: &DatabaseConfig, database: &str) -> Result<Self, DriverError> {
        let port: u16 = config
            .port
            .trim()
            .parse()
            .map_err(|_| DriverError::InvalidPort(config.port.clone()))?;
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(port)
            .username(&config.username)
            .password(&config.password)
            .database(database);

        let runtime = Builder::new_current_thread().enable_all().build()?;
        let conn = runtime.block_on(PgConnection::connect_with(&options))?;
        Ok(Self { runtime, conn })
    }
}

/// Double-quote an identifier for statements that cannot take bind
/// parameters (`CREATE DATABASE`, `DROP DATABASE`).
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn sqlstate(e: &sqlx::Error) -> Option<String> {
    match e {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    }
}

fn into_user((id, first_name, last_name, email, password): UserRow) -> User {
    User {
        id,
        first_name,
        last_name,
        email,
        password,
    }
}

impl Session for PgSession {
    fn create_database(&mut self, name: &str) -> Result<(), DriverError> {
        let sql = format!("CREATE DATABASE {}", quote_ident(name));
        match self.runtime.block_on(self.conn.execute(sql.as_str())) {
            Ok(_) => {
                log::info!("Created database {}", name);
                Ok(())
            }
            Err(e) if sqlstate(&e).as_deref() == Some(DUPLICATE_DATABASE) => {
                Err(DriverError::DatabaseExists(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn drop_database(&mut self, name: &str) -> Result<(), DriverError> {
        let sql = format!("DROP DATABASE {}", quote_ident(name));
        match self.runtime.block_on(self.conn.execute(sql.as_str())) {
            Ok(_) => {
                log::info!("Dropped database {}", name);
                Ok(())
            }
            Err(e) if sqlstate(&e).as_deref() == Some(INVALID_CATALOG_NAME) => {
                Err(DriverError::DatabaseMissing(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn create_users_table(&mut self) -> Result<(), DriverError> {
        self.runtime
            .block_on(self.conn.execute(CREATE_USERS_TABLE))?;
        Ok(())
    }

    fn insert_user(&mut self, user: &User) -> Result<(), DriverError> {
        let query = sqlx::query(
            "INSERT INTO users (uuid, first_name, last_name, email, password) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_str());
        self.runtime.block_on(query.execute(&mut self.conn))?;
        Ok(())
    }

    fn update_user(&mut self, user: &User) -> Result<u64, DriverError> {
        let query = sqlx::query(
            "UPDATE users SET first_name = $1, last_name = $2, email = $3, password = $4 WHERE uuid = $5",
        )
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_str())
        .bind(user.id);
        let done = self.runtime.block_on(query.execute(&mut self.conn))?;
        Ok(done.rows_affected())
    }

    fn delete_user(&mut self, id: &Uuid) -> Result<u64, DriverError> {
        let query = sqlx::query("DELETE FROM users WHERE uuid = $1").bind(*id);
        let done = self.runtime.block_on(query.execute(&mut self.conn))?;
        Ok(done.rows_affected())
    }

    fn find_user(&mut self, id: &Uuid) -> Result<Option<User>, DriverError> {
        let query = sqlx::query_as::<_, UserRow>(
            "SELECT uuid, first_name, last_name, email, password FROM users WHERE uuid = $1",
        )
        .bind(*id);
        let row = self.runtime.block_on(query.fetch_optional(&mut self.conn))?;
        Ok(row.map(into_user))
    }

    fn list_users(&mut self) -> Result<Vec<User>, DriverError> {
        let query = sqlx::query_as::<_, UserRow>(
            "SELECT uuid, first_name, last_name, email, password FROM users",
        );
        let rows = self.runtime.block_on(query.fetch_all(&mut self.conn))?;
        Ok(rows.into_iter().map(into_user).collect())
    }

    fn ping(&mut self) -> Result<(), DriverError> {
        self.runtime.block_on(self.conn.ping())?;
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<(), DriverError> {
        let PgSession { runtime, conn } = *self;
        runtime.block_on(conn.close())?;
        Ok(())
    }
}
