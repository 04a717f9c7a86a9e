//! Database sessions and the connection-per-call record store.
//!
//! Every operation reads the credentials from the [`ConfigStore`], opens a
//! fresh session, runs its statements and closes the session again, whether
//! the statements succeeded or not. Nothing is pooled.

use crate::domain::{Engine, PasswordHasher, Sha256Hasher, User};
use crate::error::{AppError, DriverError};
use crate::infra::config::{ConfigStore, DatabaseConfig};
use crate::infra::postgres::PgSession;
use crate::infra::sqlite::SqliteSession;
use uuid::Uuid;

/// Always-present database used to create and drop the application database.
pub const ADMIN_DATABASE: &str = "postgres";
pub const APP_DATABASE: &str = "identity_manager";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Admin,
    App,
}

impl Target {
    pub fn database(&self) -> &'static str {
        match self {
            Self::Admin => ADMIN_DATABASE,
            Self::App => APP_DATABASE,
        }
    }
}

/// Statements a backend session can run. Values are always bound, never
/// formatted into SQL.
pub trait Session {
    fn create_database(&mut self, name: &str) -> Result<(), DriverError>;
    fn drop_database(&mut self, name: &str) -> Result<(), DriverError>;
    fn create_users_table(&mut self) -> Result<(), DriverError>;
    fn insert_user(&mut self, user: &User) -> Result<(), DriverError>;
    /// Returns the number of rows changed.
    fn update_user(&mut self, user: &User) -> Result<u64, DriverError>;
    /// Returns the number of rows removed.
    fn delete_user(&mut self, id: &Uuid) -> Result<u64, DriverError>;
    fn find_user(&mut self, id: &Uuid) -> Result<Option<User>, DriverError>;
    fn list_users(&mut self) -> Result<Vec<User>, DriverError>;
    /// Check that the server behind this session is reachable.
    fn ping(&mut self) -> Result<(), DriverError>;
    fn close(self: Box<Self>) -> Result<(), DriverError>;
}

/// Connect to `target` with the backend selected by `config.engine`.
pub fn open_session(
    config: &DatabaseConfig,
    target: Target,
) -> Result<Box<dyn Session>, DriverError> {
    match config.engine {
        Engine::Postgres => Ok(Box::new(PgSession::connect(config, target.database())?)),
        Engine::Sqlite => Ok(Box::new(SqliteSession::connect(config, target)?)),
    }
}

/// Whether a failure is reported as a read or a write error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read,
    Write,
}

impl Access {
    fn error(self, e: DriverError) -> AppError {
        match self {
            Self::Read => AppError::Read(e.to_string()),
            Self::Write => AppError::Write(e.to_string()),
        }
    }
}

pub struct RecordStore {
    config: ConfigStore,
    hasher: Box<dyn PasswordHasher>,
}

impl RecordStore {
    pub fn new(config: ConfigStore) -> Self {
        Self::with_hasher(config, Sha256Hasher)
    }

    pub fn with_hasher(config: ConfigStore, hasher: impl PasswordHasher + 'static) -> Self {
        Self {
            config,
            hasher: Box::new(hasher),
        }
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn hasher(&self) -> &dyn PasswordHasher {
        self.hasher.as_ref()
    }

    /// Open a session on `target`, run `op`, and close the session on every
    /// exit path before mapping any failure according to `access`.
    pub(crate) fn with_session<T, F>(&self, target: Target, access: Access, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut dyn Session) -> Result<T, DriverError>,
    {
        let config = self.config.read()?;
        log::debug!(
            "Opening {} session to {}:{} database {}",
            config.engine,
            config.host,
            config.port,
            target.database()
        );
        let mut session = open_session(&config, target).map_err(|e| access.error(e))?;

        let result = op(session.as_mut());

        if let Err(e) = session.close() {
            log::warn!("Closing session to {} failed: {}", target.database(), e);
        } else {
            log::debug!("Closed session to {}", target.database());
        }
        result.map_err(|e| access.error(e))
    }
}
