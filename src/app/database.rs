//! Database lifecycle use cases.

use crate::error::{AppError, DriverError};
use crate::infra::{Access, RecordStore, Target, APP_DATABASE};

/// Create the application database and the `users` table. An existing
/// database is reused, so this can run more than once.
pub fn database_init(store: &RecordStore) -> Result<(), AppError> {
    store.with_session(Target::Admin, Access::Write, |s| {
        match s.create_database(APP_DATABASE) {
            Err(DriverError::DatabaseExists(name)) => {
                log::info!("Database {} already exists, reusing it", name);
                Ok(())
            }
            other => other,
        }
    })?;
    store.with_session(Target::App, Access::Write, |s| s.create_users_table())
}

/// Drop the application database. Runs on the admin database, since a
/// database cannot drop itself while connected to it.
pub fn database_destroy(store: &RecordStore) -> Result<(), AppError> {
    store.with_session(Target::Admin, Access::Write, |s| {
        s.drop_database(APP_DATABASE)
    })
}

/// Open an admin session and check the server answers.
pub fn database_ping(store: &RecordStore) -> Result<(), AppError> {
    store.with_session(Target::Admin, Access::Read, |s| s.ping())
}
