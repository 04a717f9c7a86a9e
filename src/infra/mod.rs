//! Infrastructure: config file, database sessions, backends.

pub mod config;
pub mod db;
pub mod postgres;
pub mod sqlite;

pub use config::{ConfigStore, DatabaseConfig};
pub(crate) use db::Access;
pub use db::{open_session, RecordStore, Session, Target, ADMIN_DATABASE, APP_DATABASE};
