//! Stable error codes for the command line.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config directory error: {0}")]
    Directory(String),

    #[error("Config file error: {0}")]
    File(String),

    #[error("Read error: {0}")]
    Read(String),

    #[error("Write error: {0}")]
    Write(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Aborted")]
    Aborted,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Directory(_) => "DIR_ERROR",
            Self::File(_) => "FILE_ERROR",
            Self::Read(_) => "DB_READ_ERROR",
            Self::Write(_) => "DB_WRITE_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Aborted => "ABORTED",
        }
    }

    /// Process exit status for this error. Zero is reserved for success.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Directory(_) => 1,
            Self::File(_) => 2,
            Self::Read(_) => 3,
            Self::Write(_) => 4,
            Self::NotFound(_) => 5,
            Self::Validation(_) => 6,
            Self::Aborted => 7,
        }
    }

    pub fn to_serde(&self) -> AppErrorDto {
        AppErrorDto {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

impl From<ini::Error> for AppError {
    fn from(e: ini::Error) -> Self {
        AppError::Read(e.to_string())
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_serde().serialize(serializer)
    }
}

#[derive(Debug, Serialize)]
pub struct AppErrorDto {
    pub code: String,
    pub message: String,
}

/// Failures raised by a database backend. The record store decides whether
/// they surface as [`AppError::Read`] or [`AppError::Write`].
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("postgres: {0}")]
    Postgres(#[from] sqlx::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("database \"{0}\" already exists")]
    DatabaseExists(String),

    #[error("database \"{0}\" does not exist")]
    DatabaseMissing(String),

    #[error("data directory {0} does not exist")]
    DataDirMissing(String),

    #[error("invalid port \"{0}\"")]
    InvalidPort(String),
}
