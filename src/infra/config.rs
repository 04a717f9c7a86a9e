//! INI-backed store for the database connection settings.
//!
//! The file lives at `<platform config dir>/im/config.ini` and holds a single
//! `[Database]` section:
//!
//! ```ini
//! [Database]
//! host=localhost
//! port=5432
//! username=postgres
//! password=secret
//! ```
//!
//! An `engine` key is added only when the backend is not PostgreSQL.

use crate::domain::Engine;
use crate::error::AppError;
use ini::{EscapePolicy, Ini, ParseOption};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "im";
pub const CONFIG_FILE_NAME: &str = "config.ini";
const SECTION: &str = "Database";

/// Connection credentials. The password is kept in clear text.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub engine: Engine,
}

impl DatabaseConfig {
    pub fn new(
        host: impl Into<String>,
        port: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            username: username.into(),
            password: password.into(),
            engine: Engine::default(),
        }
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("engine", &self.engine)
            .finish()
    }
}

/// The INI parser trims values, so surrounding whitespace cannot be stored
/// and read back. The value itself is left out of the message.
fn check_value(key: &str, value: &str) -> Result<(), AppError> {
    if value.trim() != value {
        return Err(AppError::Validation(format!(
            "{} must not start or end with whitespace",
            key
        )));
    }
    Ok(())
}

/// Owns the config directory and the file inside it.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
    file: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let file = dir.join(CONFIG_FILE_NAME);
        Self { dir, file }
    }

    /// Store under the platform config directory, e.g. `~/.config/im`.
    pub fn from_platform() -> Result<Self, AppError> {
        let base = dirs::config_dir().ok_or_else(|| {
            AppError::Directory("could not determine platform config directory".into())
        })?;
        Ok(Self::new(base.join(APP_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    pub fn exists(&self) -> bool {
        self.file.is_file()
    }

    /// Ensure the directory and an (empty) config file exist. Existing
    /// content is left untouched.
    pub fn init(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::Directory(format!("{}: {}", self.dir.display(), e)))?;
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file)
            .map_err(|e| AppError::File(format!("{}: {}", self.file.display(), e)))?;
        log::debug!("Config initialized at {:?}", self.file);
        Ok(())
    }

    /// Replace the whole credential set. The new content is written to a
    /// sibling file and renamed over the config file. Values with leading or
    /// trailing whitespace are rejected before anything is written.
    pub fn save(&self, config: &DatabaseConfig) -> Result<(), AppError> {
        for (key, value) in [
            ("host", &config.host),
            ("port", &config.port),
            ("username", &config.username),
            ("password", &config.password),
        ] {
            check_value(key, value)?;
        }

        let mut ini = Ini::new();
        ini.with_section(Some(SECTION))
            .set("host", config.host.as_str())
            .set("port", config.port.as_str())
            .set("username", config.username.as_str())
            .set("password", config.password.as_str());
        if config.engine != Engine::default() {
            ini.with_section(Some(SECTION))
                .set("engine", config.engine.as_str());
        }

        let mut buf = Vec::new();
        ini.write_to_policy(&mut buf, EscapePolicy::Reserved)
            .map_err(|e| AppError::File(e.to_string()))?;

        let tmp = self.file.with_extension("ini.tmp");
        fs::write(&tmp, &buf)
            .map_err(|e| AppError::File(format!("{}: {}", tmp.display(), e)))?;
        if let Err(e) = fs::rename(&tmp, &self.file) {
            let _ = fs::remove_file(&tmp);
            return Err(AppError::File(format!("{}: {}", self.file.display(), e)));
        }

        log::info!("Config saved to {:?}", self.file);
        Ok(())
    }

    pub fn read(&self) -> Result<DatabaseConfig, AppError> {
        if !self.exists() {
            return Err(AppError::Read(format!(
                "config file not found at {}",
                self.file.display()
            )));
        }
        let opt = ParseOption {
            enabled_quote: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_file_opt(&self.file, opt)?;
        let section = ini
            .section(Some(SECTION))
            .ok_or_else(|| AppError::Read(format!("missing [{}] section", SECTION)))?;

        let field = |key: &str| {
            section
                .get(key)
                .map(str::to_string)
                .ok_or_else(|| AppError::Read(format!("missing \"{}\" in [{}]", key, SECTION)))
        };
        let engine = match section.get("engine") {
            None => Engine::default(),
            Some(name) => Engine::from_str(name)
                .ok_or_else(|| AppError::Read(format!("unknown engine \"{}\"", name)))?,
        };

        Ok(DatabaseConfig {
            host: field("host")?,
            port: field("port")?,
            username: field("username")?,
            password: field("password")?,
            engine,
        })
    }

    /// Remove the config file, then its directory. A missing file is an error;
    /// callers check [`ConfigStore::exists`] first.
    pub fn delete(&self) -> Result<(), AppError> {
        fs::remove_file(&self.file)
            .map_err(|e| AppError::File(format!("{}: {}", self.file.display(), e)))?;
        fs::remove_dir(&self.dir)
            .map_err(|e| AppError::File(format!("{}: {}", self.dir.display(), e)))?;
        log::info!("Config removed from {:?}", self.dir);
        Ok(())
    }
}
