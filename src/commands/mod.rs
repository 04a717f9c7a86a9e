//! Command-line handlers (input/output boundary).

pub mod config;
pub mod prompt;
pub mod render;
pub mod users;

use crate::domain::Engine;
use crate::error::AppError;
use crate::infra::{ConfigStore, RecordStore};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Identity Manager - manage a user directory from the terminal
#[derive(Debug, Parser)]
#[command(name = "im", version, about)]
pub struct Cli {
    /// Directory holding config.ini (defaults to the platform config directory)
    #[arg(long, global = true, env = "IM_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the database connection config.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Manage user records.
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Save connection settings and initialize the database.
    Init {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<String>,
        #[arg(long)]
        username: Option<String>,
        /// Database engine: postgres or sqlite (host is then a directory)
        #[arg(long, default_value = "postgres", value_parser = parse_engine)]
        engine: Engine,
    },
    /// Read the database config.
    Read {
        /// Print the stored password instead of masking it
        #[arg(long)]
        show_password: bool,
        /// Print JSON instead of key/value lines (the password is never included)
        #[arg(long, conflicts_with = "show_password")]
        json: bool,
    },
    /// Drop the database and delete the config.
    Delete {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Test the database connection.
    TestConnection,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// Register a user.
    Add {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Update user data.
    Update {
        #[arg(long = "id", value_name = "ID")]
        id: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a user.
    Delete {
        #[arg(long = "id", value_name = "ID")]
        id: Option<String>,
    },
    /// Retrieve the data of a specific user.
    Get {
        #[arg(long = "id", value_name = "ID")]
        id: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List all users.
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn parse_engine(s: &str) -> Result<Engine, String> {
    Engine::from_str(s).ok_or_else(|| {
        let known: Vec<&str> = Engine::all().iter().map(Engine::as_str).collect();
        format!("unknown engine \"{}\" (expected one of: {})", s, known.join(", "))
    })
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Read(format!("serialize output failed: {}", e)))?;
    println!("{}", text);
    Ok(())
}

pub fn run(cli: Cli) -> Result<(), AppError> {
    let config_store = match cli.config_dir {
        Some(dir) => ConfigStore::new(dir),
        None => ConfigStore::from_platform()?,
    };
    log::debug!("Using config file {:?}", config_store.path());
    let store = RecordStore::new(config_store);

    match cli.command {
        Command::Config(cmd) => config::dispatch(&store, cmd),
        Command::Users(cmd) => users::dispatch(&store, cmd),
    }
}
