//! `im config ...` handlers.

use crate::app::{database_destroy, database_init, database_ping};
use crate::commands::{print_json, prompt, render, ConfigCommand};
use crate::domain::Engine;
use crate::error::AppError;
use crate::infra::{DatabaseConfig, RecordStore};

pub fn dispatch(store: &RecordStore, cmd: ConfigCommand) -> Result<(), AppError> {
    match cmd {
        ConfigCommand::Init {
            host,
            port,
            username,
            engine,
        } => cmd_config_init(store, host, port, username, engine),
        ConfigCommand::Read {
            show_password,
            json,
        } => cmd_config_read(store, show_password, json),
        ConfigCommand::Delete { yes } => cmd_config_delete(store, yes),
        ConfigCommand::TestConnection => cmd_config_test_connection(store),
    }
}

pub fn cmd_config_init(
    store: &RecordStore,
    host: Option<String>,
    port: Option<String>,
    username: Option<String>,
    engine: Engine,
) -> Result<(), AppError> {
    let host_label = match engine {
        Engine::Postgres => "Host",
        Engine::Sqlite => "Data directory",
    };
    let host = prompt::text_or(host, host_label)?;
    let port = prompt::text_or(port, "Port")?;
    let username = prompt::text_or(username, "Username")?;
    let password = prompt::password("Password", true)?;

    let config = DatabaseConfig::new(host, port, username, password).with_engine(engine);
    store.config().init()?;
    store.config().save(&config)?;
    println!("Config saved to {}", store.config().path().display());

    database_init(store)?;
    println!("Database initialized.");
    Ok(())
}

pub fn cmd_config_read(
    store: &RecordStore,
    show_password: bool,
    json: bool,
) -> Result<(), AppError> {
    let config = store.config().read()?;
    if json {
        return print_json(&config);
    }
    print!("{}", render::database_config(&config, show_password));
    Ok(())
}

pub fn cmd_config_delete(store: &RecordStore, yes: bool) -> Result<(), AppError> {
    if !store.config().exists() {
        println!("Config file already deleted.");
        return Ok(());
    }
    if !yes && !prompt::confirm("Are you sure you want to DELETE the database config?")? {
        return Err(AppError::Aborted);
    }

    // Keep the config if the drop fails, so the operator can retry.
    database_destroy(store)?;
    store.config().delete()?;
    println!("Config file has been successfully deleted.");
    Ok(())
}

pub fn cmd_config_test_connection(store: &RecordStore) -> Result<(), AppError> {
    match database_ping(store) {
        Ok(()) => {
            println!("Connection successful.");
            Ok(())
        }
        Err(e) => {
            println!("Connection failed.");
            Err(e)
        }
    }
}
