//! `im users ...` handlers.

use crate::app::{
    user_add, user_delete, user_get, user_list, user_update, UserCreateReq, UserUpdateReq,
};
use crate::commands::{print_json, prompt, render, UsersCommand};
use crate::error::AppError;
use crate::infra::RecordStore;

pub fn dispatch(store: &RecordStore, cmd: UsersCommand) -> Result<(), AppError> {
    match cmd {
        UsersCommand::Add {
            first_name,
            last_name,
            email,
        } => cmd_users_add(store, first_name, last_name, email),
        UsersCommand::Update {
            id,
            first_name,
            last_name,
            email,
        } => cmd_users_update(store, id, first_name, last_name, email),
        UsersCommand::Delete { id } => cmd_users_delete(store, id),
        UsersCommand::Get { id, json } => cmd_users_get(store, id, json),
        UsersCommand::List { json } => cmd_users_list(store, json),
    }
}

pub fn cmd_users_add(
    store: &RecordStore,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
) -> Result<(), AppError> {
    let req = UserCreateReq {
        first_name: prompt::text_or(first_name, "First name")?,
        last_name: prompt::text_or(last_name, "Last name")?,
        email: prompt::text_or(email, "Email")?,
        password: prompt::password("Password", true)?,
    };
    let user = user_add(store, req)?;
    println!("User {} has been successfully registered.", user.id);
    Ok(())
}

pub fn cmd_users_update(
    store: &RecordStore,
    id: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
) -> Result<(), AppError> {
    let req = UserUpdateReq {
        id: prompt::text_or(id, "Id")?,
        first_name: prompt::text_or(first_name, "First name")?,
        last_name: prompt::text_or(last_name, "Last name")?,
        email: prompt::text_or(email, "Email")?,
        password: prompt::password("Password", true)?,
    };
    let user = user_update(store, req)?;
    println!("User {} has been successfully updated.", user.id);
    Ok(())
}

pub fn cmd_users_delete(store: &RecordStore, id: Option<String>) -> Result<(), AppError> {
    let id = prompt::text_or(id, "Id")?;
    user_delete(store, &id)?;
    println!("User has been successfully deleted.");
    Ok(())
}

pub fn cmd_users_get(store: &RecordStore, id: Option<String>, json: bool) -> Result<(), AppError> {
    let id = prompt::text_or(id, "Id")?;
    let user = user_get(store, &id)?;
    if json {
        print_json(&user)
    } else {
        print!("{}", render::users_table(std::slice::from_ref(&user)));
        Ok(())
    }
}

pub fn cmd_users_list(store: &RecordStore, json: bool) -> Result<(), AppError> {
    let users = user_list(store)?;
    if json {
        print_json(&users)
    } else {
        print!("{}", render::users_table(&users));
        Ok(())
    }
}
