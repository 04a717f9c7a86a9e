//! User use cases.

use crate::domain::User;
use crate::error::AppError;
use crate::infra::{Access, RecordStore, Target};
use serde::Serialize;
use uuid::Uuid;

/// Input for a new user. The password is plaintext until digested.
pub struct UserCreateReq {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Full replacement of every mutable field of a user.
pub struct UserUpdateReq {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Password digest.
    pub password: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_string(),
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            password: u.password,
        }
    }
}

/// A string that is not a UUID cannot name any stored user.
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim()).map_err(|_| {
        log::debug!("Rejecting malformed user id {:?}", id);
        AppError::NotFound(format!("user {}", id))
    })
}

pub fn user_add(store: &RecordStore, req: UserCreateReq) -> Result<UserDto, AppError> {
    let user = User {
        id: Uuid::new_v4(),
        password: store.hasher().digest(&req.password),
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
    };

    store.with_session(Target::App, Access::Write, |s| s.insert_user(&user))?;
    log::info!("User {} registered", user.id);
    Ok(user.into())
}

pub fn user_update(store: &RecordStore, req: UserUpdateReq) -> Result<UserDto, AppError> {
    let id = parse_id(&req.id)?;
    let user = User {
        id,
        password: store.hasher().digest(&req.password),
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
    };

    let changed = store.with_session(Target::App, Access::Write, |s| s.update_user(&user))?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("user {}", id)));
    }
    log::info!("User {} updated", id);
    Ok(user.into())
}

pub fn user_delete(store: &RecordStore, id: &str) -> Result<(), AppError> {
    let id = parse_id(id)?;
    let removed = store.with_session(Target::App, Access::Write, |s| s.delete_user(&id))?;
    if removed == 0 {
        return Err(AppError::NotFound(format!("user {}", id)));
    }
    log::info!("User {} deleted", id);
    Ok(())
}

pub fn user_get(store: &RecordStore, id: &str) -> Result<UserDto, AppError> {
    let id = parse_id(id)?;
    store
        .with_session(Target::App, Access::Read, |s| s.find_user(&id))?
        .map(UserDto::from)
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
}

/// All users in storage order, which is not guaranteed to be stable.
pub fn user_list(store: &RecordStore) -> Result<Vec<UserDto>, AppError> {
    let users = store.with_session(Target::App, Access::Read, |s| s.list_users())?;
    log::debug!("Listed {} users", users.len());
    Ok(users.into_iter().map(UserDto::from).collect())
}
