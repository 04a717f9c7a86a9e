//! Application use cases.

mod database;
mod user;

pub use database::{database_destroy, database_init, database_ping};
pub use user::{
    user_add, user_delete, user_get, user_list, user_update, UserCreateReq, UserDto,
    UserUpdateReq,
};
