//! Domain types: backend engines, user records, password digests.

pub mod digest;
pub mod engine;
pub mod user;

pub use digest::{PasswordHasher, Sha256Hasher};
pub use engine::Engine;
pub use user::User;
