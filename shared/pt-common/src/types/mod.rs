//! Shared domain types.

mod role;
mod user;

pub use role::Role;
pub use user::{CurrentUser, UserStatus};
