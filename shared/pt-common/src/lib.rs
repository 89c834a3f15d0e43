//! Pointage Common Library
//!
//! Types shared by the authorization engine and the API client.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
