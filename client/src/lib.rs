//! Pointage API Client
//!
//! Session storage and the bearer/re-authentication policy shared by the web
//! console and the mobile app. Authorization decisions are not made here;
//! the signed-in user's [`pt_common::Role`] is handed to the engine.

pub mod config;
pub mod error;
pub mod session;
pub mod store;
pub mod transport;

pub use error::{ClientError, Result};
pub use session::{ApiClient, LoginRequest};
pub use config::ClientConfig;
pub use store::{FileStore, KeyringStore, MemoryStore, SessionKey, SessionStore, KEYRING_SERVICE};
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
