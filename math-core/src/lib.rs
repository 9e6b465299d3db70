//! Math Core - arithmetic, authentication and persistence for the secure math service
//!
//! This crate holds everything that does not depend on HTTP: the four
//! operations, the static bearer-token gate and the SQLite operation log.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod error;
pub mod operation;
pub mod record;
pub mod store;

pub use auth::{parse_bearer, AuthError, TokenGate, VALID_TOKEN};
pub use error::{MathError, Result};
pub use operation::Operation;
pub use record::OperationRecord;
pub use store::{OperationStore, StoreConfig};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
