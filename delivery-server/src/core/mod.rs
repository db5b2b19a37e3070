//! Core module - configuration and error definitions
//!
//! - [`Config`] - server configuration
//! - [`AppError`] / [`AppResult`] - application error type and result alias

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{AppError, AppResult};
