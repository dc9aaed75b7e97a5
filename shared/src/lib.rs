//! Shared utilities and common types for the SchoolMgmt server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Common response type definitions

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AuthConfig, DatabaseConfig, Environment, ServerConfig};
pub use errors::{error_codes, ErrorResponse};
pub use types::MessageResponse;
