//! Middleware modules for the API layer.

pub mod auth;
pub mod cors;
