//! Authentication service module
//!
//! This module provides the account-facing authentication flows:
//! - School registration (school + admin account in one step)
//! - Login with email and password
//! - Refresh-token exchange with rotation-on-use
//! - Bulk refresh-token revocation

mod service;

#[cfg(test)]
mod tests;

pub use service::{AuthService, RegisterSchoolData};
