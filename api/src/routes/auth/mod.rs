//! Authentication route handlers
//!
//! - `POST /api/register` - create a school with its admin account
//! - `POST /api/login` - email/password login
//! - `POST /api/refreshToken` - rotate a refresh token
//! - `POST /api/revokeRefreshTokens` - bulk revocation (gated)

pub mod login;
pub mod refresh;
pub mod register;
pub mod revoke;

pub use login::login;
pub use refresh::refresh_token;
pub use register::register;
pub use revoke::revoke_refresh_tokens;
