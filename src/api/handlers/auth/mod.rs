//! Authentication building blocks.
//!
//! A successful login issues a signed, time-limited token carrying only the
//! user id; the token travels back on every request in the `Authentication`
//! cookie or an `Authorization: Bearer` header. There is no server-side
//! token registry; a token is valid until its embedded expiry.

pub mod cookie;
pub mod password;
pub mod principal;
pub mod state;
pub(crate) mod storage;
pub mod token;

pub use state::{AuthConfig, AuthState};
pub use token::{TokenIssuer, TokenPayload};
