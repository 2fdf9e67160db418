//! Token verification boundary.
//!
//! Issuing tokens is out of scope; this crate only checks HS256
//! signatures and expiry against an explicitly supplied secret and
//! surfaces the claims. It is intentionally decoupled from HTTP and
//! storage.

pub mod claims;
pub mod verify;

pub use claims::Claims;
pub use verify::{TokenError, verify_token};
