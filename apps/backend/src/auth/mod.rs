//! Identity tokens and credentials.

pub mod claims;
pub mod password;
pub mod token;

pub use claims::{Claims, IdentityClaim, UserRef};
pub use token::{TokenError, TokenService};
