//! Authentication module
//!
//! Bearer JWT verification. Tokens are issued by the identity provider;
//! the issuing half here exists for tests and local tooling.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtService};
pub use middleware::{bearer_token, AuthUser};
