//! # codehub-auth
//!
//! The Identity Verifier: validates a bearer credential and extracts a
//! stable user identity. Credential *issuance* lives in an external auth
//! service; this crate only verifies, plus a small encoder so tests and
//! tooling can mint tokens against the same secret.

pub mod jwt;

pub use jwt::claims::Claims;
pub use jwt::decoder::IdentityVerifier;
pub use jwt::encoder::JwtEncoder;
