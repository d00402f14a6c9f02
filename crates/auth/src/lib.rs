//! `shopdesk-auth`: identity verification and role-based authorization.
//!
//! This crate is intentionally decoupled from HTTP and storage: the API layer
//! extracts a bearer token, this crate turns it into a [`Principal`] and decides
//! whether that principal may perform an operation.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{authorize, permissions_for_role, AuthzError};
pub use claims::{validate_claims, JwtClaims, TokenValidationError};
pub use jwt::{Hs256JwtValidator, JwtValidator};
pub use permissions::Permission;
pub use principal::Principal;
pub use roles::Role;
