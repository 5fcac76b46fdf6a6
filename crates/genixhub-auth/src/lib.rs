//! # Genix Hub Auth
//!
//! Authentication types and JWT utilities for the Genix Hub API.
//!
//! This crate provides:
//!
//! - [`role`]: the two account roles, school and student
//! - [`claims`]: the identity carried by tokens and the JWT claim structures
//! - [`jwt`]: [`TokenService`], which issues and verifies token pairs
//!
//! # Token Types
//!
//! - **Access Token** ([`Claims`]): short-lived, signed with `JWT_SECRET`
//! - **Refresh Token** ([`RefreshTokenClaims`]): long-lived, signed with
//!   `JWT_REFRESH_SECRET`, carries a random `jti`
//!
//! Both tokens of a pair carry the same [`Identity`].
//!
//! # Example
//!
//! ```ignore
//! use genixhub_auth::{Identity, TokenService};
//! use genixhub_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env());
//! let pair = tokens.issue(&Identity::school(school_id))?;
//! let claims = tokens.verify_access(&pair.access_token)?;
//! assert_eq!(claims.user_id, school_id);
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

// Re-export commonly used types at crate root
pub use claims::{Claims, Identity, RefreshTokenClaims};
pub use jwt::{TokenPair, TokenService, extract_bearer};
pub use role::Role;
