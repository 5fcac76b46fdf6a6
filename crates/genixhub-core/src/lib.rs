//! # Genix Hub Core
//!
//! Core types, errors, and utilities for the Genix Hub API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error kinds with HTTP response conversion
//! - [`response`]: The `{message, data, pagination}` success envelope
//! - [`pagination`]: Page/limit query parameters and response metadata
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use genixhub_core::errors::AppError;
//! use genixhub_core::pagination::{PaginationMeta, PaginationParams};
//! use genixhub_core::password::{hash_password, verify_password};
//!
//! // Create an error
//! let error = AppError::conflict("Name already exists");
//!
//! // Hash a password
//! let hash = hash_password("secure_password")?;
//!
//! // Use pagination
//! let params = PaginationParams::default();
//! let meta = PaginationMeta::new(params.page(), params.limit(), 42);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod response;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorDetail, ErrorKind};
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{Password, hash_password, verify_password};
pub use response::ApiResponse;
