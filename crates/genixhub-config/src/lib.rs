//! # Genix Hub Config
//!
//! Configuration types for the Genix Hub API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: access/refresh token secrets and lifetimes
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: bind address, environment, storage backend and logging
//!
//! Call `dotenvy::dotenv()` before loading so `.env` values are visible.
//!
//! # Example
//!
//! ```ignore
//! use genixhub_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::{JwtConfig, parse_duration_secs};
pub use server::{Environment, LogFormat, ServerConfig, StorageBackend};
