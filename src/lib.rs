//! # Genix Hub API
//!
//! Registration and authentication backend for schools and their students,
//! built with Axum.
//!
//! ## Layout
//!
//! ```text
//! src/
//! ├── middleware/      # Bearer authentication, role guard, error details
//! ├── modules/         # Feature modules
//! │   ├── auth/        # Refresh token rotation, logout
//! │   ├── schools/     # School registration, login, listing
//! │   ├── students/    # Student registration, login
//! │   └── health/      # Liveness
//! ├── docs.rs          # OpenAPI document
//! ├── logging.rs       # Subscriber setup and request logging
//! ├── router.rs        # Route tree and global layers
//! ├── state.rs         # Shared application state
//! └── validator.rs     # Validating JSON and query extractors
//! ```
//!
//! Each feature module has a `controller.rs` (handlers), `service.rs`
//! (business logic) and `router.rs`. Domain types live in
//! [`genixhub_models`], storage in [`genixhub_db`].
//!
//! ## Authentication
//!
//! Registration and login return a token pair:
//!
//! - **Access token**: short-lived (default 15 minutes), sent as
//!   `Authorization: Bearer <token>`
//! - **Refresh token**: long-lived (default 7 days). Only the most recently
//!   issued one is stored per account, so each refresh or login invalidates
//!   the previous refresh token.
//!
//! ## API documentation
//!
//! - Swagger UI: `/swagger-ui`
//! - Scalar: `/scalar`

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use genixhub_auth;
pub use genixhub_config;
pub use genixhub_core;
pub use genixhub_db;
pub use genixhub_models;
