pub mod auth;
pub mod error_details;
pub mod role;
