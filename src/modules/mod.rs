pub mod auth;
pub mod health;
pub mod schools;
pub mod students;
