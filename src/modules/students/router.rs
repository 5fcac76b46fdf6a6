use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{login_student, register_student};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_student))
        .route("/login", post(login_student))
}
