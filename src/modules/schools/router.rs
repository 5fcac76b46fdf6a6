use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{list_schools, login_school, register_school};

pub fn init_schools_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_schools))
        .route("/register", post(register_school))
        .route("/login", post(login_school))
}
