use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Router, middleware};
use genixhub::middleware::auth::AuthUser;
use genixhub::middleware::role::{check_any_role, require_school, require_student};
use genixhub::state::AppState;
use genixhub_auth::{Claims, Identity, Role, TokenService};
use genixhub_config::{CorsConfig, JwtConfig, ServerConfig};
use genixhub_core::ErrorKind;
use genixhub_db::{AccountStore, MemoryAccountStore};
use genixhub_models::NewSchool;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

fn create_test_auth_user(role: Role) -> AuthUser {
    AuthUser(Claims {
        user_id: Uuid::nil(),
        role,
        school_id: None,
        exp: 9999999999,
        iat: 1234567890,
    })
}

#[test]
fn test_check_any_role_single_match() {
    let auth_user = create_test_auth_user(Role::School);
    assert!(check_any_role(&auth_user, &[Role::School]).is_ok());
}

#[test]
fn test_check_any_role_multiple_match() {
    let allowed = [Role::School, Role::Student];
    assert!(check_any_role(&create_test_auth_user(Role::School), &allowed).is_ok());
    assert!(check_any_role(&create_test_auth_user(Role::Student), &allowed).is_ok());
}

#[test]
fn test_check_any_role_no_match() {
    let err = check_any_role(&create_test_auth_user(Role::Student), &[Role::School]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert_eq!(err.message, "Access denied");
}

async fn guarded_app() -> (Router, TokenService, Uuid) {
    let store = Arc::new(MemoryAccountStore::new());
    let school = store
        .insert_school(NewSchool {
            name: "Delhi Public School".to_string(),
            password_hash: "unused".to_string(),
            address: "Mathura Road".to_string(),
            city: "New Delhi".to_string(),
            state: "Delhi".to_string(),
            pincode: "110003".to_string(),
            principal_name: "Anita Sharma".to_string(),
            contact_email: "office@dps.edu.in".to_string(),
            contact_phone: "9876543210".to_string(),
        })
        .await
        .unwrap();

    let jwt_config = JwtConfig::default();
    let state = AppState::new(
        store,
        &jwt_config,
        ServerConfig::default(),
        CorsConfig::from_list(""),
    );

    let router = Router::new()
        .route(
            "/school-only",
            get(|user: AuthUser| async move { user.user_id().to_string() })
                .route_layer(middleware::from_fn_with_state(state.clone(), require_school)),
        )
        .route(
            "/student-only",
            get(|| async { "ok" })
                .route_layer(middleware::from_fn_with_state(state.clone(), require_student)),
        )
        .with_state(state);

    (router, TokenService::new(&jwt_config), school.id)
}

async fn status_for(router: &Router, uri: &str, token: Option<&str>) -> StatusCode {
    let mut request = Request::builder().uri(uri);
    if let Some(token) = token {
        request = request.header("authorization", format!("Bearer {}", token));
    }
    router
        .clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_role_layers() {
    let (router, tokens, school_id) = guarded_app().await;
    let school_token = tokens.issue(&Identity::school(school_id)).unwrap().access_token;

    assert_eq!(
        status_for(&router, "/school-only", Some(&school_token)).await,
        StatusCode::OK
    );
    assert_eq!(
        status_for(&router, "/student-only", Some(&school_token)).await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        status_for(&router, "/school-only", None).await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_unknown_account_is_unauthorized_not_forbidden() {
    let (router, tokens, _) = guarded_app().await;
    let ghost = tokens
        .issue(&Identity::student(Uuid::new_v4(), Uuid::new_v4()))
        .unwrap()
        .access_token;

    assert_eq!(
        status_for(&router, "/student-only", Some(&ghost)).await,
        StatusCode::UNAUTHORIZED
    );
}
