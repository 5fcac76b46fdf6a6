mod common;

use axum::http::StatusCode;
use common::{PASSWORD, TestApp, field_errors, school_body};
use genixhub_auth::{Role, TokenService};
use genixhub_core::verify_password;
use genixhub_db::AccountStore;
use serde_json::json;

#[tokio::test]
async fn test_register_school_success() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/v1/schools/register",
            school_body("Delhi Public School", "Office@DPS.edu.in"),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Registration successful");

    let school = &body["data"]["school"];
    assert_eq!(school["name"], "Delhi Public School");
    assert_eq!(school["city"], "New Delhi");
    assert_eq!(school["principalName"], "Anita Sharma");
    assert_eq!(school["contactEmail"], "office@dps.edu.in");
    assert!(school.get("password").is_none());
    assert!(school.get("passwordHash").is_none());
    assert!(school.get("refreshToken").is_none());

    let tokens = &body["data"]["tokens"];
    assert!(tokens["accessToken"].as_str().is_some());
    assert!(tokens["refreshToken"].as_str().is_some());
}

#[tokio::test]
async fn test_register_delhi_public_school() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/v1/schools/register",
            json!({
                "name": "Delhi Public School",
                "password": "password123",
                "confirmPassword": "password123",
                "address": "123 School Street",
                "city": "New Delhi",
                "state": "Delhi",
                "pincode": "110001",
                "principalName": "Dr. Rajesh Kumar",
                "contactEmail": "principal@dpsdelhi.edu.in",
                "contactPhone": "9876543210"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["school"]["name"], "Delhi Public School");
    assert_eq!(body["data"]["school"]["principalName"], "Dr. Rajesh Kumar");
    assert!(body["data"]["tokens"]["accessToken"].as_str().is_some());
    assert!(body["data"]["tokens"]["refreshToken"].as_str().is_some());
}

#[tokio::test]
async fn test_register_school_stores_hash_and_claims() {
    let app = TestApp::new();
    let data = app.register_school("Delhi Public School", "office@dps.edu.in").await;
    let id = common::id_of(&data["school"]);

    let stored = app.store.find_school_by_id(id).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, PASSWORD);
    assert!(verify_password(PASSWORD, &stored.password_hash).unwrap());

    let claims = TokenService::new(&app.jwt_config)
        .verify_access(data["tokens"]["accessToken"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.user_id, id);
    assert_eq!(claims.role, Role::School);
    assert_eq!(claims.school_id, None);
}

#[tokio::test]
async fn test_register_school_password_mismatch() {
    let app = TestApp::new();
    let mut body = school_body("Delhi Public School", "office@dps.edu.in");
    body["confirmPassword"] = json!("different1");

    let (status, body) = app.post("/api/v1/schools/register", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["field"] == "confirmPassword" && e["message"] == "Passwords do not match"));
}

#[tokio::test]
async fn test_register_school_field_rules() {
    let app = TestApp::new();
    let mut body = school_body("DP", "not-an-email");
    body["pincode"] = json!("011001");
    body["state"] = json!("Atlantis");
    body["contactPhone"] = json!("12345");
    body["password"] = json!("123");
    body["confirmPassword"] = json!("123");

    let (status, body) = app.post("/api/v1/schools/register", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = field_errors(&body);
    for field in ["name", "contactEmail", "pincode", "state", "contactPhone", "password"] {
        assert!(fields.contains(&field.to_string()), "expected error on {}: {:?}", field, fields);
    }
}

#[tokio::test]
async fn test_register_school_missing_field() {
    let app = TestApp::new();
    let mut body = school_body("Delhi Public School", "office@dps.edu.in");
    body.as_object_mut().unwrap().remove("city");

    let (status, body) = app.post("/api/v1/schools/register", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"][0]["field"], "city");
    assert_eq!(body["data"][0]["message"], "city is required");
}

#[tokio::test]
async fn test_register_school_duplicates() {
    let app = TestApp::new();
    app.register_school("Delhi Public School", "office@dps.edu.in").await;

    let (status, body) = app
        .post(
            "/api/v1/schools/register",
            school_body("Delhi Public School", "other@dps.edu.in"),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Name already exists");

    let (status, body) = app
        .post(
            "/api/v1/schools/register",
            school_body("Modern School", "office@dps.edu.in"),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Contact email already exists");
}

#[tokio::test]
async fn test_login_school_success() {
    let app = TestApp::new();
    let registered = app.register_school("Delhi Public School", "office@dps.edu.in").await;

    let (status, body) = app
        .post(
            "/api/v1/schools/login",
            json!({"name": "Delhi Public School", "password": PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["school"]["id"], registered["school"]["id"]);
    assert_ne!(
        body["data"]["tokens"]["refreshToken"],
        registered["tokens"]["refreshToken"]
    );
}

#[tokio::test]
async fn test_login_school_failures_look_identical() {
    let app = TestApp::new();
    app.register_school("Delhi Public School", "office@dps.edu.in").await;

    let wrong_password = app
        .post(
            "/api/v1/schools/login",
            json!({"name": "Delhi Public School", "password": "nottheone"}),
        )
        .await;
    let unknown_name = app
        .post(
            "/api/v1/schools/login",
            json!({"name": "Nobody School", "password": PASSWORD}),
        )
        .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_name);
    assert_eq!(wrong_password.1, json!({"message": "Invalid credentials"}));
}

#[tokio::test]
async fn test_login_school_requires_fields() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/api/v1/schools/login", json!({"name": "", "password": ""}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_errors(&body), vec!["name", "password"]);
}

#[tokio::test]
async fn test_list_schools_paginated() {
    let app = TestApp::new();
    for (name, email) in [
        ("Springdales School", "s@x.in"),
        ("Amity International", "a@x.in"),
        ("Modern School", "m@x.in"),
    ] {
        app.register_school(name, email).await;
    }

    let (status, body) = app.get("/api/v1/schools?page=1&limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data fetched successfully");
    let names: Vec<&str> = body["data"]["schools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Amity International", "Modern School"]);
    assert_eq!(
        body["pagination"],
        json!({"page": 1, "limit": 2, "total": 3, "totalPages": 2})
    );

    let first = &body["data"]["schools"][0];
    assert!(first.get("principalName").is_some());
    assert!(first.get("contactEmail").is_none());
}

#[tokio::test]
async fn test_list_schools_defaults_and_bounds() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/v1/schools").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"schools": []}));
    assert_eq!(
        body["pagination"],
        json!({"page": 1, "limit": 10, "total": 0, "totalPages": 0})
    );

    let (status, body) = app.get("/api/v1/schools?limit=101").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"][0]["field"], "limit");

    let (status, _) = app.get("/api/v1/schools?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.get("/api/v1/schools?page=1000001").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"][0]["field"], "page");

    let (status, body) = app.get("/api/v1/schools?page=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"][0]["field"], "query");
}

#[tokio::test]
async fn test_list_schools_page_overflow_is_rejected() {
    let app = TestApp::new();
    app.register_school("Delhi Public School", "office@dps.edu.in").await;

    let (status, body) = app
        .get("/api/v1/schools?page=9223372036854775807&limit=100")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(
        body["data"],
        json!([{"field": "page", "message": "Page must be between 1 and 1000000"}])
    );
}

#[tokio::test]
async fn test_deleted_school_token_rejected() {
    let app = TestApp::new();
    let data = app.register_school("Delhi Public School", "office@dps.edu.in").await;
    let id = common::id_of(&data["school"]);

    assert!(app.store.delete_account(Role::School, id).await.unwrap());

    let (status, body) = app
        .request(
            "POST",
            "/api/v1/auth/logout",
            None,
            data["tokens"]["accessToken"].as_str(),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized access");
}
