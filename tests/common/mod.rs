#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use genixhub::router::init_router;
use genixhub::state::AppState;
use genixhub_config::{CorsConfig, Environment, JwtConfig, ServerConfig, StorageBackend};
use genixhub_db::MemoryAccountStore;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "secret123";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryAccountStore>,
    pub jwt_config: JwtConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_environment(Environment::Test)
    }

    pub fn with_environment(environment: Environment) -> Self {
        let store = Arc::new(MemoryAccountStore::new());
        let jwt_config = JwtConfig::default();
        let server_config = ServerConfig {
            environment,
            storage: StorageBackend::Memory,
            ..ServerConfig::default()
        };
        let state = AppState::new(
            store.clone(),
            &jwt_config,
            server_config,
            CorsConfig::from_list("http://localhost:3000"),
        );

        Self {
            router: init_router(state),
            store,
            jwt_config,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_string(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body), None).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None, None).await
    }

    /// Registers a school and returns the response `data`.
    pub async fn register_school(&self, name: &str, email: &str) -> Value {
        let (status, body) = self
            .post("/api/v1/schools/register", school_body(name, email))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"].clone()
    }

    /// Registers a student and returns the response `data`.
    pub async fn register_student(&self, body: Value) -> Value {
        let (status, body) = self.post("/api/v1/students/register", body).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"].clone()
    }
}

pub fn school_body(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "password": PASSWORD,
        "confirmPassword": PASSWORD,
        "address": "Mathura Road",
        "city": "New Delhi",
        "state": "Delhi",
        "pincode": "110003",
        "principalName": "Anita Sharma",
        "contactEmail": email,
        "contactPhone": "9876543210"
    })
}

pub fn student_body(school_id: &str, name: &str, roll_no: &str, mobile: &str, email: &str) -> Value {
    json!({
        "name": name,
        "password": PASSWORD,
        "confirmPassword": PASSWORD,
        "schoolId": school_id,
        "class": "10",
        "section": "a",
        "gender": "Male",
        "rollNo": roll_no,
        "mobile": mobile,
        "fatherName": "Rakesh Gupta",
        "motherName": "Sunita Gupta",
        "email": email,
        "dateOfBirth": "2010-04-15",
        "address": "12 Lodhi Colony, New Delhi"
    })
}

pub fn id_of(value: &Value) -> Uuid {
    value["id"].as_str().unwrap().parse().unwrap()
}

pub fn field_errors(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
