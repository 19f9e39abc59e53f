#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use ct_api::{router, AppState};
use ct_auth::hash_password;
use ct_core::config::PagingConfig;
use ct_db::{MemoryStore, Stores, UserStore};
use ct_services::Services;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TOKEN: &str = "test";
pub const OTHER_TOKEN: &str = "other";

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

/// Router over a fresh store holding user `test` (password `rahasia`,
/// token `test`) and user `other` (token `other`)
pub async fn spawn_app() -> TestApp {
    let store = MemoryStore::new();
    add_user(&store, "test", "rahasia", TOKEN).await;
    add_user(&store, "other", "rahasia", OTHER_TOKEN).await;

    let state = AppState::new(Services::new(
        Stores::memory(store.clone()),
        PagingConfig::default(),
    ));
    TestApp {
        router: router().with_state(state),
        store,
    }
}

async fn add_user(store: &MemoryStore, username: &str, password: &str, token: &str) {
    let hash = hash_password(password).unwrap();
    let user = store.insert(username, &hash, username).await.unwrap();
    store.set_token(user.id, Some(token)).await.unwrap();
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(TOKEN), None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(TOKEN), Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(TOKEN), Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(TOKEN), None).await
    }

    pub async fn create_test_contact(&self) -> Value {
        let (status, body) = self
            .post(
                "/api/contacts",
                json!({
                    "first_name": "test",
                    "last_name": "test",
                    "email": "test@test.com",
                    "phone": "080900000",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["data"].clone()
    }

    pub async fn create_many_test_contacts(&self) {
        for i in 0..15 {
            let (status, _) = self
                .post(
                    "/api/contacts",
                    json!({
                        "first_name": format!("test {i}"),
                        "last_name": format!("test {i}"),
                        "email": format!("test{i}@test.com"),
                        "phone": format!("0812345678{i}"),
                    }),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    pub async fn create_test_address(&self, contact_id: i64) -> Value {
        let (status, body) = self
            .post(
                &format!("/api/contacts/{contact_id}/addresses"),
                json!({
                    "street": "jalan test",
                    "city": "kota test",
                    "province": "provinsi test",
                    "country": "indonesia",
                    "postal_code": "234234",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["data"].clone()
    }
}

pub fn id_of(value: &Value) -> i64 {
    value["id"].as_i64().unwrap()
}
