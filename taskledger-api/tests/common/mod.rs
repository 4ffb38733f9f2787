/// Common test utilities for the API tests
///
/// Builds the full router on top of an in-memory store seeded with the demo
/// data, so the suites run without a database:
///
/// | user_id | username | role |
/// |---|---|---|
/// | 1 | manager1 | Manager |
/// | 2 | manager2 | Manager |
/// | 3 | team_member1 | Team Member |
/// | 4 | team_member2 | Team Member |
/// | 5 | team_member3 | Team Member |

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use taskledger_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskledger_shared::{
    auth::identity::UnknownIdentityPolicy,
    seed::seed_demo_data,
    store::memory::MemoryStore,
};
use tower::Service as _;

pub const MANAGER: i64 = 1;
pub const MEMBER: i64 = 3;
pub const OTHER_MEMBER: i64 = 4;

/// Test context: router plus direct access to the store
pub struct TestContext {
    pub app: Router,
    pub store: Arc<MemoryStore>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_policy(UnknownIdentityPolicy::Reject).await
    }

    pub async fn with_policy(policy: UnknownIdentityPolicy) -> Self {
        let store = Arc::new(MemoryStore::new());
        seed_demo_data(store.as_ref()).await.unwrap();

        let mut config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgresql://unused/taskledger_test".to_string()),
            _ => None,
        })
        .unwrap();
        config.identity_policy = policy;

        let app = build_router(AppState::new(store.clone(), config));
        TestContext { app, store }
    }

    /// Sends a request and returns the status and JSON body (`Null` if empty)
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        user_id: Option<i64>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = user_id {
            builder = builder.header("user_id", id.to_string());
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, json)
    }
}
