use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use cart_api::{
    auth::{AuthVerifier, Claims},
    config::AppConfig,
    db,
    entities::product,
    events::{self, EventSender},
    handlers::AppServices,
    AppState,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_cart_api_tests_only_32plus";

/// Helper harness spinning up application state backed by an in-memory
/// SQLite database, with the real router and middleware stack.
pub struct TestApp {
    pub state: AppState,
    router: Router,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            TEST_JWT_SECRET.to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // A single pooled connection keeps the in-memory database alive
        // and shared for the lifetime of the test.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(64);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db.clone(), Arc::new(event_sender.clone()));
        let state = AppState {
            db,
            config: cfg.clone(),
            event_sender,
            services,
        };

        let verifier = Arc::new(AuthVerifier::new(&cfg.jwt_secret));
        let router = cart_api::app_router(state.clone(), verifier);

        Self {
            state,
            router,
            _event_task: event_task,
        }
    }

    /// Mints a bearer token for the given user, signed with the test secret.
    pub fn token_for(&self, user_id: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + 3600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .expect("failed to encode test token")
    }

    /// Issues a request against the router; `user_id` of `None` sends it
    /// unauthenticated.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user_id: Option<i64>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user_id) = user_id {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.token_for(user_id)),
            );
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request builds"),
            None => builder.body(Body::empty()).expect("request builds"),
        };

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request completes")
    }

    /// Inserts a product row directly, returning its id.
    pub async fn seed_product(&self, name: &str, price: Decimal) -> i64 {
        let now = Utc::now();
        let row = product::ActiveModel {
            name: Set(name.to_string()),
            description: Set(Some(format!("{} description", name))),
            price: Set(price),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        row.insert(&*self.state.db)
            .await
            .expect("failed to seed product")
            .id
    }
}

/// Reads a response body as JSON.
pub async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
