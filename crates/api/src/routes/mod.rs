//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                   - Greeting
//! GET  /test               - Backend and store diagnostics
//! GET  /health             - Liveness check
//! GET  /health/ready       - Readiness check (store ping)
//! GET  /schema             - JSON Schemas of products and users
//!
//! # API
//! GET  /api/hello          - Greeting
//! GET  /api/products       - List products (?limit=N)
//! POST /api/products       - Create product
//! GET  /api/users          - List users (?limit=N)
//! POST /api/users          - Create user
//! POST /api/cart/summary   - Price a cart
//! ```

pub mod cart;
pub mod diagnostics;
pub mod products;
pub mod root;
pub mod schema;
pub mod users;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::from_fn,
    routing::{get, post},
};
use serde::Serialize;
use supermarket_core::{Document, RecordId};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id::request_id, request_id_middleware};
use crate::state::AppState;

/// Body returned after creating a document.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
    pub message: &'static str,
}

impl Created {
    #[must_use]
    pub fn new(id: RecordId, message: &'static str) -> Self {
        Self {
            id: id.to_string(),
            message,
        }
    }
}

/// Body of collection listings.
#[derive(Debug, Serialize)]
pub struct Listing {
    pub items: Vec<Document>,
}

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/hello", get(root::hello))
        .route("/products", get(products::list).post(products::create))
        .route("/users", get(users::list).post(users::create))
        .route("/cart/summary", post(cart::summary))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root::index))
        .route("/test", get(diagnostics::test_connection))
        .route("/health", get(diagnostics::health))
        .route("/health/ready", get(diagnostics::readiness))
        .route("/schema", get(schema::schemas))
        .nest("/api", api_routes())
}

/// Build the application router with CORS, tracing and request IDs.
///
/// Sentry layers are added by the binary.
pub fn router(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = request_id(request.headers()).unwrap_or("-"),
        )
    });

    routes()
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(trace)
        .layer(from_fn(request_id_middleware))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::to_bytes,
        http::{HeaderValue, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use supermarket_core::RawRecord;
    use tower::ServiceExt;

    use super::*;
    use crate::config::ApiConfig;
    use crate::db::{DocumentStore, MemoryDocumentStore, Payload, RepositoryError};
    use crate::middleware::REQUEST_ID_HEADER;

    /// Store whose every operation fails.
    #[derive(Debug)]
    struct FailingStore(String);

    impl FailingStore {
        fn error(&self) -> RepositoryError {
            RepositoryError::DataCorruption(self.0.clone())
        }
    }

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn insert(&self, _: &str, _: Payload) -> Result<RecordId, RepositoryError> {
            Err(self.error())
        }

        async fn fetch(&self, _: &str, _: Option<u32>) -> Result<Vec<RawRecord>, RepositoryError> {
            Err(self.error())
        }

        async fn list_collections(&self) -> Result<Vec<String>, RepositoryError> {
            Err(self.error())
        }

        async fn ping(&self) -> Result<(), RepositoryError> {
            Err(self.error())
        }
    }

    fn app_with(store: Option<Arc<dyn DocumentStore>>) -> Router {
        router(AppState::new(ApiConfig::in_memory(), store))
    }

    fn app() -> Router {
        app_with(Some(Arc::new(MemoryDocumentStore::new())))
    }

    fn failing_app(message: &str) -> Router {
        app_with(Some(Arc::new(FailingStore(message.to_string()))))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    fn product(title: &str, price: f64) -> Value {
        json!({ "title": title, "price": price, "category": "grocery" })
    }

    #[tokio::test]
    async fn test_greetings() {
        let app = app();

        let (status, body) = send(&app, get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Hello from the Supermarket backend!" }));

        let (_, body) = send(&app, get_request("/api/hello")).await;
        assert_eq!(body, json!({ "message": "Hello from the backend API!" }));
    }

    #[tokio::test]
    async fn test_diagnostics_without_store() {
        let (status, body) = send(&app_with(None), get_request("/test")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "✅ Running");
        assert_eq!(body["database"], "⚠️  Available but not initialized");
        assert_eq!(body["connection_status"], "Not Connected");
        assert_eq!(body["collections"], json!([]));
    }

    #[tokio::test]
    async fn test_diagnostics_with_working_store() {
        let app = app();
        send(&app, post_json("/api/products", &product("Tea", 3.0))).await;

        let (_, body) = send(&app, get_request("/test")).await;
        assert_eq!(body["database"], "✅ Connected & Working");
        assert_eq!(body["connection_status"], "Connected");
        assert_eq!(body["collections"], json!(["product"]));
        assert_eq!(body["database_url"], "✅ Set");
        assert_eq!(body["database_name"], "❌ Not Set");
    }

    #[tokio::test]
    async fn test_diagnostics_with_failing_store_truncates_error() {
        let cause = "x".repeat(80);
        let (status, body) = send(&failing_app(&cause), get_request("/test")).await;

        let full = RepositoryError::DataCorruption(cause).to_string();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["database"],
            format!("⚠️  Connected but Error: {}", &full[..50])
        );
        assert_eq!(body["connection_status"], "Connected");
        assert_eq!(body["collections"], json!([]));
    }

    #[tokio::test]
    async fn test_health_and_readiness() {
        let response = app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");

        let ready = |app: Router| async move {
            app.oneshot(get_request("/health/ready")).await.unwrap().status()
        };
        assert_eq!(ready(app()).await, StatusCode::OK);
        assert_eq!(ready(app_with(None)).await, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ready(failing_app("down")).await, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_create_and_list_products() {
        let app = app();

        let (status, created) =
            send(&app, post_json("/api/products", &product("Rice", 2.5))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["message"], "Product created");

        let (status, listing) = send(&app, get_request("/api/products")).await;
        assert_eq!(status, StatusCode::OK);
        let items = listing["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], created["id"]);
        assert_eq!(items[0]["title"], "Rice");
        assert_eq!(items[0]["in_stock"], true);
        assert!(items[0].get("_id").is_none());
    }

    #[tokio::test]
    async fn test_list_limit() {
        let app = app();
        for title in ["a", "b", "c"] {
            send(&app, post_json("/api/products", &product(title, 1.0))).await;
        }

        let (_, body) = send(&app, get_request("/api/products?limit=2")).await;
        let titles: Vec<_> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["title"].clone())
            .collect();
        assert_eq!(titles, vec![json!("c"), json!("b")]);

        let (_, body) = send(&app, get_request("/api/products?limit=0")).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_limit_is_rejected() {
        let app = app();

        let (status, body) = send(&app, get_request("/api/users?limit=-1")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "limit");

        let (status, body) = send(&app, get_request("/api/users?limit=abc")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "query");
    }

    #[tokio::test]
    async fn test_invalid_product_is_rejected() {
        let (status, body) = send(
            &app(),
            post_json("/api/products", &product("Rice", -2.5)),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "price");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/products")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app(), request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "body");
    }

    #[tokio::test]
    async fn test_validation_runs_before_store_check() {
        let app = app_with(None);

        let (status, _) = send(&app, post_json("/api/products", &product("", 1.0))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(&app, post_json("/api/products", &product("Oats", 1.0))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "Database not available" }));

        let (status, _) = send(&app, get_request("/api/users")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_store_errors_are_reported() {
        let app = failing_app("disk on fire");

        let (status, body) = send(&app, post_json("/api/products", &product("Oats", 1.0))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "data corruption: disk on fire");

        let (status, _) = send(&app, get_request("/api/products")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_create_user() {
        let app = app();
        let user = json!({
            "name": "Ada",
            "email": "ada@example.com",
            "address": "12 Analytical Row",
            "age": 36,
        });

        let (status, created) = send(&app, post_json("/api/users", &user)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["message"], "User created");

        let (_, listing) = send(&app, get_request("/api/users")).await;
        let stored = &listing["items"][0];
        assert_eq!(stored["email"], "ada@example.com");
        assert_eq!(stored["is_active"], true);
    }

    #[tokio::test]
    async fn test_invalid_user_is_rejected() {
        let user = json!({
            "name": "Ada",
            "email": "ada.example.com",
            "address": "12 Analytical Row",
        });

        let (status, body) = send(&app(), post_json("/api/users", &user)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "email");
    }

    #[tokio::test]
    async fn test_cart_summary() {
        let cart = json!([{ "id": "p1", "name": "Pasta", "price": 10.0, "qty": 2 }]);
        let (status, body) = send(&app_with(None), post_json("/api/cart/summary", &cart)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "subtotal": 20.0, "tax": 1.4, "shipping": 4.99, "total": 26.39 })
        );
    }

    #[tokio::test]
    async fn test_cart_summary_rejects_negative_quantity() {
        let cart = json!([{ "id": "p1", "name": "Pasta", "price": 10.0, "qty": -1 }]);
        let (status, body) = send(&app(), post_json("/api/cart/summary", &cart)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "[0].qty");
    }

    #[tokio::test]
    async fn test_schema() {
        let (status, body) = send(&app(), get_request("/schema")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["schemas"]["product"]["properties"]["title"].is_object());
        assert!(body["schemas"]["user"]["properties"]["email"].is_object());
    }

    #[tokio::test]
    async fn test_request_id_is_echoed_or_generated() {
        let request = Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, "req-42")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER),
            Some(&HeaderValue::from_static("req-42"))
        );

        let response = app().oneshot(get_request("/health")).await.unwrap();
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_cors_mirrors_origin_with_credentials() {
        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let headers = response.headers();

        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:5173"))
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some(&HeaderValue::from_static("true"))
        );
    }
}
