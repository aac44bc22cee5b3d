//! Greeting endpoints.

use axum::Json;
use serde_json::Value;

use crate::error::message;

/// `GET /`
pub async fn index() -> Json<Value> {
    message("Hello from the Supermarket backend!")
}

/// `GET /api/hello`
pub async fn hello() -> Json<Value> {
    message("Hello from the backend API!")
}
