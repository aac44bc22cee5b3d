//! JSON Schemas of the stored models.

use axum::Json;
use schemars::schema_for;
use serde_json::{Value, json};
use supermarket_core::{Product, User};

/// `GET /schema`
pub async fn schemas() -> Json<Value> {
    Json(json!({
        "schemas": {
            "user": schema_for!(User),
            "product": schema_for!(Product),
        }
    }))
}
