//! Product route handlers.

use axum::{Json, extract::State};
use supermarket_core::Collection;

use super::{Created, Listing};
use crate::error::Result;
use crate::middleware::{ValidatedJson, ValidatedQuery};
use crate::models::{ListParams, ProductIn};
use crate::services::RecordService;
use crate::state::AppState;

/// `POST /api/products`
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(product): ValidatedJson<ProductIn>,
) -> Result<Json<Created>> {
    let store = state.require_store()?;
    let id = RecordService::new(store)
        .create(Collection::Product, &product)
        .await?;
    Ok(Json(Created::new(id, "Product created")))
}

/// `GET /api/products?limit=N`
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(limit): ValidatedQuery<ListParams>,
) -> Result<Json<Listing>> {
    let store = state.require_store()?;
    let items = RecordService::new(store)
        .list(Collection::Product, limit)
        .await?;
    Ok(Json(Listing { items }))
}
