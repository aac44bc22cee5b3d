//! User route handlers.

use axum::{Json, extract::State};
use supermarket_core::Collection;

use super::{Created, Listing};
use crate::error::Result;
use crate::middleware::{ValidatedJson, ValidatedQuery};
use crate::models::{ListParams, UserIn};
use crate::services::RecordService;
use crate::state::AppState;

/// `POST /api/users`
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(user): ValidatedJson<UserIn>,
) -> Result<Json<Created>> {
    let store = state.require_store()?;
    let id = RecordService::new(store)
        .create(Collection::User, &user)
        .await?;
    Ok(Json(Created::new(id, "User created")))
}

/// `GET /api/users?limit=N`
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(limit): ValidatedQuery<ListParams>,
) -> Result<Json<Listing>> {
    let store = state.require_store()?;
    let items = RecordService::new(store)
        .list(Collection::User, limit)
        .await?;
    Ok(Json(Listing { items }))
}
