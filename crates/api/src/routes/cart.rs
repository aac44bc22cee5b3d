//! Cart pricing.

use axum::Json;
use supermarket_core::{CartSummary, summarize};

use crate::middleware::ValidatedJson;
use crate::models::CartItemIn;

/// `POST /api/cart/summary`
///
/// Prices the posted line items. Nothing is stored.
pub async fn summary(
    ValidatedJson(items): ValidatedJson<Vec<CartItemIn>>,
) -> Json<CartSummary> {
    let summary = summarize(&items);
    tracing::debug!(items = items.len(), total = summary.total, "Cart priced");
    Json(summary)
}
