//! Cart line item payload.

use serde::Deserialize;
use supermarket_core::CartItem;

use super::{Validate, ValidationErrors};

/// One element of the `POST /api/cart/summary` body.
///
/// `qty` is signed here so that negative quantities reach validation and get
/// a field error instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CartItemIn {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub qty: i64,
}

impl Validate for CartItemIn {
    type Output = CartItem;

    fn validate(self) -> Result<CartItem, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if !self.price.is_finite() {
            errors.push("price", "must be a finite number");
        }

        let qty = if self.qty < 0 {
            errors.push("qty", "must be greater than or equal to 0");
            0
        } else {
            u32::try_from(self.qty).unwrap_or_else(|_| {
                errors.push("qty", format!("must be at most {}", u32::MAX));
                0
            })
        };

        errors.into_result(CartItem {
            id: self.id,
            name: self.name,
            price: self.price,
            qty,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: serde_json::Value) -> Vec<CartItemIn> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_items() {
        let items = parse(json!([
            { "id": "a", "name": "Apple", "price": 0.5, "qty": 6 },
            { "id": "b", "name": "Bread", "price": 3.0, "qty": 0 },
        ]))
        .validate()
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].qty, 6);
        assert_eq!(items[1].qty, 0);
    }

    #[test]
    fn test_negative_quantity_reports_index() {
        let errors = parse(json!([
            { "id": "a", "name": "Apple", "price": 0.5, "qty": 1 },
            { "id": "b", "name": "Bread", "price": 3.0, "qty": -2 },
        ]))
        .validate()
        .unwrap_err();

        assert_eq!(errors.errors().len(), 1);
        assert_eq!(errors.errors()[0].field, "[1].qty");
    }

    #[test]
    fn test_huge_quantity_is_rejected() {
        let errors = parse(json!([
            { "id": "a", "name": "Apple", "price": 0.5, "qty": 5_000_000_000_i64 },
        ]))
        .validate()
        .unwrap_err();

        assert_eq!(errors.errors()[0].field, "[0].qty");
    }

    #[test]
    fn test_empty_cart_is_valid() {
        assert!(parse(json!([])).validate().unwrap().is_empty());
    }
}
