//! Product creation payload.

use serde::Deserialize;
use supermarket_core::Product;

use super::{Validate, ValidationErrors};

/// Body of `POST /api/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductIn {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

const fn default_in_stock() -> bool {
    true
}

impl Validate for ProductIn {
    type Output = Product;

    fn validate(self) -> Result<Product, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.trim().is_empty() {
            errors.push("title", "must not be empty");
        }
        if !self.price.is_finite() {
            errors.push("price", "must be a finite number");
        } else if self.price < 0.0 {
            errors.push("price", "must be greater than or equal to 0");
        }

        errors.into_result(Product {
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            in_stock: self.in_stock,
        })
    }
}
