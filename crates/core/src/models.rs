//! Catalog documents stored by the API.
//!
//! These are the validated shapes that get persisted. Request payloads are
//! checked at the HTTP boundary and converted into these types before they
//! reach the store.

use core::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::Email;

/// Named collection a document lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Products for sale.
    Product,
    /// Registered shoppers.
    User,
}

impl Collection {
    /// Every collection, in a stable order.
    pub const ALL: [Self; 2] = [Self::Product, Self::User];

    /// Name of the collection in the store.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product in the supermarket catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Product {
    /// Product title
    #[schemars(length(min = 1))]
    pub title: String,
    /// Product description
    pub description: Option<String>,
    /// Price in dollars
    #[schemars(range(min = 0))]
    pub price: f64,
    /// Product category
    pub category: String,
    /// Whether product is in stock
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

/// A registered shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct User {
    /// Full name
    pub name: String,
    /// Email address
    #[schemars(with = "String", email)]
    pub email: Email,
    /// Postal address
    pub address: String,
    /// Age in years
    #[schemars(range(min = 0, max = 120))]
    pub age: Option<u8>,
    /// Whether the account is active
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}
