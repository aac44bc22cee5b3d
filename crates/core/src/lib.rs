//! Supermarket Core - Shared types and pure business logic.
//!
//! This crate provides types shared across all Supermarket crates:
//! - `api` - HTTP server exposing products, users and the cart calculator
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and trivially testable.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for record IDs and emails
//! - [`models`] - Catalog documents (`Product`, `User`) and their collections
//! - [`cart`] - Cart pricing engine
//! - [`record`] - Normalization of raw stored records into JSON documents

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod models;
pub mod record;
pub mod types;

pub use cart::{CartItem, CartSummary, summarize};
pub use models::{Collection, Product, User};
pub use record::{Document, RawRecord, RawValue, normalize};
pub use types::*;
