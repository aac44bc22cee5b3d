//! Business logic between handlers and the document store.
//!
//! # Services
//!
//! - `records` - Create and list collection documents

pub mod records;

pub use records::RecordService;
