//! HTTP middleware and extractors.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. Request ID (reuse or generate `x-request-id`)
//! 3. `TraceLayer` (request span including the request ID)
//! 4. CORS (any origin, credentials allowed)

pub mod request_id;
pub mod validation;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use validation::{ValidatedJson, ValidatedQuery};
