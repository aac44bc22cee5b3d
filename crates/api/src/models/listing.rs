//! Query parameters for collection listings.

use serde::Deserialize;

use super::{Validate, ValidationErrors};

/// Page size when `limit` is not given.
pub const DEFAULT_LIMIT: u32 = 50;

/// `?limit=N` on `GET /api/products` and `GET /api/users`.
///
/// `limit=0` returns the whole collection.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

impl Validate for ListParams {
    /// Maximum number of documents, `None` for no limit.
    type Output = Option<u32>;

    fn validate(self) -> Result<Option<u32>, ValidationErrors> {
        match self.limit {
            None => Ok(Some(DEFAULT_LIMIT)),
            Some(0) => Ok(None),
            Some(n) => u32::try_from(n).map(Some).map_err(|_| {
                ValidationErrors::single(
                    "limit",
                    format!("must be between 0 and {}", u32::MAX),
                )
            }),
        }
    }
}
