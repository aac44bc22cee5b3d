//! Request payloads and their validation.
//!
//! Each payload deserializes loosely and is then checked field by field by
//! its [`Validate`] impl, which either produces the validated domain value or
//! every field error at once.

pub mod cart;
pub mod listing;
pub mod product;
pub mod user;

use core::fmt;

use serde::Serialize;

pub use cart::CartItemIn;
pub use listing::ListParams;
pub use product::ProductIn;
pub use user::UserIn;

/// Turns a raw request payload into a validated value.
pub trait Validate {
    /// The validated value.
    type Output;

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns all field errors found, never just the first.
    fn validate(self) -> Result<Self::Output, ValidationErrors>;
}

/// A single invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path to the field, e.g. `price` or `items[2].qty`.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

/// Field errors collected while validating one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// A single error.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    /// Record an error.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Absorb errors from a nested value, prefixing their field paths.
    pub fn extend_nested(&mut self, prefix: &str, nested: Self) {
        self.0.extend(nested.0.into_iter().map(|error| FieldError {
            field: format!("{prefix}.{}", error.field),
            message: error.message,
        }));
    }

    /// Whether no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recorded errors.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// `Ok(value)` if nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Validate a whole JSON array of payloads, labelling errors by index.
impl<T: Validate> Validate for Vec<T> {
    type Output = Vec<T::Output>;

    fn validate(self) -> Result<Self::Output, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut validated = Vec::with_capacity(self.len());

        for (index, item) in self.into_iter().enumerate() {
            match item.validate() {
                Ok(value) => validated.push(value),
                Err(nested) => errors.extend_nested(&format!("[{index}]"), nested),
            }
        }

        errors.into_result(validated)
    }
}
