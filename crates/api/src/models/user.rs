//! User registration payload.

use serde::Deserialize;
use supermarket_core::{Email, User};

use super::{Validate, ValidationErrors};

/// Oldest age accepted.
pub const MAX_AGE: i64 = 120;

/// Body of `POST /api/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserIn {
    pub name: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl Validate for UserIn {
    type Output = User;

    fn validate(self) -> Result<User, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let email = match Email::parse(self.email.trim()) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.push("email", e.to_string());
                None
            }
        };

        let age = match self.age {
            None => None,
            Some(age) => match u8::try_from(age) {
                Ok(age) if i64::from(age) <= MAX_AGE => Some(age),
                _ => {
                    errors.push("age", format!("must be between 0 and {MAX_AGE}"));
                    None
                }
            },
        };

        match email {
            Some(email) if errors.is_empty() => Ok(User {
                name: self.name,
                email,
                address: self.address,
                age,
                is_active: self.is_active,
            }),
            _ => Err(errors),
        }
    }
}
