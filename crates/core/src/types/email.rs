//! Shopper email addresses.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why a string was rejected as an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is required")]
    Empty,
    #[error("email is longer than {max} characters")]
    TooLong { max: usize },
    #[error("email must not contain spaces")]
    Whitespace,
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    #[error("email has more than one @ symbol")]
    MultipleAtSymbols,
    #[error("email has nothing before the @")]
    EmptyLocalPart,
    #[error("email has nothing after the @")]
    EmptyDomain,
    /// Domain without a dot (`shop@localhost`) or with an empty label
    /// (`shop@mail..example.com`).
    #[error("email domain must look like example.com")]
    InvalidDomain,
}

/// A syntactically plausible email address.
///
/// Only the outline every deliverable address shares is checked: one `@`
/// with something on both sides, a dotted domain and no whitespace. The
/// original spelling is kept; nothing is lowercased.
///
/// Deserializing goes through the same checks as [`Email::parse`].
///
/// ```
/// use supermarket_core::Email;
///
/// let email = Email::parse("jo.baker+orders@corner-shop.co.uk").unwrap();
/// assert_eq!(email.domain(), "corner-shop.co.uk");
///
/// assert!(Email::parse("jo.baker").is_err());
/// assert!(Email::parse("jo@localhost").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email {
    address: String,
    at: usize,
}

impl Email {
    /// Longest address accepted (RFC 5321 path limit).
    pub const MAX_LENGTH: usize = 254;

    /// Check `s` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmailError`] that applies, checked in declaration
    /// order.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        match s.len() {
            0 => return Err(EmailError::Empty),
            n if n > Self::MAX_LENGTH => {
                return Err(EmailError::TooLong {
                    max: Self::MAX_LENGTH,
                });
            }
            _ => {}
        }
        if s.contains(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;
        if domain.contains('@') {
            return Err(EmailError::MultipleAtSymbols);
        }
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        check_domain(domain)?;

        Ok(Self {
            address: s.to_owned(),
            at: local.len(),
        })
    }

    /// The full address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.address
    }

    /// Everything before the `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.address.get(..self.at).unwrap_or_default()
    }

    /// Everything after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.address.get(self.at + 1..).unwrap_or_default()
    }
}

fn check_domain(domain: &str) -> Result<(), EmailError> {
    if domain.is_empty() {
        Err(EmailError::EmptyDomain)
    } else if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        Err(EmailError::InvalidDomain)
    } else {
        Ok(())
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.address
    }
}
