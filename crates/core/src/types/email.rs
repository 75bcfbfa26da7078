//! Email addresses typed into the storefront forms.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a form value is not an email address.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    /// No single `@` separating a non-empty mailbox from a dotted domain.
    #[error("email must look like name@domain.tld")]
    Malformed,
}

/// An email address accepted by the login, register and newsletter forms.
///
/// Parsing trims the surrounding whitespace a form field tends to carry and
/// lowercases the domain, so `" Ada@Example.COM "` and `"Ada@example.com"`
/// reach the backend identically. The mailbox keeps its case.
///
/// ```
/// use smarthome_core::Email;
///
/// let email = Email::parse(" Ada@Example.COM ").unwrap();
/// assert_eq!(email.as_str(), "Ada@example.com");
/// assert!(Email::parse("ada@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// RFC 5321 path limit.
    pub const MAX_LENGTH: usize = 254;

    /// # Errors
    ///
    /// Returns [`EmailError`] for blank, overlong or malformed input.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (mailbox, domain) = trimmed.split_once('@').ok_or(EmailError::Malformed)?;
        let domain_ok = domain
            .split('.')
            .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
            && domain.contains('.');
        if mailbox.is_empty()
            || !domain_ok
            || domain.contains('@')
            || trimmed.chars().any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(EmailError::Malformed);
        }

        Ok(Self(format!("{mailbox}@{}", domain.to_ascii_lowercase())))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_form_input() {
        let email = Email::parse("  Grace.Hopper+hub@Smart-Home.Example \n").unwrap();
        assert_eq!(email.as_str(), "Grace.Hopper+hub@smart-home.example");
        assert_eq!(email.to_string(), email.as_str());
    }

    #[test]
    fn test_parse_rejects_non_addresses() {
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
        for input in [
            "no-at-symbol",
            "@domain.com",
            "user@",
            "user@localhost",
            "a@b@c.com",
            "user@.com",
            "user@example.",
            "user@-bad.com",
            "us er@example.com",
        ] {
            assert_eq!(Email::parse(input), Err(EmailError::Malformed), "{input}");
        }
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            Email::parse(&long),
            Err(EmailError::TooLong { max: Email::MAX_LENGTH })
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let email: Email = serde_json::from_str(r#""ada@Example.com""#).unwrap();
        assert_eq!(email.into_string(), "ada@example.com");
        assert!(serde_json::from_str::<Email>(r#""not an email""#).is_err());
    }
}
