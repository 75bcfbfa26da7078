//! Client for the SmartHome Hub REST backend.
//!
//! # Architecture
//!
//! - One method per backend endpoint, grouped by resource
//! - Every call hits the network: no retries, no caching, no timeout policy
//! - Responses are decoded into the typed payloads in [`types`]; a body that
//!   does not match is a [`BackendError::Malformed`]
//! - Caching and request de-duplication live one layer up in
//!   [`crate::queries`]
//!
//! # Example
//!
//! ```rust,ignore
//! use smarthome_storefront::backend::{BackendClient, ListParams};
//!
//! let client = BackendClient::new(&config.backend)?;
//!
//! let page = client
//!     .list_products(&ListParams { page: Some(2), ..ListParams::default() })
//!     .await?;
//!
//! // Authenticated calls use a copy of the client carrying the bearer token
//! let wishlist = client.with_token(&token).get_wishlist().await?;
//! ```

mod account;
mod catalog;
mod client;
mod community;
pub mod types;

pub use client::BackendClient;
pub use types::*;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by backend calls.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never completed (connection refused, DNS, reset, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected schema.
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The backend answered with a non-2xx status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The configured base URL cannot carry path segments.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    /// HTTP status for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transport failures and unreadable bodies both count as network errors.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Malformed(_))
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }

    /// Build an API error from a failed response body.
    ///
    /// Uses the JSON `message` field when present (joining arrays of
    /// validation messages), otherwise the raw body, otherwise the status
    /// reason phrase.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| match value.get("message")? {
                serde_json::Value::String(message) => Some(message.clone()),
                serde_json::Value::Array(messages) => Some(
                    messages
                        .iter()
                        .filter_map(serde_json::Value::as_str)
                        .collect::<Vec<_>>()
                        .join("; "),
                ),
                _ => None,
            })
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_owned()
                } else {
                    trimmed.chars().take(200).collect()
                }
            });

        Self::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_uses_json_message() {
        let err = BackendError::from_response(
            StatusCode::UNAUTHORIZED,
            r#"{"statusCode":401,"message":"Invalid credentials"}"#,
        );
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "API error: 401 - Invalid credentials");
    }

    #[test]
    fn test_api_error_joins_validation_messages() {
        let err = BackendError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"message":["email must be an email","password too short"]}"#,
        );
        assert_eq!(
            err.to_string(),
            "API error: 400 - email must be an email; password too short"
        );
    }

    #[test]
    fn test_api_error_falls_back_to_body_then_reason() {
        let err = BackendError::from_response(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.to_string(), "API error: 502 - upstream down");

        let err = BackendError::from_response(StatusCode::NOT_FOUND, "");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "API error: 404 - Not Found");
    }
}
