//! Authentication extractors.
//!
//! A visitor is signed in when their persisted auth store holds a user and a
//! bearer token. The token is trusted until a backend call rejects it.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use smarthome_core::Locale;

use super::page_context::{FlashKind, locale_from_path, set_flash};
use crate::backend::User;
use crate::i18n::Route;
use crate::stores::AuthStore;

/// The signed-in visitor.
#[derive(Clone)]
pub struct SignedIn {
    pub user: User,
    pub token: String,
}

impl std::fmt::Debug for SignedIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedIn")
            .field("user_id", &self.user.id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Extractor that requires a signed-in visitor.
///
/// If nobody is signed in, redirects to the login page of the locale in the
/// request path.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(visitor): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", visitor.user.name)
/// }
/// ```
pub struct RequireAuth(pub SignedIn);

/// Error returned when authentication is required but nobody is signed in.
pub enum AuthRejection {
    /// Redirect to the localized login page.
    RedirectToLogin(Locale),
    /// No session layer in front of the handler.
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin(locale) => {
                Redirect::to(&Route::Login.href(locale, None)).into_response()
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

async fn signed_in(session: &Session) -> Option<SignedIn> {
    let auth = AuthStore::load(session.clone()).await;
    match (auth.user(), auth.token()) {
        (Some(user), Some(token)) if auth.is_authenticated() => Some(SignedIn {
            user: user.clone(),
            token: token.to_owned(),
        }),
        _ => None,
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthRejection::Unauthorized)?;

        if let Some(visitor) = signed_in(&session).await {
            return Ok(Self(visitor));
        }

        set_flash(&session, FlashKind::Error, "flash.sign_in_required").await;
        let locale = locale_from_path(parts.uri.path()).unwrap_or_default();
        Err(AuthRejection::RedirectToLogin(locale))
    }
}
