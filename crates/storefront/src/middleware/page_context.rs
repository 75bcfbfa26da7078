//! Per-request page context: locale, persisted stores and flash message.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use smarthome_core::Locale;

use super::auth::SignedIn;
use crate::error::AppError;
use crate::i18n::Route;
use crate::state::AppState;
use crate::stores::{AuthStore, UiStore, WishlistStore};

/// Session key of the one-shot flash message.
const FLASH_KEY: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// A message shown once on the next rendered page.
///
/// Holds a message key so it renders in the locale of that page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub key: String,
}

/// Queue a flash message for the next page. Failures are logged only.
pub async fn set_flash(session: &Session, kind: FlashKind, key: &str) {
    let flash = Flash {
        kind,
        key: key.to_owned(),
    };
    if let Err(e) = session.insert(FLASH_KEY, flash).await {
        tracing::warn!(error = %e, "Failed to store flash message");
    }
}

async fn take_flash(session: &Session) -> Option<Flash> {
    session
        .remove::<Flash>(FLASH_KEY)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Failed to read flash message"))
        .ok()
        .flatten()
}

/// Locale named by the first path segment, if any.
#[must_use]
pub fn locale_from_path(path: &str) -> Option<Locale> {
    path.trim_start_matches('/').split('/').next()?.parse().ok()
}

/// A local absolute path to redirect to, or the localized home.
///
/// Rejects anything that could leave the site (`//host`, `/\host`, full
/// URLs) and paths holding control characters, which URL parsers strip.
#[must_use]
pub fn safe_return_to(return_to: Option<&str>, locale: Locale) -> String {
    return_to
        .map(str::trim)
        .filter(|path| {
            path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control)
        })
        .map_or_else(|| Route::Home.href(locale, None), str::to_owned)
}

/// Everything a page handler needs about the visitor.
///
/// Loading the context rehydrates all three persisted stores and consumes
/// the pending flash message.
pub struct PageContext {
    pub locale: Locale,
    pub session: Session,
    pub auth: AuthStore<Session>,
    pub wishlist: WishlistStore<Session>,
    pub ui: UiStore<Session>,
    pub flash: Option<Flash>,
    /// Path and query of the current request, used for locale switching
    /// and as the `return_to` of forms.
    pub path_and_query: String,
}

impl PageContext {
    /// The signed-in visitor, if any.
    #[must_use]
    pub fn visitor(&self) -> Option<SignedIn> {
        match (self.auth.user(), self.auth.token()) {
            (Some(user), Some(token)) if self.auth.is_authenticated() => Some(SignedIn {
                user: user.clone(),
                token: token.to_owned(),
            }),
            _ => None,
        }
    }

    /// Queue a flash message for the next page.
    pub async fn flash(&self, kind: FlashKind, key: &str) {
        set_flash(&self.session, kind, key).await;
    }
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("Session layer missing".to_string()))?;

        let locale = locale_from_path(parts.uri.path()).unwrap_or(state.config().default_locale);
        let path_and_query = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path().to_owned(), |pq| pq.as_str().to_owned());

        let flash = take_flash(&session).await;
        let auth = AuthStore::load(session.clone()).await;
        let wishlist = WishlistStore::load(session.clone()).await;
        let ui = UiStore::load(session.clone()).await;

        Ok(Self {
            locale,
            session,
            auth,
            wishlist,
            ui,
            flash,
            path_and_query,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_path() {
        assert_eq!(locale_from_path("/fr/produits"), Some(Locale::Fr));
        assert_eq!(locale_from_path("/ar"), Some(Locale::Ar));
        assert_eq!(locale_from_path("/actions/wishlist/toggle"), None);
        assert_eq!(locale_from_path("/"), None);
    }

    #[test]
    fn test_safe_return_to() {
        assert_eq!(
            safe_return_to(Some("/fr/produits?page=2"), Locale::Fr),
            "/fr/produits?page=2"
        );
        assert_eq!(safe_return_to(Some("//evil.example"), Locale::En), "/en");
        assert_eq!(safe_return_to(Some("/\\evil.example"), Locale::En), "/en");
        assert_eq!(safe_return_to(Some("https://evil.example"), Locale::Ar), "/ar");
        assert_eq!(safe_return_to(None, Locale::Fr), "/fr");
    }

    #[test]
    fn test_safe_return_to_rejects_control_characters() {
        assert_eq!(safe_return_to(Some("/\t/evil.example/x"), Locale::En), "/en");
        assert_eq!(safe_return_to(Some("/en/products\r\nSet-Cookie: a=b"), Locale::En), "/en");
        assert_eq!(safe_return_to(Some("/\u{0}/evil.example"), Locale::Fr), "/fr");

        // A path that got through must stay on the site once resolved.
        let base = url::Url::parse("https://shop.example/en/products").unwrap();
        let kept = safe_return_to(Some("/en/articles/mesh-wifi?x=1"), Locale::En);
        assert_eq!(base.join(&kept).unwrap().host_str(), Some("shop.example"));
    }
}
