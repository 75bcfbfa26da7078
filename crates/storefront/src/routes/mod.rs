//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! Every page exists once per locale under `/{locale}`, at the localized
//! path from [`crate::i18n::routes`]:
//!
//! ```text
//! GET  /                                   - Redirect to the negotiated locale
//! GET  /{locale}                           - Home page
//! GET  /{locale}/products                  - Product listing (search, category, page)
//! GET  /{locale}/products/{id}             - Product detail
//! GET  /{locale}/articles                  - Article listing
//! GET  /{locale}/articles/{slug}           - Article detail
//! GET  /{locale}/categories/{slug}         - Products of a category
//! GET  /{locale}/auth/login                - Login page
//! POST /{locale}/auth/login                - Login action
//! GET  /{locale}/auth/register             - Register page
//! POST /{locale}/auth/register             - Register action
//! GET  /{locale}/profile                   - Profile (requires auth)
//! GET  /{locale}/wishlist                  - Wishlist (requires auth)
//! GET  /{locale}/newsletter/unsubscribe    - Confirm unsubscribing ?token=
//! POST /{locale}/newsletter/unsubscribe    - Unsubscribe
//!
//! # Actions (post/redirect/get, back to a local `return_to`)
//! POST /actions/wishlist/toggle
//! POST /actions/reviews
//! POST /actions/comments
//! POST /actions/newsletter/subscribe
//! POST /actions/auth/logout
//! POST /actions/preferences/theme
//! POST /actions/preferences/sidebar
//!
//! GET  /health                             - Liveness
//! GET  /health/ready                       - Readiness
//! ```
//!
//! Anything else renders the localized not-found page.

pub mod articles;
pub mod auth;
pub mod categories;
pub mod community;
pub mod errors;
pub mod home;
pub mod listing;
pub mod newsletter;
pub mod preferences;
pub mod products;
pub mod profile;
pub mod wishlist;

use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
    routing::{MethodRouter, get, post},
};
use sentry_tower::{NewSentryLayer, SentryHttpLayer};
use serde::{Deserialize, Deserializer};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::SessionStore;
use tracing::Span;

use smarthome_core::Locale;

use crate::error::clear_sentry_user;
use crate::i18n::Route;
use crate::middleware::rate_limit::RateLimiterLayer;
use crate::middleware::{
    FlashKind, PageContext, auth_rate_limiter, create_session_layer, form_rate_limiter,
    request_id_middleware, safe_return_to, security_headers_middleware,
};
use crate::state::AppState;

/// Handler for `route`, identical in every locale.
fn page(route: Route, limiter: Option<&RateLimiterLayer>) -> MethodRouter<AppState> {
    match route {
        Route::Home => get(home::home),
        Route::Products => get(products::index),
        Route::ProductDetail => get(products::show),
        Route::Articles => get(articles::index),
        Route::ArticleDetail => get(articles::show),
        Route::Category => get(categories::show),
        Route::Login => get(auth::login_page).merge(limited(post(auth::login), limiter)),
        Route::Register => get(auth::register_page).merge(limited(post(auth::register), limiter)),
        Route::Profile => get(profile::show),
        Route::Wishlist => get(wishlist::show),
        Route::NewsletterUnsubscribe => get(newsletter::unsubscribe_page)
            .merge(limited(post(newsletter::unsubscribe), limiter)),
    }
}

fn limited(
    handler: MethodRouter<AppState>,
    limiter: Option<&RateLimiterLayer>,
) -> MethodRouter<AppState> {
    match limiter {
        Some(limiter) => handler.layer(limiter.clone()),
        None => handler,
    }
}

/// Every localized page, registered once per route, locale and pattern.
///
/// Login, registration and unsubscribe posts share one rate limiter across
/// locales.
pub fn localized_routes(rate_limit: bool) -> Router<AppState> {
    let limiter = rate_limit.then(auth_rate_limiter);

    Route::ALL
        .into_iter()
        .flat_map(|route| Locale::ALL.into_iter().map(move |locale| (route, locale)))
        .fold(Router::new(), |router, (route, locale)| {
            route
                .patterns(locale)
                .iter()
                .fold(router, |router, pattern| {
                    router.route(pattern, page(route, limiter.as_ref()))
                })
        })
}

/// Non-localized form actions.
pub fn action_routes(rate_limit: bool) -> Router<AppState> {
    let newsletter = limited(
        post(newsletter::subscribe),
        rate_limit.then(form_rate_limiter).as_ref(),
    );

    Router::new()
        .route("/wishlist/toggle", post(wishlist::toggle))
        .route("/reviews", post(community::create_review))
        .route("/comments", post(community::create_comment))
        .route("/newsletter/subscribe", newsletter)
        .route("/auth/logout", post(auth::logout))
        .route("/preferences/theme", post(preferences::theme))
        .route("/preferences/sidebar", post(preferences::sidebar))
}

/// Create all routes for the storefront.
pub fn routes(rate_limit: bool) -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .merge(localized_routes(rate_limit))
        .nest("/actions", action_routes(rate_limit))
        .fallback(errors::fallback)
}

/// The full application: pages, health checks and the middleware stack.
pub fn build_router<Store>(state: AppState, store: Store) -> Router
where
    Store: SessionStore + Clone,
{
    let session_layer = create_session_layer(store, state.config());
    let rate_limit = state.config().rate_limit;

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes(rate_limit))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(NewSentryLayer::new_from_top())
        .layer(SentryHttpLayer::new().enable_transaction())
}

/// Redirect `/` to the home page of the visitor's preferred locale.
async fn root(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    let accept_language = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    let locale = Locale::negotiate(accept_language, state.config().default_locale);
    Redirect::to(&Route::Home.href(locale, None))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies session database connectivity when one is configured.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let Some(pool) = state.pool() else {
        return StatusCode::OK;
    };
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Treat blank form and query values as absent.
pub(crate) fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty()))
}

/// Locale of the page an action was posted from.
pub(crate) fn action_locale(ctx: &PageContext, return_to: Option<&str>) -> Locale {
    return_to
        .and_then(crate::middleware::locale_from_path)
        .unwrap_or(ctx.locale)
}

/// Redirect back to `return_to` when it is a local path.
pub(crate) fn back(return_to: Option<&str>, locale: Locale) -> Response {
    Redirect::to(&safe_return_to(return_to, locale)).into_response()
}

/// Queue `key` and redirect back.
pub(crate) async fn back_with(
    ctx: &PageContext,
    kind: FlashKind,
    key: &str,
    return_to: Option<&str>,
) -> Response {
    let locale = action_locale(ctx, return_to);
    ctx.flash(kind, key).await;
    back(return_to, locale)
}

/// Redirect to the login page with `key` as flash message.
pub(crate) async fn to_login(ctx: &PageContext, locale: Locale, key: &str) -> Response {
    ctx.flash(FlashKind::Error, key).await;
    Redirect::to(&Route::Login.href(locale, None)).into_response()
}

/// The backend rejected the stored token: sign out locally and send the
/// visitor to the login page.
pub(crate) async fn session_expired(ctx: &mut PageContext, locale: Locale) -> Response {
    if let Err(e) = ctx.auth.logout().await {
        tracing::warn!(error = %e, "Failed to clear expired session");
    }
    clear_sentry_user();
    to_login(ctx, locale, "flash.session_expired").await
}
