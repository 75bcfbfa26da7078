//! Authentication route handlers.
//!
//! Login and registration go through the backend; on success the returned
//! token and user are written to the visitor's auth store.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use smarthome_core::Email;

use super::{back_with, non_blank};
use crate::backend::{LoginRequest, RegisterRequest};
use crate::error::{add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::i18n::{Route, t};
use crate::middleware::{FlashKind, PageContext};
use crate::queries::MutationError;
use crate::state::AppState;
use crate::views::Chrome;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form data.
#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox, present when ticked.
    #[serde(default, deserialize_with = "non_blank")]
    pub newsletter_opt_in: Option<String>,
}

/// Logout form data.
#[derive(Debug, Deserialize)]
pub struct LogoutForm {
    #[serde(default, deserialize_with = "non_blank")]
    pub return_to: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub chrome: Chrome,
    pub error: Option<&'static str>,
    pub email: String,
    pub register_href: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub chrome: Chrome,
    pub error: Option<&'static str>,
    pub name: String,
    pub email: String,
    pub newsletter_opt_in: bool,
    pub login_href: String,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(ctx: PageContext) -> Response {
    if ctx.visitor().is_some() {
        return Redirect::to(&Route::Home.href(ctx.locale, None)).into_response();
    }
    login_form(&ctx, None, String::new())
}

fn login_form(ctx: &PageContext, error: Option<&'static str>, email: String) -> Response {
    let status = if error.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    let page = LoginTemplate {
        chrome: Chrome::new(ctx),
        error: error.map(|key| t(ctx.locale, key)),
        email,
        register_href: Route::Register.href(ctx.locale, None),
    };
    (status, page).into_response()
}

/// Handle login form submission.
#[instrument(skip_all, fields(locale = %ctx.locale))]
pub async fn login(
    State(state): State<AppState>,
    mut ctx: PageContext,
    Form(form): Form<LoginForm>,
) -> Response {
    let email = form.email.trim().to_owned();
    if email.is_empty() || form.password.is_empty() {
        return login_form(&ctx, Some("auth.fields_required"), email);
    }

    let Ok(parsed) = Email::parse(&email) else {
        return login_form(&ctx, Some("auth.invalid_email"), email);
    };

    let request = LoginRequest {
        email: parsed.into_string(),
        password: form.password,
    };
    match state.queries().login(&mut ctx.auth, &request).await {
        Ok(user) => {
            set_sentry_user(&user.id, Some(&user.email));
            add_breadcrumb("auth", "Signed in", None);
            Redirect::to(&Route::Home.href(ctx.locale, None)).into_response()
        }
        Err(e) => {
            log_auth_failure("Login failed", &e);
            login_form(&ctx, Some("auth.login_failed"), email)
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(ctx: PageContext) -> Response {
    if ctx.visitor().is_some() {
        return Redirect::to(&Route::Home.href(ctx.locale, None)).into_response();
    }
    register_form(&ctx, None, String::new(), String::new(), false)
}

fn register_form(
    ctx: &PageContext,
    error: Option<&'static str>,
    name: String,
    email: String,
    newsletter_opt_in: bool,
) -> Response {
    let status = if error.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    let page = RegisterTemplate {
        chrome: Chrome::new(ctx),
        error: error.map(|key| t(ctx.locale, key)),
        name,
        email,
        newsletter_opt_in,
        login_href: Route::Login.href(ctx.locale, None),
    };
    (status, page).into_response()
}

/// Handle registration form submission.
#[instrument(skip_all, fields(locale = %ctx.locale))]
pub async fn register(
    State(state): State<AppState>,
    mut ctx: PageContext,
    Form(form): Form<RegisterForm>,
) -> Response {
    let name = form.name.trim().to_owned();
    let email = form.email.trim().to_owned();
    let newsletter_opt_in = form.newsletter_opt_in.is_some();
    if name.is_empty() || email.is_empty() || form.password.is_empty() {
        return register_form(&ctx, Some("auth.fields_required"), name, email, newsletter_opt_in);
    }

    let Ok(parsed) = Email::parse(&email) else {
        return register_form(&ctx, Some("auth.invalid_email"), name, email, newsletter_opt_in);
    };

    let request = RegisterRequest {
        email: parsed.into_string(),
        password: form.password,
        name: name.clone(),
        newsletter_opt_in: Some(newsletter_opt_in),
    };
    match state.queries().register(&mut ctx.auth, &request).await {
        Ok(user) => {
            set_sentry_user(&user.id, Some(&user.email));
            add_breadcrumb("auth", "Registered", None);
            Redirect::to(&Route::Home.href(ctx.locale, None)).into_response()
        }
        Err(e) => {
            log_auth_failure("Registration failed", &e);
            register_form(&ctx, Some("auth.register_failed"), name, email, newsletter_opt_in)
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Sign out with the backend and clear the auth store.
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    mut ctx: PageContext,
    Form(form): Form<LogoutForm>,
) -> Response {
    let locale = super::action_locale(&ctx, form.return_to.as_deref());
    match state.queries().logout(&mut ctx.auth).await {
        Ok(()) => {
            clear_sentry_user();
            ctx.flash(FlashKind::Success, "flash.signed_out").await;
            Redirect::to(&Route::Home.href(locale, None)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Logout failed");
            back_with(&ctx, FlashKind::Error, "flash.action_failed", form.return_to.as_deref()).await
        }
    }
}

fn log_auth_failure(message: &str, error: &MutationError) {
    match error {
        MutationError::Backend(e) if e.status().is_some() => {
            tracing::info!(error = %e, "{message}");
        }
        _ => tracing::warn!(error = %error, "{message}"),
    }
}
