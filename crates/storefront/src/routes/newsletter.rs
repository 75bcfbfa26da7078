//! Newsletter subscription route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use smarthome_core::Email;

use super::{back_with, non_blank};
use crate::filters;
use crate::i18n::{Route, t};
use crate::middleware::{FlashKind, PageContext};
use crate::state::AppState;
use crate::views::Chrome;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "non_blank")]
    pub return_to: Option<String>,
}

/// Token carried by the unsubscribe link and the confirmation form.
#[derive(Debug, Deserialize)]
pub struct UnsubscribeToken {
    #[serde(default, deserialize_with = "non_blank")]
    pub token: Option<String>,
}

/// Unsubscribe confirmation and result page template.
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/unsubscribe.html")]
pub struct UnsubscribeTemplate {
    pub chrome: Chrome,
    /// Set while the visitor still has to confirm.
    pub token: Option<String>,
    pub action: String,
    pub success: bool,
    pub message: &'static str,
}

impl UnsubscribeTemplate {
    fn new(ctx: &PageContext, token: Option<String>, success: bool, key: &'static str) -> Self {
        Self {
            chrome: Chrome::new(ctx),
            token,
            action: Route::NewsletterUnsubscribe.href(ctx.locale, None),
            success,
            message: t(ctx.locale, key),
        }
    }
}

/// Subscribe to the newsletter.
///
/// The address is validated before any request is made.
#[instrument(skip_all)]
pub async fn subscribe(
    State(state): State<AppState>,
    ctx: PageContext,
    Form(form): Form<SubscribeForm>,
) -> Response {
    let return_to = form.return_to.as_deref();
    let Ok(email) = Email::parse(&form.email) else {
        return back_with(&ctx, FlashKind::Error, "newsletter.invalid_email", return_to).await;
    };

    match state.queries().subscribe_newsletter(&email).await {
        Ok(_) => {
            tracing::info!("Newsletter subscription successful");
            back_with(&ctx, FlashKind::Success, "newsletter.subscribed", return_to).await
        }
        Err(e) => {
            tracing::warn!(error = %e, "Newsletter subscription failed");
            back_with(&ctx, FlashKind::Error, "newsletter.failed", return_to).await
        }
    }
}

/// Ask the visitor to confirm before unsubscribing.
///
/// The link from the newsletter email only renders a form; nothing changes
/// until it is posted.
pub async fn unsubscribe_page(
    ctx: PageContext,
    Query(query): Query<UnsubscribeToken>,
) -> impl IntoResponse {
    match query.token {
        Some(token) => {
            UnsubscribeTemplate::new(&ctx, Some(token), false, "newsletter.confirm_unsubscribe")
        }
        None => UnsubscribeTemplate::new(&ctx, None, false, "newsletter.unsubscribe_failed"),
    }
}

/// Unsubscribe with the confirmed token.
#[instrument(skip_all)]
pub async fn unsubscribe(
    State(state): State<AppState>,
    ctx: PageContext,
    Form(form): Form<UnsubscribeToken>,
) -> impl IntoResponse {
    let success = match form.token {
        Some(token) => match state.queries().unsubscribe_newsletter(&token).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Newsletter unsubscribe failed");
                false
            }
        },
        None => false,
    };

    let key = if success {
        "newsletter.unsubscribed"
    } else {
        "newsletter.unsubscribe_failed"
    };
    UnsubscribeTemplate::new(&ctx, None, success, key)
}
