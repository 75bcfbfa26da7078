//! Profile page (requires auth).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use super::session_expired;
use crate::error::AppError;
use crate::filters;
use crate::i18n::t;
use crate::middleware::{PageContext, RequireAuth};
use crate::state::AppState;
use crate::views::Chrome;
use crate::views::format::format_date;

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub chrome: Chrome,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub member_since: String,
    pub newsletter: &'static str,
}

/// Display the signed-in visitor's profile as the backend sees it.
#[instrument(skip_all, fields(user_id = %visitor.user.id))]
pub async fn show(
    RequireAuth(visitor): RequireAuth,
    State(state): State<AppState>,
    mut ctx: PageContext,
) -> Response {
    let locale = ctx.locale;
    let user = match state
        .queries()
        .me(visitor.user.id, &visitor.token)
        .await
        .into_result()
    {
        Ok(Some(user)) => user,
        Ok(None) => return AppError::Internal("Profile read was disabled".to_string()).into_response(),
        Err(e) if e.is_unauthorized() => return session_expired(&mut ctx, locale).await,
        Err(e) => return AppError::Backend(e).into_response(),
    };

    let newsletter = if user.newsletter_opt_in {
        t(locale, "profile.subscribed")
    } else {
        t(locale, "profile.not_subscribed")
    };

    ProfileTemplate {
        name: user.name.clone(),
        email: user.email.clone(),
        avatar: user.avatar.clone().filter(|a| !a.trim().is_empty()),
        member_since: format_date(locale, &user.created_at),
        newsletter,
        chrome: Chrome::new(&ctx),
    }
    .into_response()
}
