//! Theme and sidebar preference actions.

use axum::{
    Form,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::{action_locale, back, non_blank};
use crate::middleware::PageContext;
use crate::stores::Theme;

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    /// `light` or `dark`; toggles when absent.
    #[serde(default, deserialize_with = "non_blank")]
    pub theme: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub return_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SidebarForm {
    /// `true` or `false`; toggles when absent.
    #[serde(default, deserialize_with = "non_blank")]
    pub open: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub return_to: Option<String>,
}

/// Set or toggle the color theme.
pub async fn theme(mut ctx: PageContext, Form(form): Form<ThemeForm>) -> Response {
    let current = ctx.ui.state().theme;
    let theme = form
        .theme
        .as_deref()
        .and_then(|t| t.parse::<Theme>().ok())
        .unwrap_or_else(|| current.toggled());

    if let Err(e) = ctx.ui.set_theme(theme).await {
        return crate::error::AppError::from(e).into_response();
    }
    let locale = action_locale(&ctx, form.return_to.as_deref());
    back(form.return_to.as_deref(), locale)
}

/// Open, close or toggle the sidebar.
pub async fn sidebar(mut ctx: PageContext, Form(form): Form<SidebarForm>) -> Response {
    let current = ctx.ui.state().sidebar_open;
    let open = form
        .open
        .as_deref()
        .and_then(|o| o.parse::<bool>().ok())
        .unwrap_or(!current);

    if let Err(e) = ctx.ui.set_sidebar_open(open).await {
        return crate::error::AppError::from(e).into_response();
    }
    let locale = action_locale(&ctx, form.return_to.as_deref());
    back(form.return_to.as_deref(), locale)
}
