//! Not-found page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::backend::BackendError;
use crate::error::AppError;
use crate::filters;
use crate::middleware::PageContext;
use crate::views::Chrome;

#[derive(Template, WebTemplate)]
#[template(path = "errors/not_found.html")]
pub struct NotFoundTemplate {
    pub chrome: Chrome,
}

/// Localized 404 page.
pub fn not_found(ctx: &PageContext) -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            chrome: Chrome::new(ctx),
        },
    )
        .into_response()
}

/// Render the not-found page for a backend 404, fail the request otherwise.
pub fn not_found_or(ctx: &PageContext, error: &std::sync::Arc<BackendError>) -> Response {
    if error.is_not_found() {
        not_found(ctx)
    } else {
        AppError::Backend(error.clone()).into_response()
    }
}

/// Fallback for paths no route matches, including unknown locale prefixes.
pub async fn fallback(ctx: PageContext) -> Response {
    not_found(&ctx)
}
