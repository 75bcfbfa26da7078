//! Review and comment actions.

use axum::{Form, extract::State, response::Response};
use serde::Deserialize;
use tracing::instrument;

use smarthome_core::{ArticleId, ProductId};

use super::{action_locale, back_with, non_blank, session_expired, to_login};
use crate::backend::{BackendError, CreateCommentRequest, CreateReviewRequest};
use crate::middleware::{FlashKind, PageContext};
use crate::state::AppState;

/// Review form data.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub product_id: i32,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "non_blank")]
    pub return_to: Option<String>,
}

/// Comment form data. Exactly one of the parents is set.
#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub product_id: Option<i32>,
    #[serde(default)]
    pub article_id: Option<i32>,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "non_blank")]
    pub return_to: Option<String>,
}

/// Post a review for a product.
#[instrument(skip_all, fields(product_id = form.product_id))]
pub async fn create_review(
    State(state): State<AppState>,
    mut ctx: PageContext,
    Form(form): Form<ReviewForm>,
) -> Response {
    let return_to = form.return_to.as_deref();
    let Some(visitor) = ctx.visitor() else {
        let locale = action_locale(&ctx, return_to);
        return to_login(&ctx, locale, "flash.sign_in_required").await;
    };

    let content = form.content.trim();
    if !(1..=5).contains(&form.rating) || content.is_empty() {
        return back_with(&ctx, FlashKind::Error, "flash.invalid_input", return_to).await;
    }

    let request = CreateReviewRequest {
        content: content.to_owned(),
        rating: form.rating,
        product_id: ProductId::new(form.product_id),
    };
    match state.queries().create_review(&visitor.token, &request).await {
        Ok(_) => back_with(&ctx, FlashKind::Success, "flash.review_created", return_to).await,
        Err(e) => failed(&mut ctx, &e, return_to).await,
    }
}

/// Post a comment on a product or an article.
#[instrument(skip_all)]
pub async fn create_comment(
    State(state): State<AppState>,
    mut ctx: PageContext,
    Form(form): Form<CommentForm>,
) -> Response {
    let return_to = form.return_to.as_deref();
    let Some(visitor) = ctx.visitor() else {
        let locale = action_locale(&ctx, return_to);
        return to_login(&ctx, locale, "flash.sign_in_required").await;
    };

    let content = form.content.trim();
    let one_parent = form.product_id.is_some() != form.article_id.is_some();
    if !one_parent || content.is_empty() {
        return back_with(&ctx, FlashKind::Error, "flash.invalid_input", return_to).await;
    }

    let request = CreateCommentRequest {
        content: content.to_owned(),
        product_id: form.product_id.map(ProductId::new),
        article_id: form.article_id.map(ArticleId::new),
    };
    match state.queries().create_comment(&visitor.token, &request).await {
        Ok(_) => back_with(&ctx, FlashKind::Success, "flash.comment_created", return_to).await,
        Err(e) => failed(&mut ctx, &e, return_to).await,
    }
}

async fn failed(ctx: &mut PageContext, error: &BackendError, return_to: Option<&str>) -> Response {
    if error.is_unauthorized() {
        let locale = action_locale(ctx, return_to);
        return session_expired(ctx, locale).await;
    }
    tracing::warn!(error = %error, "Posting failed");
    back_with(ctx, FlashKind::Error, "flash.action_failed", return_to).await
}
