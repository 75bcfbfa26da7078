//! Wishlist page and the wishlist toggle action.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use smarthome_core::WishlistKey;

use super::{action_locale, back_with, non_blank, session_expired, to_login};
use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::middleware::{FlashKind, PageContext, RequireAuth};
use crate::queries::MutationError;
use crate::state::AppState;
use crate::views::{ArticleCard, Chrome, ProductCard, article_cards, product_cards};

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist.html")]
pub struct WishlistTemplate {
    pub chrome: Chrome,
    pub products: Vec<ProductCard>,
    pub articles: Vec<ArticleCard>,
}

/// Toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    /// `"{type}-{id}"`, e.g. `product-42`.
    #[serde(default)]
    pub item: String,
    #[serde(default, deserialize_with = "non_blank")]
    pub return_to: Option<String>,
}

/// Display the server wishlist.
///
/// When reconciliation is enabled the local membership set is replaced by
/// the server's before rendering.
#[instrument(skip_all, fields(user_id = %visitor.user.id))]
pub async fn show(
    RequireAuth(visitor): RequireAuth,
    State(state): State<AppState>,
    mut ctx: PageContext,
) -> Response {
    let locale = ctx.locale;
    let wishlist = match state
        .queries()
        .wishlist(visitor.user.id, &visitor.token)
        .await
        .into_result()
    {
        Ok(Some(wishlist)) => wishlist,
        Ok(None) => {
            return AppError::Internal("Wishlist read was disabled".to_string()).into_response();
        }
        Err(e) if e.is_unauthorized() => return session_expired(&mut ctx, locale).await,
        Err(e) => return AppError::Backend(e).into_response(),
    };

    if state.config().wishlist_reconcile_on_view
        && let Err(e) = ctx.wishlist.reconcile(&wishlist).await
    {
        tracing::warn!(error = %e, "Failed to reconcile wishlist");
    }

    WishlistTemplate {
        products: product_cards(&wishlist.products, locale, &ctx.wishlist),
        articles: article_cards(&wishlist.articles, locale, &ctx.wishlist),
        chrome: Chrome::new(&ctx),
    }
    .into_response()
}

/// Add the item when it is not in the local wishlist, remove it otherwise.
#[instrument(skip_all, fields(item = %form.item))]
pub async fn toggle(
    State(state): State<AppState>,
    mut ctx: PageContext,
    Form(form): Form<ToggleForm>,
) -> Response {
    let return_to = form.return_to.as_deref();
    let locale = action_locale(&ctx, return_to);

    let Ok(key) = form.item.trim().parse::<WishlistKey>() else {
        return back_with(&ctx, FlashKind::Error, "flash.invalid_input", return_to).await;
    };

    let PageContext { auth, wishlist, .. } = &mut ctx;
    match state.queries().toggle_wishlist(auth, wishlist, key).await {
        Ok(added) => {
            let item = key.to_string();
            add_breadcrumb("wishlist", "Toggled wishlist item", Some(&[("item", &item)]));
            let message = if added {
                "flash.wishlist_added"
            } else {
                "flash.wishlist_removed"
            };
            back_with(&ctx, FlashKind::Success, message, return_to).await
        }
        Err(MutationError::Unauthenticated) => {
            to_login(&ctx, locale, "flash.sign_in_required").await
        }
        Err(MutationError::Backend(e)) if e.is_unauthorized() => {
            session_expired(&mut ctx, locale).await
        }
        Err(e) => {
            tracing::warn!(error = %e, "Wishlist toggle failed");
            back_with(&ctx, FlashKind::Error, "flash.action_failed", return_to).await
        }
    }
}
