//! Article route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use smarthome_core::{Paginated, WishlistItemKind};

use super::errors::{not_found, not_found_or};
use super::listing::{ListQuery, Listing, PAGE_SIZE};
use crate::filters;
use crate::i18n::Route;
use crate::middleware::PageContext;
use crate::state::AppState;
use crate::views::{ArticleCard, Chrome, CommentView, article_cards};

/// Article listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "articles/index.html")]
pub struct ArticlesIndexTemplate {
    pub chrome: Chrome,
    pub listing: Listing,
    pub articles: Vec<ArticleCard>,
}

/// Article detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "articles/show.html")]
pub struct ArticleShowTemplate {
    pub chrome: Chrome,
    pub article: ArticleCard,
    pub article_id: i32,
    /// Article body as authored in the backend CMS.
    pub content_html: String,
    pub comments: Vec<CommentView>,
    pub signed_in: bool,
}

/// Display article listing page.
#[instrument(skip(state, ctx), fields(locale = %ctx.locale))]
pub async fn index(
    State(state): State<AppState>,
    ctx: PageContext,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let queries = state.queries();
    let params = query.params();
    let (page, categories) = tokio::join!(queries.articles(&params), queries.categories());

    let empty = Paginated::empty(PAGE_SIZE);
    let page = page.data;
    let page = page.as_deref().unwrap_or(&empty);
    let categories = categories.data.unwrap_or_default();

    ArticlesIndexTemplate {
        listing: Listing::new(
            Route::Articles.href(ctx.locale, None),
            &query,
            &categories,
            page,
            ctx.locale,
        ),
        articles: article_cards(page.data(), ctx.locale, &ctx.wishlist),
        chrome: Chrome::new(&ctx),
    }
}

/// Display article detail page, looked up by slug.
#[instrument(skip(state, ctx), fields(locale = %ctx.locale))]
pub async fn show(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(slug): Path<String>,
) -> Response {
    let queries = state.queries();
    let article = match queries.article_by_slug(&slug).await.into_result() {
        Ok(Some(article)) => article,
        Ok(None) => return not_found(&ctx),
        Err(e) => return not_found_or(&ctx, &e),
    };

    let locale = ctx.locale;
    let comments = queries.article_comments(article.id).await;
    // Fall back to the comments embedded in the article payload.
    let comments: Vec<CommentView> = comments.data.map_or_else(
        || article.comments.iter().map(|c| CommentView::new(c, locale)).collect(),
        |comments| comments.iter().map(|c| CommentView::new(c, locale)).collect(),
    );

    let in_wishlist = ctx
        .wishlist
        .is_in_wishlist(WishlistItemKind::Article, article.id.as_i32());

    ArticleShowTemplate {
        article: ArticleCard::new(&article, locale, in_wishlist),
        article_id: article.id.as_i32(),
        content_html: article.content.clone(),
        comments,
        signed_in: ctx.visitor().is_some(),
        chrome: Chrome::new(&ctx),
    }
    .into_response()
}
