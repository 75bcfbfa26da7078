//! Category route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use super::errors::{not_found, not_found_or};
use super::listing::PAGE_SIZE;
use crate::backend::{Category, PageParams};
use crate::filters;
use crate::i18n::{Route, tf};
use crate::middleware::PageContext;
use crate::state::AppState;
use crate::views::{Chrome, PaginationView, ProductCard, page_href, product_cards};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u32>,
}

/// Category page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub chrome: Chrome,
    pub title: String,
    pub description: Option<String>,
    pub products: Vec<ProductCard>,
    pub pagination: PaginationView,
}

/// Display the products of a category, looked up by slug.
#[instrument(skip(state, ctx), fields(locale = %ctx.locale))]
pub async fn show(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let queries = state.queries();
    let params = PageParams {
        page: Some(query.page.unwrap_or(1).max(1)),
        limit: Some(PAGE_SIZE),
    };
    let (page, categories) = tokio::join!(
        queries.products_by_category(&slug, params),
        queries.categories(),
    );

    let page = match page.into_result() {
        Ok(Some(page)) => page,
        Ok(None) => return not_found(&ctx),
        Err(e) => return not_found_or(&ctx, &e),
    };

    let category = categories
        .data
        .as_deref()
        .and_then(|categories| find_by_slug(categories, &slug))
        .cloned();
    let name = category.as_ref().map_or_else(|| slug.clone(), |c| c.name.clone());

    let base = Route::Category.href(ctx.locale, Some(&slug));
    CategoryShowTemplate {
        title: tf(ctx.locale, "category.title", &[("name", &name)]),
        description: category.and_then(|c| c.meta_description),
        products: product_cards(page.data(), ctx.locale, &ctx.wishlist),
        pagination: PaginationView::new(page.as_ref(), ctx.locale, |n| page_href(&base, n, &[])),
        chrome: Chrome::new(&ctx),
    }
    .into_response()
}

fn find_by_slug<'a>(categories: &'a [Category], slug: &str) -> Option<&'a Category> {
    categories.iter().find_map(|c| c.find_by_slug(slug))
}
