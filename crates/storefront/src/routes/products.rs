//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use smarthome_core::{Paginated, ProductId, WishlistItemKind};

use super::errors::{not_found, not_found_or};
use super::listing::{ListQuery, Listing, PAGE_SIZE};
use crate::filters;
use crate::i18n::Route;
use crate::middleware::PageContext;
use crate::state::AppState;
use crate::views::format::strip_html;
use crate::views::{Chrome, CommentView, ProductCard, ReviewView, product_cards};

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub chrome: Chrome,
    pub listing: Listing,
    pub products: Vec<ProductCard>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub chrome: Chrome,
    pub product: ProductCard,
    pub product_id: i32,
    /// Full description as plain text.
    pub description: String,
    pub category_href: Option<String>,
    pub reviews: Vec<ReviewView>,
    pub comments: Vec<CommentView>,
    pub signed_in: bool,
}

/// Display product listing page.
#[instrument(skip(state, ctx), fields(locale = %ctx.locale))]
pub async fn index(
    State(state): State<AppState>,
    ctx: PageContext,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let queries = state.queries();
    let params = query.params();
    let (page, categories) = tokio::join!(queries.products(&params), queries.categories());

    let empty = Paginated::empty(PAGE_SIZE);
    let page = page.data;
    let page = page.as_deref().unwrap_or(&empty);
    let categories = categories.data.unwrap_or_default();

    ProductsIndexTemplate {
        listing: Listing::new(
            Route::Products.href(ctx.locale, None),
            &query,
            &categories,
            page,
            ctx.locale,
        ),
        products: product_cards(page.data(), ctx.locale, &ctx.wishlist),
        chrome: Chrome::new(&ctx),
    }
}

/// Display product detail page.
#[instrument(skip(state, ctx), fields(locale = %ctx.locale))]
pub async fn show(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<i32>() else {
        return not_found(&ctx);
    };
    let id = ProductId::new(id);

    let queries = state.queries();
    let (product, reviews, comments) = tokio::join!(
        queries.product(id),
        queries.product_reviews(id),
        queries.product_comments(id),
    );

    let product = match product.into_result() {
        Ok(Some(product)) => product,
        Ok(None) => return not_found(&ctx),
        Err(e) => return not_found_or(&ctx, &e),
    };

    let locale = ctx.locale;
    // The product payload embeds its reviews; use them if the dedicated
    // read failed.
    let reviews: Vec<ReviewView> = reviews.data.map_or_else(
        || product.reviews.iter().map(|r| ReviewView::new(r, locale)).collect(),
        |reviews| reviews.iter().map(|r| ReviewView::new(r, locale)).collect(),
    );
    let comments: Vec<CommentView> = comments
        .data
        .map(|comments| comments.iter().map(|c| CommentView::new(c, locale)).collect())
        .unwrap_or_default();

    let in_wishlist = ctx
        .wishlist
        .is_in_wishlist(WishlistItemKind::Product, id.as_i32());

    ProductShowTemplate {
        product: ProductCard::new(&product, locale, in_wishlist),
        product_id: id.as_i32(),
        description: strip_html(&product.description),
        category_href: product
            .category
            .as_ref()
            .map(|c| Route::Category.href(locale, Some(&c.slug))),
        reviews,
        comments,
        signed_in: ctx.visitor().is_some(),
        chrome: Chrome::new(&ctx),
    }
    .into_response()
}

/// Rating choices offered by the review form, best first.
pub const RATINGS: [u8; 5] = [5, 4, 3, 2, 1];

impl ProductShowTemplate {
    #[must_use]
    pub const fn ratings(&self) -> [u8; 5] {
        RATINGS
    }
}
