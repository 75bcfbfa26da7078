//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::i18n::Route;
use crate::middleware::PageContext;
use crate::state::AppState;
use crate::views::{ArticleCard, Chrome, ProductCard, article_cards, product_cards};

/// Featured products shown on the home page.
const FEATURED_PRODUCTS: usize = 8;
/// Featured articles shown on the home page.
const FEATURED_ARTICLES: usize = 6;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: Chrome,
    pub products: Vec<ProductCard>,
    pub articles: Vec<ArticleCard>,
    pub products_href: String,
    pub articles_href: String,
}

/// Display the home page.
#[instrument(skip(state, ctx), fields(locale = %ctx.locale))]
pub async fn home(State(state): State<AppState>, ctx: PageContext) -> impl IntoResponse {
    let queries = state.queries();
    let (products, articles) = tokio::join!(queries.featured_products(), queries.featured_articles());

    // A failed read degrades to the empty state; the read already logged it.
    let products = products
        .data
        .map(|p| product_cards(p.iter().take(FEATURED_PRODUCTS), ctx.locale, &ctx.wishlist))
        .unwrap_or_default();
    let articles = articles
        .data
        .map(|a| article_cards(a.iter().take(FEATURED_ARTICLES), ctx.locale, &ctx.wishlist))
        .unwrap_or_default();

    HomeTemplate {
        chrome: Chrome::new(&ctx),
        products,
        articles,
        products_href: Route::Products.href(ctx.locale, None),
        articles_href: Route::Articles.href(ctx.locale, None),
    }
}
