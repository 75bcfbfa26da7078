//! Query keys for every cached read.
//!
//! Keys are built here and nowhere else so that mutations invalidate
//! exactly the keys the reads use.

use smarthome_core::{ArticleId, CategoryId, ProductId, UserId};

use super::QueryKey;
use crate::backend::{ListParams, PageParams};

fn list(resource: &str, params: &ListParams) -> QueryKey {
    QueryKey::new(resource)
        .with_opt(params.page)
        .with_opt(params.limit)
        .with_opt(params.category.as_deref())
        .with_opt(params.search.as_deref())
}

fn by_category(resource: &str, slug: &str, params: PageParams) -> QueryKey {
    QueryKey::new(resource)
        .with("category")
        .with(slug)
        .with_opt(params.page)
        .with_opt(params.limit)
}

#[must_use]
pub fn products(params: &ListParams) -> QueryKey {
    list("products", params)
}

#[must_use]
pub fn product(id: ProductId) -> QueryKey {
    QueryKey::new("product").with(id)
}

#[must_use]
pub fn featured_products() -> QueryKey {
    QueryKey::new("products").with("featured")
}

#[must_use]
pub fn products_by_category(slug: &str, params: PageParams) -> QueryKey {
    by_category("products", slug, params)
}

#[must_use]
pub fn articles(params: &ListParams) -> QueryKey {
    list("articles", params)
}

#[must_use]
pub fn article(id: ArticleId) -> QueryKey {
    QueryKey::new("article").with(id)
}

#[must_use]
pub fn article_by_slug(slug: &str) -> QueryKey {
    QueryKey::new("article").with("slug").with(slug)
}

#[must_use]
pub fn featured_articles() -> QueryKey {
    QueryKey::new("articles").with("featured")
}

#[must_use]
pub fn articles_by_category(slug: &str, params: PageParams) -> QueryKey {
    by_category("articles", slug, params)
}

#[must_use]
pub fn categories() -> QueryKey {
    QueryKey::new("categories")
}

#[must_use]
pub fn category_tree() -> QueryKey {
    QueryKey::new("categories").with("tree")
}

#[must_use]
pub fn category(id: CategoryId) -> QueryKey {
    QueryKey::new("category").with(id)
}

#[must_use]
pub fn product_comments(id: ProductId) -> QueryKey {
    QueryKey::new("comments").with("product").with(id)
}

#[must_use]
pub fn article_comments(id: ArticleId) -> QueryKey {
    QueryKey::new("comments").with("article").with(id)
}

#[must_use]
pub fn product_reviews(id: ProductId) -> QueryKey {
    QueryKey::new("reviews").with("product").with(id)
}

#[must_use]
pub fn wishlist(user: UserId) -> QueryKey {
    QueryKey::new("wishlist").with(user)
}

#[must_use]
pub fn me(user: UserId) -> QueryKey {
    QueryKey::new("auth").with("me").with(user)
}
