//! Product and article cards.

use smarthome_core::{Locale, WishlistItemKind, WishlistKey};

use super::format::{
    ARTICLE_EXCERPT_CHARS, PRODUCT_DESCRIPTION_CHARS, format_date, format_price, star_glyphs, strip_html,
    truncate_text,
};
use crate::backend::{Article, Product};
use crate::i18n::{Route, t, tf};

/// Heart toggle posted to `/actions/wishlist/toggle`.
///
/// Rendered as its own form so it never triggers the card link.
#[derive(Debug, Clone)]
pub struct WishlistButton {
    /// `"{type}-{id}"` key posted with the form.
    pub item: String,
    pub in_wishlist: bool,
    pub label: String,
}

impl WishlistButton {
    #[must_use]
    pub fn new(key: WishlistKey, in_wishlist: bool, locale: Locale) -> Self {
        let label = if in_wishlist {
            t(locale, "wishlist.remove")
        } else {
            t(locale, "wishlist.add")
        };
        Self {
            item: key.to_string(),
            in_wishlist,
            label: label.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductCard {
    pub title: String,
    pub href: String,
    pub image_url: Option<String>,
    pub description: String,
    pub price: String,
    /// Filled and empty stars, e.g. `★★★★☆`.
    pub stars: String,
    pub review_count: String,
    /// Category name, or the out-of-stock label for inactive products.
    pub badge: Option<String>,
    pub out_of_stock: bool,
    pub affiliate_link: Option<String>,
    pub wishlist: WishlistButton,
}

impl ProductCard {
    #[must_use]
    pub fn new(product: &Product, locale: Locale, in_wishlist: bool) -> Self {
        let badge = if product.is_active {
            product.category.as_ref().map(|c| c.name.clone())
        } else {
            Some(t(locale, "products.out_of_stock").to_owned())
        };

        Self {
            title: product.title.clone(),
            href: Route::ProductDetail.href(locale, Some(&product.id.to_string())),
            image_url: non_empty(&product.image_url),
            description: truncate_text(&strip_html(&product.description), PRODUCT_DESCRIPTION_CHARS),
            price: format_price(&product.price),
            stars: star_glyphs(product.rating),
            review_count: tf(
                locale,
                "products.reviews_count",
                &[("count", &product.reviews.len().to_string())],
            ),
            badge,
            out_of_stock: !product.is_active,
            affiliate_link: non_empty(&product.affiliate_link),
            wishlist: WishlistButton::new(
                WishlistKey::product(product.id.as_i32()),
                in_wishlist,
                locale,
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArticleCard {
    pub title: String,
    pub href: String,
    pub image_url: Option<String>,
    pub excerpt: String,
    pub date: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub wishlist: WishlistButton,
}

impl ArticleCard {
    #[must_use]
    pub fn new(article: &Article, locale: Locale, in_wishlist: bool) -> Self {
        Self {
            title: article.title.clone(),
            href: Route::ArticleDetail.href(locale, Some(&article.slug)),
            image_url: non_empty(&article.image_url),
            excerpt: truncate_text(&strip_html(&article.content), ARTICLE_EXCERPT_CHARS),
            date: format_date(locale, &article.published_at.unwrap_or(article.created_at)),
            author: article
                .author
                .as_ref()
                .map(|author| tf(locale, "articles.by", &[("author", &author.name)])),
            category: article.category.as_ref().map(|c| c.name.clone()),
            wishlist: WishlistButton::new(
                WishlistKey::article(article.id.as_i32()),
                in_wishlist,
                locale,
            ),
        }
    }
}

/// Wishlist membership lookup used while building cards.
pub trait Membership {
    fn contains(&self, kind: WishlistItemKind, id: i32) -> bool;
}

impl<S: crate::stores::Storage> Membership for crate::stores::WishlistStore<S> {
    fn contains(&self, kind: WishlistItemKind, id: i32) -> bool {
        self.is_in_wishlist(kind, id)
    }
}

/// Cards for a list of products.
pub fn product_cards<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    locale: Locale,
    wishlist: &impl Membership,
) -> Vec<ProductCard> {
    products
        .into_iter()
        .map(|p| {
            ProductCard::new(
                p,
                locale,
                wishlist.contains(WishlistItemKind::Product, p.id.as_i32()),
            )
        })
        .collect()
}

/// Cards for a list of articles.
pub fn article_cards<'a>(
    articles: impl IntoIterator<Item = &'a Article>,
    locale: Locale,
    wishlist: &impl Membership,
) -> Vec<ArticleCard> {
    articles
        .into_iter()
        .map(|a| {
            ArticleCard::new(
                a,
                locale,
                wishlist.contains(WishlistItemKind::Article, a.id.as_i32()),
            )
        })
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
