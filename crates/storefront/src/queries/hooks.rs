use std::sync::Arc;

use smarthome_core::{ArticleId, CategoryId, Paginated, ProductId, UserId};

use super::{QueryClient, QueryState, keys};
use crate::backend::{
    Article, BackendClient, Category, Comment, ListParams, PageParams, Product, Review, User,
    Wishlist,
};

/// Typed reads over the shared [`QueryClient`].
///
/// Each method maps to one backend read and one [`keys`] entry. Reads whose
/// identifying parameter is empty are disabled and return
/// [`QueryState::idle`] without a request.
#[derive(Clone)]
pub struct Queries {
    pub(super) client: QueryClient,
    pub(super) backend: BackendClient,
}

impl Queries {
    #[must_use]
    pub const fn new(client: QueryClient, backend: BackendClient) -> Self {
        Self { client, backend }
    }

    #[must_use]
    pub const fn client(&self) -> &QueryClient {
        &self.client
    }

    #[must_use]
    pub const fn backend(&self) -> &BackendClient {
        &self.backend
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub async fn products(&self, params: &ListParams) -> QueryState<Arc<Paginated<Product>>> {
        self.client
            .read(keys::products(params), self.backend.list_products(params))
            .await
    }

    pub async fn product(&self, id: ProductId) -> QueryState<Arc<Product>> {
        self.client
            .read(keys::product(id), self.backend.get_product(id))
            .await
    }

    pub async fn featured_products(&self) -> QueryState<Arc<Vec<Product>>> {
        self.client
            .read(keys::featured_products(), self.backend.featured_products())
            .await
    }

    pub async fn products_by_category(
        &self,
        slug: &str,
        params: PageParams,
    ) -> QueryState<Arc<Paginated<Product>>> {
        if slug.trim().is_empty() {
            return QueryState::idle();
        }
        self.client
            .read(
                keys::products_by_category(slug, params),
                self.backend.products_by_category(slug, params),
            )
            .await
    }

    // =========================================================================
    // Articles
    // =========================================================================

    pub async fn articles(&self, params: &ListParams) -> QueryState<Arc<Paginated<Article>>> {
        self.client
            .read(keys::articles(params), self.backend.list_articles(params))
            .await
    }

    pub async fn article(&self, id: ArticleId) -> QueryState<Arc<Article>> {
        self.client
            .read(keys::article(id), self.backend.get_article(id))
            .await
    }

    pub async fn article_by_slug(&self, slug: &str) -> QueryState<Arc<Article>> {
        if slug.trim().is_empty() {
            return QueryState::idle();
        }
        self.client
            .read(
                keys::article_by_slug(slug),
                self.backend.get_article_by_slug(slug),
            )
            .await
    }

    pub async fn featured_articles(&self) -> QueryState<Arc<Vec<Article>>> {
        self.client
            .read(keys::featured_articles(), self.backend.featured_articles())
            .await
    }

    pub async fn articles_by_category(
        &self,
        slug: &str,
        params: PageParams,
    ) -> QueryState<Arc<Paginated<Article>>> {
        if slug.trim().is_empty() {
            return QueryState::idle();
        }
        self.client
            .read(
                keys::articles_by_category(slug, params),
                self.backend.articles_by_category(slug, params),
            )
            .await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub async fn categories(&self) -> QueryState<Arc<Vec<Category>>> {
        self.client
            .read(keys::categories(), self.backend.list_categories())
            .await
    }

    pub async fn category_tree(&self) -> QueryState<Arc<Vec<Category>>> {
        self.client
            .read(keys::category_tree(), self.backend.category_tree())
            .await
    }

    pub async fn category(&self, id: CategoryId) -> QueryState<Arc<Category>> {
        self.client
            .read(keys::category(id), self.backend.get_category(id))
            .await
    }

    // =========================================================================
    // Comments & reviews
    // =========================================================================

    pub async fn product_comments(&self, id: ProductId) -> QueryState<Arc<Vec<Comment>>> {
        self.client
            .read(keys::product_comments(id), self.backend.product_comments(id))
            .await
    }

    pub async fn article_comments(&self, id: ArticleId) -> QueryState<Arc<Vec<Comment>>> {
        self.client
            .read(keys::article_comments(id), self.backend.article_comments(id))
            .await
    }

    pub async fn product_reviews(&self, id: ProductId) -> QueryState<Arc<Vec<Review>>> {
        self.client
            .read(keys::product_reviews(id), self.backend.product_reviews(id))
            .await
    }

    // =========================================================================
    // Signed-in visitor
    // =========================================================================

    /// Server wishlist of `user`, read with their token.
    pub async fn wishlist(&self, user: UserId, token: &str) -> QueryState<Arc<Wishlist>> {
        let backend = self.backend.with_token(token);
        self.client
            .read(keys::wishlist(user), backend.get_wishlist())
            .await
    }

    /// Current user as the backend sees `token`.
    pub async fn me(&self, user: UserId, token: &str) -> QueryState<Arc<User>> {
        let backend = self.backend.with_token(token);
        self.client.read(keys::me(user), backend.me()).await
    }
}
