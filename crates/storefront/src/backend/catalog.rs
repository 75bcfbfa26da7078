//! Products, articles and categories.

use reqwest::Method;
use tracing::instrument;

use smarthome_core::{ArticleId, CategoryId, Paginated, ProductId};

use super::client::NO_BODY;
use super::{Article, BackendClient, BackendError, Category, ListParams, PageParams, Product};

impl BackendClient {
    // =========================================================================
    // Products
    // =========================================================================

    /// `GET /products`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope is malformed.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Product>, BackendError> {
        let url = self.endpoint(&["products"], &params.query_pairs())?;
        self.request(Method::GET, url, NO_BODY).await
    }

    /// `GET /products/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, BackendError> {
        let url = self.endpoint(&["products", &id.to_string()], &[])?;
        self.request(Method::GET, url, NO_BODY).await
    }

    /// `GET /products/featured`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn featured_products(&self) -> Result<Vec<Product>, BackendError> {
        let url = self.endpoint(&["products", "featured"], &[])?;
        self.request(Method::GET, url, NO_BODY).await
    }

    /// `GET /products/category/{slug}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope is malformed.
    #[instrument(skip(self))]
    pub async fn products_by_category(
        &self,
        slug: &str,
        params: PageParams,
    ) -> Result<Paginated<Product>, BackendError> {
        let url = self.endpoint(&["products", "category", slug], &params.query_pairs())?;
        self.request(Method::GET, url, NO_BODY).await
    }

    // =========================================================================
    // Articles
    // =========================================================================

    /// `GET /articles`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope is malformed.
    #[instrument(skip(self))]
    pub async fn list_articles(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Article>, BackendError> {
        let url = self.endpoint(&["articles"], &params.query_pairs())?;
        self.request(Method::GET, url, NO_BODY).await
    }

    /// `GET /articles/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the article does not exist or the request fails.
    #[instrument(skip(self), fields(article_id = %id))]
    pub async fn get_article(&self, id: ArticleId) -> Result<Article, BackendError> {
        let url = self.endpoint(&["articles", &id.to_string()], &[])?;
        self.request(Method::GET, url, NO_BODY).await
    }

    /// `GET /articles/slug/{slug}`
    ///
    /// # Errors
    ///
    /// Returns an error if the article does not exist or the request fails.
    #[instrument(skip(self))]
    pub async fn get_article_by_slug(&self, slug: &str) -> Result<Article, BackendError> {
        let url = self.endpoint(&["articles", "slug", slug], &[])?;
        self.request(Method::GET, url, NO_BODY).await
    }

    /// `GET /articles/featured`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn featured_articles(&self) -> Result<Vec<Article>, BackendError> {
        let url = self.endpoint(&["articles", "featured"], &[])?;
        self.request(Method::GET, url, NO_BODY).await
    }

    /// `GET /articles/category/{slug}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope is malformed.
    #[instrument(skip(self))]
    pub async fn articles_by_category(
        &self,
        slug: &str,
        params: PageParams,
    ) -> Result<Paginated<Article>, BackendError> {
        let url = self.endpoint(&["articles", "category", slug], &params.query_pairs())?;
        self.request(Method::GET, url, NO_BODY).await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// `GET /categories`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, BackendError> {
        let url = self.endpoint(&["categories"], &[])?;
        self.request(Method::GET, url, NO_BODY).await
    }

    /// `GET /categories/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist or the request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn get_category(&self, id: CategoryId) -> Result<Category, BackendError> {
        let url = self.endpoint(&["categories", &id.to_string()], &[])?;
        self.request(Method::GET, url, NO_BODY).await
    }

    /// `GET /categories/tree`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn category_tree(&self) -> Result<Vec<Category>, BackendError> {
        let url = self.endpoint(&["categories", "tree"], &[])?;
        self.request(Method::GET, url, NO_BODY).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::BackendConfig;

    fn product_json(id: i32) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Product {id}"),
            "price": "29.99",
            "rating": 4.4,
            "createdAt": "2024-01-05T10:00:00Z",
            "updatedAt": "2024-01-05T10:00:00Z"
        })
    }

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(&BackendConfig {
            api_url: Url::parse(&server.uri()).unwrap(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_products_sends_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("page", "2"))
            .and(query_param("category", "lighting"))
            .and(query_param("search", "bulb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [product_json(1)],
                "totalItems": 13,
                "totalPages": 2,
                "currentPage": 2,
                "itemsPerPage": 12
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server)
            .list_products(&ListParams {
                page: Some(2),
                limit: None,
                category: Some("lighting".to_owned()),
                search: Some("bulb".to_owned()),
            })
            .await
            .unwrap();

        assert_eq!(page.current_page(), 2);
        assert_eq!(page.data().len(), 1);
    }

    #[tokio::test]
    async fn test_inconsistent_envelope_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [],
                "totalItems": 40,
                "totalPages": 1,
                "currentPage": 1,
                "itemsPerPage": 12
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_articles(&ListParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Malformed(_)));
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Product not found"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_product(ProductId::new(404))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "API error: 404 - Product not found");
    }

    #[tokio::test]
    async fn test_article_by_slug_and_category_tree() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles/slug/smart-lighting-guide"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "title": "Smart lighting guide",
                "slug": "smart-lighting-guide",
                "content": "<p>Hello</p>",
                "createdAt": "2024-01-05T10:00:00Z",
                "updatedAt": "2024-01-05T10:00:00Z"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/categories/tree"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Lighting", "slug": "lighting", "children": []}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let article = client
            .get_article_by_slug("smart-lighting-guide")
            .await
            .unwrap();
        assert_eq!(article.id, ArticleId::new(7));

        let tree = client.category_tree().await.unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = BackendClient::new(&BackendConfig {
            api_url: Url::parse("http://127.0.0.1:9").unwrap(),
        })
        .unwrap();
        let err = client.featured_products().await.unwrap_err();
        assert!(matches!(err, BackendError::Network(_)));
    }
}
