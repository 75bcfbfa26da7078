//! Authentication, wishlist and newsletter endpoints.

use reqwest::Method;
use serde_json::json;
use tracing::instrument;

use smarthome_core::{ArticleId, ProductId};

use super::client::NO_BODY;
use super::{
    AuthResponse, BackendClient, BackendError, LoginRequest, Newsletter, RegisterRequest, User,
    Wishlist,
};

impl BackendClient {
    // =========================================================================
    // Auth
    // =========================================================================

    /// `POST /auth/login`
    ///
    /// # Errors
    ///
    /// Returns an API error with status 401 for bad credentials.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, BackendError> {
        let url = self.endpoint(&["auth", "login"], &[])?;
        self.request(Method::POST, url, Some(request)).await
    }

    /// `POST /auth/register`
    ///
    /// # Errors
    ///
    /// Returns an API error if the backend rejects the registration.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, BackendError> {
        let url = self.endpoint(&["auth", "register"], &[])?;
        self.request(Method::POST, url, Some(request)).await
    }

    /// `GET /auth/me` (authenticated)
    ///
    /// # Errors
    ///
    /// Returns an API error with status 401 when the token is no longer valid.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User, BackendError> {
        let url = self.endpoint(&["auth", "me"], &[])?;
        self.request(Method::GET, url, NO_BODY).await
    }

    /// `POST /auth/logout` (authenticated)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), BackendError> {
        let url = self.endpoint(&["auth", "logout"], &[])?;
        self.request_empty(Method::POST, url, NO_BODY).await
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// `GET /wishlist` (authenticated)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_wishlist(&self) -> Result<Wishlist, BackendError> {
        let url = self.endpoint(&["wishlist"], &[])?;
        self.request(Method::GET, url, NO_BODY).await
    }

    /// `POST /wishlist/product` (authenticated)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add_product_to_wishlist(&self, id: ProductId) -> Result<(), BackendError> {
        let url = self.endpoint(&["wishlist", "product"], &[])?;
        self.request_empty(Method::POST, url, Some(&json!({ "productId": id })))
            .await
    }

    /// `DELETE /wishlist/product/{id}` (authenticated)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove_product_from_wishlist(&self, id: ProductId) -> Result<(), BackendError> {
        let url = self.endpoint(&["wishlist", "product", &id.to_string()], &[])?;
        self.request_empty(Method::DELETE, url, NO_BODY).await
    }

    /// `POST /wishlist/article` (authenticated)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(article_id = %id))]
    pub async fn add_article_to_wishlist(&self, id: ArticleId) -> Result<(), BackendError> {
        let url = self.endpoint(&["wishlist", "article"], &[])?;
        self.request_empty(Method::POST, url, Some(&json!({ "articleId": id })))
            .await
    }

    /// `DELETE /wishlist/article/{id}` (authenticated)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(article_id = %id))]
    pub async fn remove_article_from_wishlist(&self, id: ArticleId) -> Result<(), BackendError> {
        let url = self.endpoint(&["wishlist", "article", &id.to_string()], &[])?;
        self.request_empty(Method::DELETE, url, NO_BODY).await
    }

    // =========================================================================
    // Newsletter
    // =========================================================================

    /// `POST /newsletter/subscribe`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the email.
    #[instrument(skip(self))]
    pub async fn subscribe_newsletter(&self, email: &str) -> Result<Newsletter, BackendError> {
        let url = self.endpoint(&["newsletter", "subscribe"], &[])?;
        self.request(Method::POST, url, Some(&json!({ "email": email })))
            .await
    }

    /// `POST /newsletter/unsubscribe`
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unknown or the request fails.
    #[instrument(skip(self, token))]
    pub async fn unsubscribe_newsletter(&self, token: &str) -> Result<(), BackendError> {
        let url = self.endpoint(&["newsletter", "unsubscribe"], &[])?;
        self.request_empty(Method::POST, url, Some(&json!({ "token": token })))
            .await
    }
}
