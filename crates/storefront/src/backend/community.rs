//! Comments and reviews.

use reqwest::Method;
use tracing::instrument;

use smarthome_core::{ArticleId, ProductId};

use super::client::NO_BODY;
use super::{
    BackendClient, BackendError, Comment, CreateCommentRequest, CreateReviewRequest, Review,
};

impl BackendClient {
    /// `POST /comments` (authenticated)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        request: &CreateCommentRequest,
    ) -> Result<Comment, BackendError> {
        let url = self.endpoint(&["comments"], &[])?;
        self.request(Method::POST, url, Some(request)).await
    }

    /// `GET /comments/product/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product_comments(&self, id: ProductId) -> Result<Vec<Comment>, BackendError> {
        let url = self.endpoint(&["comments", "product", &id.to_string()], &[])?;
        self.request(Method::GET, url, NO_BODY).await
    }

    /// `GET /comments/article/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(article_id = %id))]
    pub async fn article_comments(&self, id: ArticleId) -> Result<Vec<Comment>, BackendError> {
        let url = self.endpoint(&["comments", "article", &id.to_string()], &[])?;
        self.request(Method::GET, url, NO_BODY).await
    }

    /// `POST /reviews` (authenticated)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, request), fields(product_id = %request.product_id))]
    pub async fn create_review(&self, request: &CreateReviewRequest) -> Result<Review, BackendError> {
        let url = self.endpoint(&["reviews"], &[])?;
        self.request(Method::POST, url, Some(request)).await
    }

    /// `GET /reviews/product/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product_reviews(&self, id: ProductId) -> Result<Vec<Review>, BackendError> {
        let url = self.endpoint(&["reviews", "product", &id.to_string()], &[])?;
        self.request(Method::GET, url, NO_BODY).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::BackendConfig;

    #[tokio::test]
    async fn test_create_review_sends_token_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reviews"))
            .and(header("authorization", "Bearer tok-123"))
            .and(body_json(json!({"content": "Great hub", "rating": 5, "productId": 42})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 9,
                "content": "Great hub",
                "rating": 5,
                "createdAt": "2024-01-05T10:00:00Z",
                "updatedAt": "2024-01-05T10:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BackendClient::new(&BackendConfig {
            api_url: Url::parse(&server.uri()).unwrap(),
        })
        .unwrap()
        .with_token("tok-123");

        let review = client
            .create_review(&CreateReviewRequest {
                content: "Great hub".to_owned(),
                rating: 5,
                product_id: ProductId::new(42),
            })
            .await
            .unwrap();
        assert_eq!(review.rating, 5);
    }

    #[tokio::test]
    async fn test_unauthenticated_comment_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/comments"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
            .mount(&server)
            .await;

        let client = BackendClient::new(&BackendConfig {
            api_url: Url::parse(&server.uri()).unwrap(),
        })
        .unwrap();

        let err = client
            .create_comment(&CreateCommentRequest {
                content: "hi".to_owned(),
                product_id: Some(ProductId::new(1)),
                article_id: None,
            })
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }
}
