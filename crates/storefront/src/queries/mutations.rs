//! Writes against the backend and the cache entries they invalidate.

use smarthome_core::{ArticleId, Email, ProductId, WishlistItemKind, WishlistKey};
use tracing::{info, instrument, warn};

use super::{MutationError, Queries, keys};
use crate::backend::{
    AuthResponse, BackendError, Comment, CreateCommentRequest, CreateReviewRequest, LoginRequest,
    Newsletter, RegisterRequest, Review, User,
};
use crate::stores::{AuthStore, Storage, WishlistStore};

impl Queries {
    // =========================================================================
    // Auth
    // =========================================================================

    /// Sign in and record the session in the auth store.
    ///
    /// # Errors
    ///
    /// Returns the backend error (401 for bad credentials) or a store error.
    #[instrument(skip_all)]
    pub async fn login<S: Storage>(
        &self,
        auth: &mut AuthStore<S>,
        request: &LoginRequest,
    ) -> Result<User, MutationError> {
        let response = self.backend.login(request).await?;
        self.sign_in(auth, response).await
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns the backend error or a store error.
    #[instrument(skip_all)]
    pub async fn register<S: Storage>(
        &self,
        auth: &mut AuthStore<S>,
        request: &RegisterRequest,
    ) -> Result<User, MutationError> {
        let response = self.backend.register(request).await?;
        self.sign_in(auth, response).await
    }

    async fn sign_in<S: Storage>(
        &self,
        auth: &mut AuthStore<S>,
        response: AuthResponse,
    ) -> Result<User, MutationError> {
        let AuthResponse { token, user } = response;
        self.client.invalidate(&keys::me(user.id)).await;
        auth.set_auth(user.clone(), token).await?;
        info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    /// Sign out with the backend and clear the auth store.
    ///
    /// A token the backend already rejects is cleared locally as well.
    ///
    /// # Errors
    ///
    /// Returns the backend error for any other failure, leaving the store
    /// untouched.
    #[instrument(skip_all)]
    pub async fn logout<S: Storage>(&self, auth: &mut AuthStore<S>) -> Result<(), MutationError> {
        if let (Some(token), Some(user)) = (auth.token(), auth.user()) {
            let user_id = user.id;
            match self.backend.with_token(token).logout().await {
                Ok(()) => {}
                Err(e) if e.is_unauthorized() => {
                    warn!(user_id = %user_id, "Token already rejected, signing out locally");
                }
                Err(e) => return Err(e.into()),
            }
            self.client.invalidate(&keys::me(user_id)).await;
            self.client.invalidate(&keys::wishlist(user_id)).await;
        }
        auth.logout().await?;
        Ok(())
    }

    // =========================================================================
    // Reviews & comments
    // =========================================================================

    /// # Errors
    ///
    /// Returns the backend error.
    #[instrument(skip(self, token, request), fields(product_id = %request.product_id))]
    pub async fn create_review(
        &self,
        token: &str,
        request: &CreateReviewRequest,
    ) -> Result<Review, BackendError> {
        let review = self.backend.with_token(token).create_review(request).await?;
        self.client
            .invalidate(&keys::product_reviews(request.product_id))
            .await;
        self.client.invalidate(&keys::product(request.product_id)).await;
        Ok(review)
    }

    /// # Errors
    ///
    /// Returns the backend error.
    #[instrument(skip(self, token, request))]
    pub async fn create_comment(
        &self,
        token: &str,
        request: &CreateCommentRequest,
    ) -> Result<Comment, BackendError> {
        let comment = self
            .backend
            .with_token(token)
            .create_comment(request)
            .await?;
        if let Some(id) = request.product_id {
            self.client.invalidate(&keys::product_comments(id)).await;
        }
        if let Some(id) = request.article_id {
            self.client.invalidate(&keys::article_comments(id)).await;
        }
        Ok(comment)
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Add `key` to the server wishlist, then to the local store.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Unauthenticated`] without a session, or the
    /// backend or store error.
    #[instrument(skip(self, auth, wishlist), fields(item = %key))]
    pub async fn add_to_wishlist<S: Storage>(
        &self,
        auth: &AuthStore<S>,
        wishlist: &mut WishlistStore<S>,
        key: WishlistKey,
    ) -> Result<(), MutationError> {
        let (user, token) = signed_in(auth)?;
        let backend = self.backend.with_token(token);
        match key.kind() {
            WishlistItemKind::Product => backend.add_product_to_wishlist(ProductId::new(key.id())).await?,
            WishlistItemKind::Article => backend.add_article_to_wishlist(ArticleId::new(key.id())).await?,
        }
        self.client.invalidate(&keys::wishlist(user.id)).await;
        wishlist.add_item(key).await?;
        Ok(())
    }

    /// Remove `key` from the server wishlist, then from the local store.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Unauthenticated`] without a session, or the
    /// backend or store error.
    #[instrument(skip(self, auth, wishlist), fields(item = %key))]
    pub async fn remove_from_wishlist<S: Storage>(
        &self,
        auth: &AuthStore<S>,
        wishlist: &mut WishlistStore<S>,
        key: WishlistKey,
    ) -> Result<(), MutationError> {
        let (user, token) = signed_in(auth)?;
        let backend = self.backend.with_token(token);
        match key.kind() {
            WishlistItemKind::Product => {
                backend
                    .remove_product_from_wishlist(ProductId::new(key.id()))
                    .await?;
            }
            WishlistItemKind::Article => {
                backend
                    .remove_article_from_wishlist(ArticleId::new(key.id()))
                    .await?;
            }
        }
        self.client.invalidate(&keys::wishlist(user.id)).await;
        wishlist.remove_item(key).await?;
        Ok(())
    }

    /// Add `key` when the local store does not hold it, remove it otherwise.
    /// Returns the new membership.
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_to_wishlist`] and [`Self::remove_from_wishlist`].
    pub async fn toggle_wishlist<S: Storage>(
        &self,
        auth: &AuthStore<S>,
        wishlist: &mut WishlistStore<S>,
        key: WishlistKey,
    ) -> Result<bool, MutationError> {
        if wishlist.is_in_wishlist(key.kind(), key.id()) {
            self.remove_from_wishlist(auth, wishlist, key).await?;
            Ok(false)
        } else {
            self.add_to_wishlist(auth, wishlist, key).await?;
            Ok(true)
        }
    }

    // =========================================================================
    // Newsletter
    // =========================================================================

    /// # Errors
    ///
    /// Returns the backend error.
    pub async fn subscribe_newsletter(&self, email: &Email) -> Result<Newsletter, BackendError> {
        self.backend.subscribe_newsletter(email.as_str()).await
    }

    /// # Errors
    ///
    /// Returns the backend error.
    pub async fn unsubscribe_newsletter(&self, token: &str) -> Result<(), BackendError> {
        self.backend.unsubscribe_newsletter(token).await
    }
}

fn signed_in<S: Storage>(auth: &AuthStore<S>) -> Result<(&User, &str), MutationError> {
    match (auth.user(), auth.token()) {
        (Some(user), Some(token)) if auth.is_authenticated() => Ok((user, token)),
        _ => Err(MutationError::Unauthenticated),
    }
}
