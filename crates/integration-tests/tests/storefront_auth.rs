//! Sign-in, account pages and the actions that need a session.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use smarthome_integration_tests::{
    TestApp, category_json, location, page_json, product_json, review_json, user_json,
};

async fn sign_in(app: &TestApp) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "secret-pw"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"token": "jwt", "user": user_json(5, "Ada")})),
        )
        .mount(&app.backend)
        .await;

    let response = app
        .post_form(
            "/en/auth/login",
            &[("email", "ada@example.com"), ("password", "secret-pw")],
        )
        .await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/en");
}

async fn mount_product_list(app: &TestApp) {
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![product_json(42, "Smart Bulb", "19.99")],
            1,
            1,
            12,
        )))
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([category_json(1, "Lighting", "lighting")])),
        )
        .mount(&app.backend)
        .await;
}

#[tokio::test]
async fn test_failed_login_rerenders_form() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid"})))
        .mount(&app.backend)
        .await;

    let response = app
        .post_form(
            "/fr/auth/connexion",
            &[("email", "ada@example.com"), ("password", "wrong")],
        )
        .await;
    assert_eq!(response.status(), 422);
    let body = response.text().await.unwrap();
    assert!(body.contains("E-mail ou mot de passe invalide."));
    assert!(body.contains(r#"value="ada@example.com""#));
}

#[tokio::test]
async fn test_malformed_email_is_rejected_before_the_backend() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.backend)
        .await;

    let response = app
        .post_form("/en/auth/login", &[("email", "ada@localhost"), ("password", "pw")])
        .await;
    assert_eq!(response.status(), 422);
    assert!(response.text().await.unwrap().contains("Please enter a valid email address."));

    let response = app
        .post_form(
            "/en/auth/register",
            &[("name", "Ada"), ("email", "not-an-email"), ("password", "pw")],
        )
        .await;
    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn test_login_sends_normalized_email() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "Ada@example.com", "password": "secret-pw"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"token": "jwt", "user": user_json(5, "Ada")})),
        )
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .post_form(
            "/en/auth/login",
            &[("email", "  Ada@EXAMPLE.com "), ("password", "secret-pw")],
        )
        .await;
    assert_eq!(location(&response), "/en");
}

#[tokio::test]
async fn test_wishlist_toggle_requires_sign_in() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form(
            "/actions/wishlist/toggle",
            &[("item", "product-42"), ("return_to", "/fr/produits")],
        )
        .await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/fr/auth/connexion");

    let body = app.get("/fr/auth/connexion").await.text().await.unwrap();
    assert!(body.contains("Veuillez d"));
}

#[tokio::test]
async fn test_wishlist_toggle_adds_then_removes() {
    let app = TestApp::spawn().await;
    sign_in(&app).await;
    mount_product_list(&app).await;
    Mock::given(method("POST"))
        .and(path("/wishlist/product"))
        .and(header("authorization", "Bearer jwt"))
        .and(body_json(json!({"productId": 42})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&app.backend)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/wishlist/product/42"))
        .and(header("authorization", "Bearer jwt"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.backend)
        .await;

    let toggle = [("item", "product-42"), ("return_to", "/en/products")];

    let response = app.post_form("/actions/wishlist/toggle", &toggle).await;
    assert_eq!(location(&response), "/en/products");

    let body = app.get("/en/products").await.text().await.unwrap();
    assert!(body.contains("Added to your wishlist."));
    assert!(body.contains(r#"aria-pressed="true""#));
    assert!(body.contains("Remove from wishlist"));

    app.post_form("/actions/wishlist/toggle", &toggle).await;
    let body = app.get("/en/products").await.text().await.unwrap();
    assert!(body.contains("Removed from your wishlist."));
    assert!(body.contains(r#"aria-pressed="false""#));
}

#[tokio::test]
async fn test_invalid_wishlist_item_is_rejected() {
    let app = TestApp::spawn().await;
    sign_in(&app).await;

    let response = app
        .post_form(
            "/actions/wishlist/toggle",
            &[("item", "gadget-1"), ("return_to", "/en/wishlist")],
        )
        .await;
    assert_eq!(location(&response), "/en/wishlist");
}

#[tokio::test]
async fn test_review_invalidates_cached_reviews() {
    let app = TestApp::spawn().await;
    sign_in(&app).await;
    Mock::given(method("GET"))
        .and(path("/products/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_json(42, "Smart Bulb", "19.99")),
        )
        .expect(2)
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/reviews/product/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/reviews/product/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([review_json(3, 5, "Love it")])),
        )
        .expect(1)
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/comments/product/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&app.backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/reviews"))
        .and(header("authorization", "Bearer jwt"))
        .and(body_json(json!({"content": "Love it", "rating": 5, "productId": 42})))
        .respond_with(ResponseTemplate::new(201).set_body_json(review_json(3, 5, "Love it")))
        .expect(1)
        .mount(&app.backend)
        .await;

    let body = app.get("/en/products/42").await.text().await.unwrap();
    assert!(body.contains("No reviews yet."));

    let response = app
        .post_form(
            "/actions/reviews",
            &[
                ("product_id", "42"),
                ("rating", "5"),
                ("content", "  Love it  "),
                ("return_to", "/en/products/42"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/en/products/42");

    let body = app.get("/en/products/42").await.text().await.unwrap();
    assert!(body.contains("Thanks for your review!"));
    assert!(body.contains("Love it"));
}

#[tokio::test]
async fn test_out_of_range_rating_is_not_sent() {
    let app = TestApp::spawn().await;
    sign_in(&app).await;
    Mock::given(method("POST"))
        .and(path("/reviews"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.backend)
        .await;

    let response = app
        .post_form(
            "/actions/reviews",
            &[
                ("product_id", "42"),
                ("rating", "6"),
                ("content", "Too good"),
                ("return_to", "/en/products/42"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/en/products/42");
}

#[tokio::test]
async fn test_profile_requires_sign_in() {
    let app = TestApp::spawn().await;

    let response = app.get("/en/profile").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/en/auth/login");

    let body = app.get("/en/auth/login").await.text().await.unwrap();
    assert!(body.contains("Please sign in first."));
}

#[tokio::test]
async fn test_profile_shows_current_user() {
    let app = TestApp::spawn().await;
    sign_in(&app).await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(5, "Ada")))
        .mount(&app.backend)
        .await;

    let response = app.get("/fr/profil").await;
    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("ada@example.com"));
    assert!(body.contains("Abonné"));
}

#[tokio::test]
async fn test_rejected_token_signs_out_locally() {
    let app = TestApp::spawn().await;
    sign_in(&app).await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.backend)
        .await;

    let response = app.get("/en/profile").await;
    assert_eq!(location(&response), "/en/auth/login");

    let body = app.get("/en/auth/login").await.text().await.unwrap();
    assert!(body.contains("Your session has expired, please sign in again."));

    let response = app.get("/en/profile").await;
    assert_eq!(location(&response), "/en/auth/login");
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = TestApp::spawn().await;
    sign_in(&app).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", "Bearer jwt"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .post_form("/actions/auth/logout", &[("return_to", "/ar")])
        .await;
    assert_eq!(location(&response), "/ar");

    let response = app.get("/en/profile").await;
    assert_eq!(location(&response), "/en/auth/login");
}
