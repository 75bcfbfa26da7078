//! Integration tests for the SmartHome Hub storefront.
//!
//! Each test starts the full storefront router on an ephemeral port in front
//! of a [`wiremock`] backend, then drives it over HTTP with a client that
//! keeps the session cookie and does not follow redirects.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p smarthome-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_pages` - Localized routing and page rendering
//! - `storefront_auth` - Sign-in, wishlist and community actions

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;

use reqwest::redirect::Policy;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_sessions::MemoryStore;
use url::Url;
use wiremock::MockServer;

use smarthome_storefront::config::StorefrontConfig;
use smarthome_storefront::routes::build_router;
use smarthome_storefront::state::AppState;

/// A running storefront and the backend it talks to.
pub struct TestApp {
    pub backend: MockServer,
    pub client: reqwest::Client,
    addr: SocketAddr,
}

impl TestApp {
    /// Start with the default test configuration.
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Start after adjusting the configuration.
    pub async fn spawn_with(configure: impl FnOnce(&mut StorefrontConfig)) -> Self {
        let backend = MockServer::start().await;
        let mut config = StorefrontConfig::for_backend(Url::parse(&backend.uri()).unwrap());
        configure(&mut config);

        let state = AppState::new(config, None).unwrap();
        let app = build_router(state, MemoryStore::default());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .unwrap();

        Self {
            backend,
            client,
            addr,
        }
    }

    /// Absolute URL for `path` on the storefront.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .unwrap()
    }
}

/// `Location` header of a redirect response.
#[must_use]
pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

// =============================================================================
// Backend fixtures
// =============================================================================

const TIMESTAMP: &str = "2024-03-02T09:30:00Z";

#[must_use]
pub fn user_json(id: i32, name: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{}@example.com", name.to_lowercase()),
        "name": name,
        "roles": ["user"],
        "newsletterOptIn": true,
        "createdAt": TIMESTAMP,
        "updatedAt": TIMESTAMP
    })
}

#[must_use]
pub fn category_json(id: i32, name: &str, slug: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "slug": slug,
        "metaDescription": format!("Everything about {name}"),
        "children": []
    })
}

#[must_use]
pub fn product_json(id: i32, title: &str, price: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("<p>{title} works with every hub.</p>"),
        "imageUrl": format!("https://cdn.example.com/{id}.jpg"),
        "affiliateLink": format!("https://shop.example.com/{id}"),
        "price": price,
        "rating": 4.5,
        "category": category_json(1, "Lighting", "lighting"),
        "sku": format!("SKU-{id}"),
        "isActive": true,
        "createdAt": TIMESTAMP,
        "updatedAt": TIMESTAMP
    })
}

#[must_use]
pub fn article_json(id: i32, title: &str, slug: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "slug": slug,
        "imageUrl": "",
        "content": format!("<h2>{title}</h2><p>Setup guide.</p>"),
        "author": user_json(9, "Grace"),
        "publishedAt": TIMESTAMP,
        "createdAt": TIMESTAMP,
        "updatedAt": TIMESTAMP
    })
}

#[must_use]
pub fn review_json(id: i32, rating: u8, content: &str) -> Value {
    json!({
        "id": id,
        "content": content,
        "rating": rating,
        "user": user_json(5, "Ada"),
        "createdAt": TIMESTAMP,
        "updatedAt": TIMESTAMP
    })
}

/// Backend pagination envelope for one page of `items`.
#[must_use]
pub fn page_json(items: Vec<Value>, total_items: u64, current_page: u32, per_page: u32) -> Value {
    let total_pages = u32::try_from(total_items.div_ceil(u64::from(per_page))).unwrap();
    json!({
        "data": items,
        "totalItems": total_items,
        "totalPages": total_pages,
        "currentPage": current_page,
        "itemsPerPage": per_page
    })
}
