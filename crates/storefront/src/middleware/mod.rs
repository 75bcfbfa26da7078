//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions, `PostgreSQL` or in-memory store)
//! 5. Security headers (CSP, frame denial, etc.)
//! 6. Rate limiting (governor) on login, registration and newsletter posts
//!
//! Extractors: [`PageContext`] for pages and actions, [`RequireAuth`] for
//! pages that need a signed-in visitor.

pub mod auth;
pub mod page_context;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{RequireAuth, SignedIn};
pub use page_context::{Flash, FlashKind, PageContext, locale_from_path, safe_return_to, set_flash};
pub use rate_limit::{auth_rate_limiter, form_rate_limiter};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{connect_postgres_store, create_session_layer};
