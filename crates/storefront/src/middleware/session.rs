//! Session middleware configuration.
//!
//! The persisted stores live in the session. Sessions are kept in
//! `PostgreSQL` when a database is configured, in memory otherwise.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "smarthome_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer over `store`.
///
/// # Arguments
///
/// * `store` - Session store (`PostgresStore` or `MemoryStore`)
/// * `config` - Storefront configuration (for the `Secure` flag)
#[must_use]
pub fn create_session_layer<Store>(
    store: Store,
    config: &StorefrontConfig,
) -> SessionManagerLayer<Store>
where
    Store: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Connect to the session database and create the sessions table.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the migration fails.
pub async fn connect_postgres_store(
    config: &StorefrontConfig,
) -> Result<Option<(PgPool, PostgresStore)>, sqlx::Error> {
    let Some(database_url) = &config.database_url else {
        return Ok(None);
    };

    let pool = PgPool::connect(database_url.expose_secret()).await?;
    let store = PostgresStore::new(pool.clone());
    store.migrate().await?;
    Ok(Some((pool, store)))
}
