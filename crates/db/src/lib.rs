//! PostgreSQL connection pool built from [`DatabaseSettings`].

use anyhow::Context;
use bookshelf_kernel::settings::DatabaseSettings;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};

/// Translate settings into driver connect options.
pub fn connect_options(settings: &DatabaseSettings) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.name)
        .ssl_mode(PgSslMode::Disable)
}

/// Open the shared connection pool. Fails when the store is unreachable.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<PgPool> {
    tracing::info!(
        target: "bookshelf-db",
        endpoint = %settings.endpoint(),
        "connecting to database"
    );

    let pool = PgPoolOptions::new()
        .connect_with(connect_options(settings))
        .await
        .with_context(|| format!("DB connection failed: {}", settings.endpoint()))?;

    tracing::info!(target: "bookshelf-db", "database pool ready");
    Ok(pool)
}
