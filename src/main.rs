use anyhow::Context;
use bookshelf_app::modules;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;

    bookshelf_telemetry::init(&settings.telemetry)
        .with_context(|| "failed to initialize logging")?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.endpoint(),
        "bookshelf bootstrap starting"
    );

    let pool = bookshelf_db::connect(&settings.database).await?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, pool.clone());

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("bookshelf bootstrap complete");

    let served = bookshelf_http::start_server(&registry, &settings, shutdown_signal()).await;
    if let Err(e) = &served {
        tracing::error!(error = %format!("{e:#}"), "server terminated");
    }

    registry.stop_modules().await?;
    pool.close().await;

    served
}

/// Resolves on Ctrl-C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "unable to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
