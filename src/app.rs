/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (PostRepository) → Router 組み立て
 * - Middleware の適用 (HTTP / CORS / security headers)
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{api, config::Config, middleware, repos, state::AppState};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,posts_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,posts_api=debug,tower_http=info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched.
        tracing::error!(?info, "panic");

        // development: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {} ({:?} storage)",
        config.app_env,
        config.addr,
        config.storage
    );

    let posts = repos::build_post_repo(&config).await?;
    let app = build_router(AppState::new(posts), &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(api::handlers::health::health))
        .nest("/api", api::routes())
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
