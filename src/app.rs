/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config -> pool + migrations + seed data -> services -> AppState
 * - Router assembly and middleware order
 * - axum::serve() with graceful shutdown
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    services::{
        auth::{
            AuthenticationService, AuthorityUtils, JwtTokenizer, PasswordEncoder, PgMemberLookup,
            SecurityPolicy,
        },
        color_seed,
    },
    state::AppState,
};

fn init_tracing() {
    // RUST_LOG wins, e.g. RUST_LOG=info,band_api=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development fails fast; production keeps serving
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("invalid configuration")?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting band-api in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let db = connect(&config).await?;
    let state = build_state(db, &config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn connect(config: &Config) -> Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("failed to run migrations")?;

    color_seed::seed_default_colors(&db)
        .await
        .context("failed to seed background colors")?;

    Ok(db)
}

fn build_state(db: PgPool, config: &Config) -> Result<AppState> {
    let tokenizer = Arc::new(
        JwtTokenizer::new(
            &config.jwt_secret_key,
            config.access_token_expiration_minutes,
            config.refresh_token_expiration_minutes,
        )
        .context("invalid JWT settings")?,
    );
    let passwords = PasswordEncoder::new(config.bcrypt_cost);
    let authentication = Arc::new(AuthenticationService::new(
        Arc::new(PgMemberLookup::new(db.clone())),
        passwords,
        tokenizer.clone(),
    ));

    Ok(AppState::new(
        db,
        tokenizer,
        authentication,
        SecurityPolicy::standard(),
        passwords,
        AuthorityUtils::new(&config.admin_emails),
    ))
}

/// Outermost first: http (request id, trace, limits) -> security headers -> CORS
/// -> token verification -> authorization -> routes.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = middleware::auth::apply(api::routes(), state.clone()).with_state(state);
    let router = middleware::cors::apply(router, config);
    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
