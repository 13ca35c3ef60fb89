use snipshare::application::{
    ports::{ClockPort, PasswordHasherPort, TokenManagerPort},
    services::{ApplicationServices, Repositories},
};
use snipshare::config::AppConfig;
use snipshare::domain::slug::SlugGenerator;
use snipshare::infrastructure::{
    database,
    repositories::{
        PostgresSlugStore, PostgresSnippetReadRepository, PostgresSnippetWriteRepository,
        PostgresUserRepository,
    },
    security::{password::Argon2PasswordHasher, token::BiscuitTokenManager},
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use snipshare::presentation::http::{routes::build_router_with_rate_limiter, state::HttpState};
use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let repos = Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        snippet_writes: Arc::new(PostgresSnippetWriteRepository::new(pool.clone())),
        snippet_reads: Arc::new(PostgresSnippetReadRepository::new(pool.clone())),
        slug_store: Arc::new(PostgresSlugStore::new(pool)),
    };

    let password_hasher: Arc<PasswordHasherPort> = Arc::new(Argon2PasswordHasher);
    let token_manager: Arc<TokenManagerPort> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let clock: Arc<ClockPort> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        repos,
        password_hasher,
        token_manager,
        clock,
        slugger,
        config.slug_policy(),
    ));

    let state = HttpState { services };
    let app = build_router_with_rate_limiter(
        state,
        config.allowed_origins(),
        config.rate_limit_enabled(),
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(
        %address,
        max_attempts = config.slug_policy().max_attempts,
        rate_limited = config.rate_limit_enabled(),
        "listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
