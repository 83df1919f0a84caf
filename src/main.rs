use anyhow::Result;
use axum::{ServiceExt, body::Body};
use gazette_core::application::{
    ports::{security::TokenManager, time::Clock, util::SlugGenerator},
    services::{ApplicationServices, ServiceSettings},
};
use gazette_core::config::{AppConfig, StorageBackend};
use gazette_core::domain::{
    article::{ArticleReadRepository, ArticleWriteRepository},
    comment::CommentRepository,
    taxonomy::{CategoryRepository, TagRepository},
};
use gazette_core::infrastructure::{
    database,
    repositories::{
        InMemoryStore, PostgresArticleReadRepository, PostgresArticleWriteRepository,
        PostgresCategoryRepository, PostgresCommentRepository, PostgresTagRepository,
    },
    security::token::BiscuitTokenManager,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use gazette_core::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct Repositories {
    article_write: Arc<dyn ArticleWriteRepository>,
    article_read: Arc<dyn ArticleReadRepository>,
    comments: Arc<dyn CommentRepository>,
    tags: Arc<dyn TagRepository>,
    categories: Arc<dyn CategoryRepository>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env()?;
    let repos = open_repositories(&config).await?;

    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        repos.article_write,
        repos.article_read,
        repos.comments,
        repos.tags,
        repos.categories,
        token_manager,
        clock,
        slugger,
        ServiceSettings {
            articles_per_page: config.articles_per_page(),
            comment_max_length: config.comment_max_length(),
        },
    ));

    let state = HttpState {
        services,
        allowed_origins: config.allowed_origins().into(),
    };

    let app = build_router(state);
    let service = app.into_service::<Body>().into_make_service();

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn open_repositories(config: &AppConfig) -> Result<Repositories> {
    match config.storage_backend() {
        StorageBackend::Postgres => {
            let pool = database::init_pool(config.database_url()).await?;
            database::run_migrations(&pool).await?;
            tracing::info!("using postgres storage");
            Ok(Repositories {
                article_write: Arc::new(PostgresArticleWriteRepository::new(pool.clone())),
                article_read: Arc::new(PostgresArticleReadRepository::new(pool.clone())),
                comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
                tags: Arc::new(PostgresTagRepository::new(pool.clone())),
                categories: Arc::new(PostgresCategoryRepository::new(pool)),
            })
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on shutdown");
            let store = Arc::new(InMemoryStore::new());
            Ok(Repositories {
                article_write: store.clone(),
                article_read: store.clone(),
                comments: store.clone(),
                tags: store.clone(),
                categories: store,
            })
        }
    }
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
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
