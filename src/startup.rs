//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    AuthService, AuthServiceImpl, BlogService, BlogServiceImpl, CredentialService,
};
use crate::config::{Settings, StorageBackend};
use crate::domain::{BlogRepository, UserRepository};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{
    InMemoryBlogRepository, InMemoryUserRepository, PgBlogRepository, PgUserRepository,
};
use crate::presentation::http::create_router;
use crate::presentation::http::handlers::health;
use crate::presentation::middleware::{create_cors_layer, create_trace_layer};
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub blogs: Arc<dyn BlogService>,
    /// Present only for the PostgreSQL backend
    pub db: Option<PgPool>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire services over PostgreSQL repositories.
    pub fn from_pool(pool: PgPool, settings: Settings) -> Self {
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let blogs = Arc::new(PgBlogRepository::new(pool.clone()));
        Self::wire(users, blogs, Some(pool), settings)
    }

    /// Wire services over process-local repositories.
    pub fn in_memory(settings: Settings) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let blogs = Arc::new(InMemoryBlogRepository::new());
        Self::wire(users, blogs, None, settings)
    }

    fn wire<U, B>(users: Arc<U>, blogs: Arc<B>, db: Option<PgPool>, settings: Settings) -> Self
    where
        U: UserRepository + 'static,
        B: BlogRepository + 'static,
    {
        let id_generator = Arc::new(SnowflakeGenerator::new(
            u64::from(settings.snowflake.machine_id),
            settings.snowflake.epoch,
        ));

        let auth = AuthServiceImpl::new(
            users.clone(),
            CredentialService::new(&settings.jwt),
            id_generator.clone(),
        );
        let blog_service = BlogServiceImpl::new(blogs, users, id_generator);

        Self {
            auth: Arc::new(auth),
            blogs: Arc::new(blog_service),
            db,
            settings: Arc::new(settings),
        }
    }
}

/// Full router with tracing and CORS layers applied
pub fn build_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.cors);

    create_router(state)
        .layer(create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let state = match settings.storage.backend {
            StorageBackend::Postgres => {
                let db = database::create_pool(&settings.database).await?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&db).await?;
                    tracing::info!("Database migrations applied");
                }

                AppState::from_pool(db, settings.clone())
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                AppState::in_memory(settings.clone())
            }
        };

        let router = build_router(state);

        let listener = TcpListener::bind(settings.server_addr()).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until Ctrl+C
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
