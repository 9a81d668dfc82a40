//! Application state - shared across all handlers.

use std::sync::Arc;

use yatube_core::ports::{
    GroupRepository, PasswordService, PostRepository, TokenService, UserRepository,
};
use yatube_core::{AccountService, Paginator, PostService};
use yatube_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use yatube_infra::database::{
    DatabaseConfig, InMemoryGroupRepository, InMemoryPostRepository, InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
use yatube_infra::database::{
    DatabaseConnections, PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub post_service: PostService,
    pub accounts: AccountService,
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub token_service: Arc<dyn TokenService>,
    pub password_service: Arc<dyn PasswordService>,
}

/// The three repositories the pages are served from.
struct Repositories {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            groups: Arc::new(InMemoryGroupRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    async fn connect(config: Option<&DatabaseConfig>) -> Self {
        let Some(config) = config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory();
        };

        match DatabaseConnections::init(config).await {
            Ok(connections) => Self {
                posts: Arc::new(PostgresPostRepository::new(connections.main.clone())),
                groups: Arc::new(PostgresGroupRepository::new(connections.main.clone())),
                users: Arc::new(PostgresUserRepository::new(connections.main)),
            },
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect(config: Option<&DatabaseConfig>) -> Self {
        if config.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::in_memory()
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let repos = Repositories::connect(config.database.as_ref()).await;
        let state = Self::assemble(
            repos,
            Paginator::new(config.posts_per_page),
            Arc::new(JwtTokenService::new(config.jwt.clone())),
        );

        tracing::info!(
            posts_per_page = config.posts_per_page.get(),
            "Application state initialized"
        );
        state
    }

    /// State backed by fresh in-memory repositories.
    pub fn in_memory(paginator: Paginator, jwt: JwtConfig) -> Self {
        Self::assemble(
            Repositories::in_memory(),
            paginator,
            Arc::new(JwtTokenService::new(jwt)),
        )
    }

    fn assemble(
        repos: Repositories,
        paginator: Paginator,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        let post_service = PostService::new(
            repos.posts.clone(),
            repos.groups.clone(),
            repos.users.clone(),
            paginator,
        );

        let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let accounts = AccountService::new(
            repos.users.clone(),
            password_service.clone(),
            token_service.clone(),
        );

        Self {
            post_service,
            accounts,
            posts: repos.posts,
            users: repos.users,
            groups: repos.groups,
            token_service,
            password_service,
        }
    }
}
