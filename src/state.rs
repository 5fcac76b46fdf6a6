use std::sync::Arc;

use anyhow::{Context, bail};
use tracing::{info, warn};

use genixhub_auth::TokenService;
use genixhub_config::{CorsConfig, Environment, JwtConfig, ServerConfig, StorageBackend};
use genixhub_db::{AccountStore, MemoryAccountStore, PgAccountStore, init_db_pool, run_migrations};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AccountStore>,
    pub tokens: TokenService,
    pub server_config: ServerConfig,
    pub cors_config: CorsConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("server_config", &self.server_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        store: Arc<dyn AccountStore>,
        jwt_config: &JwtConfig,
        server_config: ServerConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            store,
            tokens: TokenService::new(jwt_config),
            server_config,
            cors_config,
        }
    }
}

/// Production must not sign tokens with the built-in development secrets.
pub fn check_jwt_secrets(environment: Environment, jwt_config: &JwtConfig) -> anyhow::Result<()> {
    if jwt_config.uses_default_secrets() {
        if environment == Environment::Production {
            bail!("JWT_SECRET and JWT_REFRESH_SECRET must be set when APP_ENV=production");
        }
        warn!("Signing tokens with development JWT secrets");
    }
    Ok(())
}

/// Builds the state from the environment, connecting and migrating the
/// database when the PostgreSQL backend is selected.
pub async fn init_app_state(server_config: ServerConfig) -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env();
    check_jwt_secrets(server_config.environment, &jwt_config)?;
    let cors_config = CorsConfig::from_env();

    let store: Arc<dyn AccountStore> = match server_config.storage {
        StorageBackend::Postgres => {
            let url = server_config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when STORAGE_BACKEND=postgres")?;
            let pool = init_db_pool(url, server_config.max_connections)
                .await
                .context("Failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            info!(max_connections = server_config.max_connections, "Connected to PostgreSQL");
            Arc::new(PgAccountStore::new(pool))
        }
        StorageBackend::Memory => {
            warn!("Using the in-memory account store, data is lost on restart");
            Arc::new(MemoryAccountStore::new())
        }
    };

    Ok(AppState::new(store, &jwt_config, server_config, cors_config))
}
