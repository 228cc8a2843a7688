//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AccessTokenError, AuthService, PgAuthService, TokenSigner, TokenSigningKey},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),

    #[error("invalid token signing secret")]
    SigningKey(#[source] AccessTokenError),
}

/// Settings needed to wire up the application services.
#[derive(Debug, Clone, Copy)]
pub struct AppSettings<'a> {
    pub database_url: &'a str,
    pub token_secret: &'a str,
    pub token_ttl: SignedDuration,
    pub run_migrations: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Connect to the database and build every service.
    ///
    /// # Errors
    ///
    /// Returns an error when the signing secret is too weak, the database is
    /// unreachable, or migrations fail.
    pub async fn from_settings(settings: AppSettings<'_>) -> Result<Self, AppInitError> {
        let key = TokenSigningKey::new(settings.token_secret.as_bytes())
            .map_err(AppInitError::SigningKey)?;

        let pool = database::connect(settings.database_url)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;

            info!("database migrations applied");
        }

        Ok(Self::from_db(
            Db::new(pool),
            TokenSigner::new(key, settings.token_ttl),
        ))
    }

    #[must_use]
    pub fn from_db(db: Db, signer: TokenSigner) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone(), signer)),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db)),
        }
    }
}
