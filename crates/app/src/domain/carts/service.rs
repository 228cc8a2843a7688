//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    auth::UserUuid,
    database::Db,
    domain::carts::{
        data::NewCartItem, errors::CartsServiceError, records::CartLine,
        repository::PgCartItemsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn list_items(&self, user: UserUuid) -> Result<Vec<CartLine>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self.items_repository.list_cart_lines(&mut tx, user).await?;

        tx.commit().await?;

        Ok(lines)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartLine, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::Validation("quantity must be positive"));
        }

        let quantity = i32::try_from(item.quantity)
            .map_err(|_| CartsServiceError::Validation("quantity is too large"))?;

        let mut tx = self.db.begin().await?;

        let line = self
            .items_repository
            .add_cart_item(&mut tx, user, item.product_uuid, quantity)
            .await?;

        tx.commit().await?;

        debug!(
            user_uuid = %user,
            product_uuid = %item.product_uuid,
            quantity = line.item.quantity,
            "cart item added"
        );

        Ok(line)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let removed = self.items_repository.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        info!(user_uuid = %user, removed, "cart cleared");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// List the user's cart lines in the order they were first added.
    async fn list_items(&self, user: UserUuid) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Add a product to the user's cart, merging with any existing line for it.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartLine, CartsServiceError>;

    /// Remove every line from the user's cart. Clearing an empty cart succeeds.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;
}
