//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductFields, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let fields = ProductFields::try_from(&product)?;

        i64::try_from(fields.price)?;

        let mut tx = self.db.begin().await?;

        if self
            .repository
            .name_exists(&mut tx, &fields.name, product.uuid)
            .await?
        {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let created = self
            .repository
            .create_product(&mut tx, product.uuid, fields)
            .await?;

        tx.commit().await?;

        info!(product_uuid = %created.uuid, name = %created.name, "product created");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let fields = ProductFields::try_from(&update)?;

        i64::try_from(fields.price)?;

        let mut tx = self.db.begin().await?;

        // Report a missing product ahead of a name clash with another one.
        self.repository.get_product(&mut tx, product).await?;

        if self
            .repository
            .name_exists(&mut tx, &fields.name, product)
            .await?
        {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let updated = self
            .repository
            .update_product(&mut tx, product, fields)
            .await?;

        tx.commit().await?;

        info!(product_uuid = %updated.uuid, "product updated");

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(product_uuid = %product, "product deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, ordered by name.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product. Names are unique across the catalog.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces a product's name, price and description.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product, dropping any cart lines that reference it.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
