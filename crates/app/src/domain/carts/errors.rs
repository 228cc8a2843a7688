//! Carts service errors.

use sqlx::{
    Error,
    error::ErrorKind,
};
use thiserror::Error;

/// Foreign key from cart items to products.
const PRODUCT_FOREIGN_KEY: &str = "cart_items_product_uuid_fkey";

/// `numeric_value_out_of_range`, raised when a merged quantity exceeds `INTEGER`.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("product not found")]
    ProductNotFound,

    #[error("invalid cart item: {0}")]
    Validation(&'static str),

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        if database_error.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
            return Self::Validation("quantity is too large");
        }

        match database_error.kind() {
            ErrorKind::ForeignKeyViolation
                if database_error.constraint() == Some(PRODUCT_FOREIGN_KEY) =>
            {
                Self::ProductNotFound
            }
            ErrorKind::CheckViolation => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
