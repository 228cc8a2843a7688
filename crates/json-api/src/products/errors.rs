//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use techhaven_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::bad_request().brief("Product name already exists")
        }
        ProductsServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        ProductsServiceError::InvalidData | ProductsServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Sql(source) => {
            error!("products storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
