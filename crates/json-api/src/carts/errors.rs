//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use techhaven_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        CartsServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart item"),
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
