//! Cart Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use techhaven_app::domain::{carts::records::CartLine, products::records::ProductRecord};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Product summary embedded in a cart line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartProductResponse {
    #[serde(rename = "id")]
    pub uuid: Uuid,
    pub name: String,

    /// Current unit price in pence/cents
    pub price: u64,
}

impl From<ProductRecord> for CartProductResponse {
    fn from(product: ProductRecord) -> Self {
        CartProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            price: product.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// Cart line id
    #[serde(rename = "id")]
    pub uuid: Uuid,
    pub product: CartProductResponse,
    pub quantity: u32,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        CartLineResponse {
            uuid: line.item.uuid.into(),
            product: line.product.into(),
            quantity: line.item.quantity,
        }
    }
}

/// Cart Index Handler
///
/// Returns the caller's cart lines in the order they were first added.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart lines"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CartLineResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let lines = state
        .app
        .carts
        .list_items(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(lines.into_iter().map(Into::into).collect()))
}
