//! Checkout Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPlacedResponse {
    #[serde(rename = "order_id")]
    pub order_uuid: Uuid,

    /// Order total in pence/cents
    pub total_price: u64,
}

/// Checkout Handler
///
/// Converts the caller's cart into an order at current prices and empties the cart.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .checkout(user)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(OrderPlacedResponse {
        order_uuid: order.uuid.into(),
        total_price: order.total_price,
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use techhaven_app::domain::orders::{
        MockOrdersService, OrdersServiceError,
        records::{OrderRecord, OrderUuid},
    };

    use crate::test_helpers::{TEST_USER_UUID, TestServices};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        let services = TestServices {
            orders,
            ..TestServices::default()
        };

        services.service(Router::with_path("orders").post(handler))
    }

    #[tokio::test]
    async fn test_checkout_returns_201_with_total() -> TestResult {
        let order_uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |user| {
                Ok(OrderRecord {
                    uuid: order_uuid,
                    user_uuid: user,
                    total_price: 25,
                    items: Vec::new(),
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        let body: OrderPlacedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.order_uuid, order_uuid.into_uuid());
        assert_eq!(body.total_price, 25);

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .return_once(|_| Err(OrdersServiceError::EmptyCart));

        let res = TestClient::post("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_overflow_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .return_once(|_| Err(OrdersServiceError::TotalOverflow));

        let res = TestClient::post("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_body_uses_order_id_field() -> TestResult {
        let order_uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders.expect_checkout().once().return_once(move |user| {
            Ok(OrderRecord {
                uuid: order_uuid,
                user_uuid: user,
                total_price: 10,
                items: Vec::new(),
                created_at: Timestamp::UNIX_EPOCH,
            })
        });

        let mut res = TestClient::post("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(
            body.get("order_id").and_then(serde_json::Value::as_str),
            Some(order_uuid.to_string().as_str())
        );
        assert!(body.get("order_uuid").is_none(), "unexpected field in {body}");

        Ok(())
    }
}
