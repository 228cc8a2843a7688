//! Order History Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use techhaven_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Price-frozen order line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_name: String,
    pub quantity: u32,

    /// Unit price at checkout in pence/cents
    pub price_per_item: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            product_name: item.product_name,
            quantity: item.quantity,
            price_per_item: item.price_per_item,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    #[serde(rename = "order_id")]
    pub order_uuid: Uuid,

    /// Order total in pence/cents
    pub total_price: u64,

    /// When the order was placed
    pub timestamp: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            order_uuid: order.uuid.into(),
            total_price: order.total_price,
            timestamp: order.created_at.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Order History Handler
///
/// Returns the caller's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order history"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use techhaven_app::domain::orders::{
        MockOrdersService,
        records::{OrderItemUuid, OrderUuid},
    };

    use crate::test_helpers::{TEST_USER_UUID, TestServices};

    use super::*;

    #[tokio::test]
    async fn test_index_returns_orders_with_items() -> TestResult {
        let order_uuid = OrderUuid::new();
        let created_at: Timestamp = "2026-03-01T10:00:00Z".parse()?;

        let order = OrderRecord {
            uuid: order_uuid,
            user_uuid: TEST_USER_UUID,
            total_price: 25,
            items: vec![
                OrderItemRecord {
                    uuid: OrderItemUuid::new(),
                    order_uuid,
                    product_name: "Product A".to_string(),
                    quantity: 2,
                    price_per_item: 10,
                },
                OrderItemRecord {
                    uuid: OrderItemUuid::new(),
                    order_uuid,
                    product_name: "Product B".to_string(),
                    quantity: 1,
                    price_per_item: 5,
                },
            ],
            created_at,
        };

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(vec![order]));

        orders.expect_checkout().never();

        let services = TestServices {
            orders,
            ..TestServices::default()
        };

        let mut res = TestClient::get("http://example.com/orders")
            .send(&services.service(Router::with_path("orders").get(handler)))
            .await;

        let body: Vec<OrderResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let first = body.first().ok_or("missing order")?;

        assert_eq!(first.order_uuid, order_uuid.into_uuid());
        assert_eq!(first.total_price, 25);
        assert_eq!(first.timestamp, created_at.to_string());

        let items: Vec<(&str, u32, u64)> = first
            .items
            .iter()
            .map(|item| (item.product_name.as_str(), item.quantity, item.price_per_item))
            .collect();

        assert_eq!(items, [("Product A", 2, 10), ("Product B", 1, 5)]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_body_uses_order_id_field() -> TestResult {
        let order_uuid = OrderUuid::new();

        let order = OrderRecord {
            uuid: order_uuid,
            user_uuid: TEST_USER_UUID,
            total_price: 0,
            items: Vec::new(),
            created_at: Timestamp::UNIX_EPOCH,
        };

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .return_once(move |_| Ok(vec![order]));

        let services = TestServices {
            orders,
            ..TestServices::default()
        };

        let mut res = TestClient::get("http://example.com/orders")
            .send(&services.service(Router::with_path("orders").get(handler)))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        let first = body.get(0).ok_or("missing order")?;

        assert_eq!(
            first.get("order_id").and_then(serde_json::Value::as_str),
            Some(order_uuid.to_string().as_str())
        );
        assert!(first.get("timestamp").is_some(), "timestamp missing from {first}");

        Ok(())
    }
}
