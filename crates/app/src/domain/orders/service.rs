//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::UserUuid,
    database::Db,
    domain::{
        carts::{records::CartItemUuid, repository::PgCartItemsRepository},
        orders::{
            errors::OrdersServiceError,
            records::{OrderItemRecord, OrderRecord, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
            totals::order_total,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    cart_items_repository: PgCartItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(&self, user: UserUuid) -> Result<OrderRecord, OrdersServiceError> {
        // Every early return below drops `tx` uncommitted, rolling back all writes.
        let mut tx = self.db.begin().await?;

        let lines = self
            .cart_items_repository
            .lock_cart_lines(&mut tx, user)
            .await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let total_price = order_total(
            lines
                .iter()
                .map(|line| (line.product.price, line.item.quantity)),
        )
        .ok_or(OrdersServiceError::TotalOverflow)?;

        let mut order = self
            .orders_repository
            .create_order(&mut tx, OrderUuid::new(), user, i64::try_from(total_price)?)
            .await?;

        for line in &lines {
            let item = self
                .items_repository
                .create_order_item(
                    &mut tx,
                    order.uuid,
                    &line.product.name,
                    i32::try_from(line.item.quantity)?,
                    i64::try_from(line.product.price)?,
                )
                .await?;

            order.items.push(item);
        }

        let consumed: Vec<CartItemUuid> = lines.iter().map(|line| line.item.uuid).collect();

        self.cart_items_repository
            .delete_cart_items(&mut tx, user, &consumed)
            .await?;

        tx.commit().await?;

        info!(
            user_uuid = %user,
            order_uuid = %order.uuid,
            total_price = order.total_price,
            items = order.items.len(),
            "order placed"
        );

        Ok(order)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.orders_repository.list_orders(&mut tx, user).await?;

        let order_uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let items = self
            .items_repository
            .list_order_items(&mut tx, &order_uuids)
            .await?;

        tx.commit().await?;

        let mut items_by_order: HashMap<OrderUuid, Vec<OrderItemRecord>> = HashMap::new();

        for item in items {
            items_by_order.entry(item.order_uuid).or_default().push(item);
        }

        for order in &mut orders {
            order.items = items_by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Convert the user's cart into an order priced at current product prices,
    /// emptying the cart. Nothing is written when the cart is empty.
    async fn checkout(&self, user: UserUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// The user's orders with their items, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use sqlx::query_scalar;
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::CartsService,
            products::{ProductsService, data::ProductUpdate},
        },
        test::{
            TestContext,
            helpers::{add_item, create_product, register_user},
        },
    };

    use super::*;

    async fn count(ctx: &TestContext, table: &str) -> TestResult<i64> {
        let count = query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(ctx.db.pool())
            .await?;

        Ok(count)
    }

    #[tokio::test]
    async fn checkout_totals_snapshots_and_empties_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "alice").await?;
        let a = create_product(&ctx, "Product A", 10).await?;
        let b = create_product(&ctx, "Product B", 5).await?;

        add_item(&ctx, user, a.uuid, 2).await?;
        add_item(&ctx, user, b.uuid, 1).await?;

        let order = ctx.orders.checkout(user).await?;

        assert_eq!(order.user_uuid, user);
        assert_eq!(order.total_price, 25);
        assert_eq!(order.items.len(), 2);

        let snapshot: Vec<(&str, u32, u64)> = order
            .items
            .iter()
            .map(|item| (item.product_name.as_str(), item.quantity, item.price_per_item))
            .collect();

        assert_eq!(snapshot, [("Product A", 2, 10), ("Product B", 1, 5)]);

        assert!(ctx.carts.list_items(user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn checkout_empty_cart_writes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "alice").await?;

        let result = ctx.orders.checkout(user).await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        assert_eq!(count(&ctx, "orders").await?, 0);
        assert_eq!(count(&ctx, "order_items").await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_checkouts_place_one_order() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "alice").await?;
        let product = create_product(&ctx, "Laptop", 1_000).await?;

        add_item(&ctx, user, product.uuid, 2).await?;

        let (first, second) = tokio::join!(ctx.orders.checkout(user), ctx.orders.checkout(user));

        let placed = [&first, &second].iter().filter(|result| result.is_ok()).count();
        let empty = [&first, &second]
            .iter()
            .filter(|result| matches!(result, Err(OrdersServiceError::EmptyCart)))
            .count();

        assert_eq!(placed, 1, "expected one order, got {first:?} and {second:?}");
        assert_eq!(empty, 1, "expected one EmptyCart, got {first:?} and {second:?}");

        assert_eq!(count(&ctx, "orders").await?, 1);
        assert_eq!(count(&ctx, "order_items").await?, 1);
        assert!(ctx.carts.list_items(user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn checkout_only_consumes_own_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = register_user(&ctx, "alice").await?;
        let bob = register_user(&ctx, "bob").await?;
        let product = create_product(&ctx, "Laptop", 1_000).await?;

        add_item(&ctx, alice, product.uuid, 1).await?;
        add_item(&ctx, bob, product.uuid, 3).await?;

        ctx.orders.checkout(alice).await?;

        let bob_lines = ctx.carts.list_items(bob).await?;

        assert_eq!(bob_lines.len(), 1);
        assert_eq!(bob_lines[0].item.quantity, 3);

        Ok(())
    }

    #[tokio::test]
    async fn order_items_survive_product_changes() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "alice").await?;
        let laptop = create_product(&ctx, "Laptop", 1_000).await?;
        let mouse = create_product(&ctx, "Mouse", 500).await?;

        add_item(&ctx, user, laptop.uuid, 1).await?;
        add_item(&ctx, user, mouse.uuid, 2).await?;

        let placed = ctx.orders.checkout(user).await?;

        ctx.products
            .update_product(
                laptop.uuid,
                ProductUpdate {
                    name: "Laptop Pro".to_string(),
                    price: 9_999,
                    description: None,
                },
            )
            .await?;
        ctx.products.delete_product(mouse.uuid).await?;

        let orders = ctx.orders.list_orders(user).await?;

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0], placed);
        assert_eq!(orders[0].total_price, 2_000);
        assert_eq!(orders[0].items[0].product_name, "Laptop");
        assert_eq!(orders[0].items[0].price_per_item, 1_000);
        assert_eq!(orders[0].items[1].product_name, "Mouse");

        Ok(())
    }

    #[tokio::test]
    async fn checkout_total_overflow_rolls_back() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "alice").await?;
        let pricey = create_product(&ctx, "Yacht", i64::MAX.unsigned_abs()).await?;

        add_item(&ctx, user, pricey.uuid, 2).await?;

        let result = ctx.orders.checkout(user).await;

        assert!(
            matches!(result, Err(OrdersServiceError::TotalOverflow)),
            "expected TotalOverflow, got {result:?}"
        );

        assert_eq!(count(&ctx, "orders").await?, 0);
        assert_eq!(ctx.carts.list_items(user).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_is_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "alice").await?;
        let product = create_product(&ctx, "Laptop", 1_000).await?;

        add_item(&ctx, user, product.uuid, 1).await?;
        let first = ctx.orders.checkout(user).await?;

        add_item(&ctx, user, product.uuid, 3).await?;
        let second = ctx.orders.checkout(user).await?;

        let orders = ctx.orders.list_orders(user).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        assert_eq!(uuids, [second.uuid, first.uuid]);
        assert_eq!(orders[0].total_price, 3_000);
        assert_eq!(orders[1].total_price, 1_000);

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_without_orders_is_empty() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "alice").await?;

        assert!(ctx.orders.list_orders(user).await?.is_empty());

        Ok(())
    }
}
