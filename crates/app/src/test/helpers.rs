//! Test Helpers

use crate::{
    auth::{AuthService, AuthServiceError, Credentials, UserUuid},
    domain::{
        carts::{CartsService, CartsServiceError, data::NewCartItem, records::CartLine},
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn register_user(
    ctx: &TestContext,
    username: &str,
) -> Result<UserUuid, AuthServiceError> {
    let user = ctx
        .auth
        .register(Credentials::new(username, "correct horse battery staple"))
        .await?;

    Ok(user.uuid)
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            price,
            description: None,
        })
        .await
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    user: UserUuid,
    product: ProductUuid,
    quantity: u32,
) -> Result<CartLine, CartsServiceError> {
    ctx.carts
        .add_item(
            user,
            NewCartItem {
                product_uuid: product,
                quantity,
            },
        )
        .await
}
