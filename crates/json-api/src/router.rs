//! App Router

use salvo::Router;

use crate::{auth, carts, healthcheck, orders, products};

/// Every API route. Reads of the catalog and the auth endpoints are public;
/// everything that mutates state or is scoped to a user sits behind the bearer
/// token middleware.
pub(crate) fn api_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("register").post(auth::handlers::register::handler))
        .push(Router::with_path("login").post(auth::handlers::login::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(authenticated_router())
}

fn authenticated_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("cart")
                .get(carts::index::handler)
                .post(carts::create::handler)
                .delete(carts::delete::handler),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler),
        )
}
