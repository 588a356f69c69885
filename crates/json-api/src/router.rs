//! App Router

use blanja_app::auth::Role;
use salvo::Router;

use crate::{addresses, auth::RequireRole, categories, healthcheck, products, sellers};

/// Every JSON route. Reads are public; writes sit behind a [`RequireRole`]
/// hoop for the role that owns the resource.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(products_router())
        .push(addresses_router())
        .push(categories_router())
        .push(sellers_router())
}

fn products_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .push(Router::with_path("{id}").get(products::get::handler))
        .push(
            Router::new()
                .hoop(RequireRole::new(Role::Seller))
                .post(products::create::handler)
                .push(
                    Router::with_path("{id}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
}

fn addresses_router() -> Router {
    Router::with_path("addresses")
        .get(addresses::index::handler)
        // must precede `{id}`, which would otherwise capture "profile"
        .push(
            Router::with_path("profile")
                .hoop(RequireRole::new(Role::Customer))
                .get(addresses::profile::handler),
        )
        .push(Router::with_path("{id}").get(addresses::get::handler))
        .push(
            Router::new()
                .hoop(RequireRole::new(Role::Customer))
                .post(addresses::create::handler)
                .push(
                    Router::with_path("{id}")
                        .put(addresses::update::handler)
                        .delete(addresses::delete::handler),
                ),
        )
}

fn categories_router() -> Router {
    Router::with_path("categories")
        .get(categories::index::handler)
        .push(Router::with_path("{id}").get(categories::get::handler))
        .push(
            Router::new()
                .hoop(RequireRole::new(Role::Admin))
                .post(categories::create::handler)
                .push(
                    Router::with_path("{id}")
                        .put(categories::update::handler)
                        .delete(categories::delete::handler),
                ),
        )
}

fn sellers_router() -> Router {
    Router::with_path("sellers")
        .get(sellers::index::handler)
        .push(Router::with_path("{id}").get(sellers::get::handler))
}
