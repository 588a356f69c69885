//! Test helpers.

use std::sync::Arc;

use blanja_app::{
    auth::{Identity, MockAuthService, Role},
    context::AppContext,
    domain::{
        addresses::MockAddressesService, categories::MockCategoriesService,
        products::MockProductsService, sellers::MockSellersService, users::MockUsersService,
        users::models::UserId,
    },
};
use salvo::{affix_state::inject, prelude::*};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_ID: UserId = UserId::from_i64(1);

pub(crate) fn test_identity(role: Role) -> Identity {
    Identity {
        user_id: TEST_USER_ID,
        email: "user@example.com".to_string(),
        role,
    }
}

#[salvo::handler]
async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(test_identity(Role::Customer));
    ctrl.call_next(req, depot, res).await;
}

/// One mock per service. Every expectation starts as `never()`; tests
/// replace the mocks they exercise.
pub(crate) struct TestServices {
    pub(crate) products: MockProductsService,
    pub(crate) addresses: MockAddressesService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) sellers: MockSellersService,
    pub(crate) users: MockUsersService,
    pub(crate) auth: MockAuthService,
}

impl TestServices {
    pub(crate) fn strict() -> Self {
        Self {
            products: strict_products_mock(),
            addresses: strict_addresses_mock(),
            categories: strict_categories_mock(),
            sellers: strict_sellers_mock(),
            users: strict_users_mock(),
            auth: strict_auth_mock(),
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            addresses: Arc::new(self.addresses),
            categories: Arc::new(self.categories),
            sellers: Arc::new(self.sellers),
            users: Arc::new(self.users),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` with the mocked state and no authenticated caller.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Serve `route` as if [`RequireRole`](crate::auth::RequireRole) had
    /// admitted the test customer.
    pub(crate) fn customer_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_customer)
                .push(route),
        )
    }
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_addresses_mock() -> MockAddressesService {
    let mut addresses = MockAddressesService::new();

    addresses.expect_list_addresses().never();
    addresses.expect_list_user_addresses().never();
    addresses.expect_get_address().never();
    addresses.expect_create_address().never();
    addresses.expect_update_address().never();
    addresses.expect_delete_address().never();

    addresses
}

fn strict_categories_mock() -> MockCategoriesService {
    let mut categories = MockCategoriesService::new();

    categories.expect_list_categories().never();
    categories.expect_get_category().never();
    categories.expect_create_category().never();
    categories.expect_update_category().never();
    categories.expect_delete_category().never();

    categories
}

fn strict_sellers_mock() -> MockSellersService {
    let mut sellers = MockSellersService::new();

    sellers.expect_list_sellers().never();
    sellers.expect_get_seller().never();

    sellers
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_get_user().never();

    users
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authorize().never();

    auth
}
