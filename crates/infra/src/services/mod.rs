//! Application services wired over the repositories.

pub mod dashboard;
pub mod products;
pub mod stores;
pub mod users;

use std::sync::Arc;

use storedesk_auth::{AuthService, AuthSettings, PasswordHasher, TokenCodec};
use storedesk_core::{Clock, ServiceResult};

use crate::repository::Repositories;

pub use dashboard::{AdminStats, DashboardService, DashboardStats, OwnerStats, ShopperStats};
pub use products::ProductService;
pub use stores::StoreService;
pub use users::UserAdminService;

/// Everything a request handler needs, shared behind `Arc`s.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserAdminService>,
    pub stores: Arc<StoreService>,
    pub products: Arc<ProductService>,
    pub dashboard: Arc<DashboardService>,
}

impl Services {
    pub fn new(
        repos: &Repositories,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenCodec>,
        clock: Arc<dyn Clock>,
        settings: AuthSettings,
    ) -> ServiceResult<Self> {
        let auth = Arc::new(AuthService::new(
            repos.users.clone(),
            hasher,
            tokens,
            clock.clone(),
            settings,
        )?);

        Ok(Self {
            users: Arc::new(UserAdminService::new(repos.users.clone(), auth.clone())),
            stores: Arc::new(StoreService::new(
                repos.stores.clone(),
                repos.users.clone(),
                clock.clone(),
            )),
            products: Arc::new(ProductService::new(
                repos.products.clone(),
                repos.stores.clone(),
                clock,
            )),
            dashboard: Arc::new(DashboardService::new(
                repos.users.clone(),
                repos.stores.clone(),
                repos.products.clone(),
            )),
            auth,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use storedesk_auth::{
        AuthSettings, Caller, Hs256Tokens, PasswordHashError, PasswordHasher, Registration, Role,
    };
    use storedesk_core::FixedClock;

    use super::Services;
    use crate::{InMemoryStore, Repositories};

    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
            Ok(format!("plain:{plaintext}"))
        }

        fn verify(&self, plaintext: &str, hash: &str) -> bool {
            hash == format!("plain:{plaintext}")
        }
    }

    pub struct Harness {
        pub services: Services,
        pub repos: Repositories,
        pub clock: Arc<FixedClock>,
    }

    impl Harness {
        pub fn new() -> Self {
            let repos = Repositories::new(Arc::new(InMemoryStore::new()));
            let clock = Arc::new(FixedClock::new(
                Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            ));
            let services = Services::new(
                &repos,
                Arc::new(PlainHasher),
                Arc::new(Hs256Tokens::new(b"infra-tests")),
                clock.clone(),
                AuthSettings::default(),
            )
            .unwrap();
            Self {
                services,
                repos,
                clock,
            }
        }

        /// Create an account directly and return its caller context.
        pub fn account(&self, email: &str, role: Role) -> Caller {
            let user = self
                .services
                .auth
                .create_account(
                    Registration {
                        email: email.to_string(),
                        password: "pw".to_string(),
                        name: email.to_string(),
                        role: None,
                    },
                    role,
                )
                .unwrap();
            Caller::new(user.id, user.email, user.role)
        }
    }
}
