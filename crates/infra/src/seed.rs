//! Demo data for a fresh installation.
//!
//! Seeding only happens when the users collection is empty, so restarting a
//! populated deployment never duplicates or resurrects records.

use storedesk_auth::{Caller, Registration, Role};
use storedesk_catalog::{NumericInput, ProductDraft, StoreDraft};
use storedesk_core::ServiceResult;

use crate::{Repositories, Services};

/// A seeded login, reported so operators can sign in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededAccount {
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
}

pub static DEMO_ACCOUNTS: [SeededAccount; 3] = [
    SeededAccount {
        email: "admin@admin.com",
        password: "admin123",
        role: Role::Admin,
    },
    SeededAccount {
        email: "owner@store.com",
        password: "owner123",
        role: Role::StoreOwner,
    },
    SeededAccount {
        email: "user@user.com",
        password: "user123",
        role: Role::User,
    },
];

fn display_name(role: Role) -> &'static str {
    match role {
        Role::Admin => "System Administrator",
        Role::StoreOwner => "Store Owner Demo",
        Role::User => "Normal User Demo",
    }
}

struct DemoProduct {
    name: &'static str,
    description: &'static str,
    price: &'static str,
    stock: u64,
    image: &'static str,
}

const DEMO_PRODUCTS: [DemoProduct; 2] = [
    DemoProduct {
        name: "Wireless Headphones",
        description: "High-quality wireless headphones with noise cancellation",
        price: "199.99",
        stock: 50,
        image: "https://images.pexels.com/photos/3394650/pexels-photo-3394650.jpeg",
    },
    DemoProduct {
        name: "Smart Watch",
        description: "Feature-rich smartwatch with health monitoring",
        price: "299.99",
        stock: 30,
        image: "https://images.pexels.com/photos/437037/pexels-photo-437037.jpeg",
    },
];

/// Populate demo accounts, one store and its products.
///
/// Returns the seeded accounts, or `None` when users already exist.
pub fn seed_demo_data(
    repos: &Repositories,
    services: &Services,
) -> ServiceResult<Option<&'static [SeededAccount]>> {
    if !repos.users.all()?.is_empty() {
        tracing::debug!("users present; skipping demo seed");
        return Ok(None);
    }

    let mut owner = None;
    for account in &DEMO_ACCOUNTS {
        let user = services.auth.create_account(
            Registration {
                email: account.email.to_string(),
                password: account.password.to_string(),
                name: display_name(account.role).to_string(),
                role: Some(account.role),
            },
            account.role,
        )?;
        if account.role == Role::StoreOwner {
            owner = Some(Caller::new(user.id, user.email, user.role));
        }
    }

    if let Some(owner) = owner {
        let store = services.stores.create(
            &owner,
            StoreDraft {
                name: Some("Tech Paradise".into()),
                description: Some("Your one-stop shop for all tech needs".into()),
                category: Some("Electronics".into()),
                owner_id: None,
            },
        )?;

        for demo in &DEMO_PRODUCTS {
            services.products.create(
                &owner,
                ProductDraft {
                    name: Some(demo.name.into()),
                    description: Some(demo.description.into()),
                    price: Some(NumericInput::from(demo.price)),
                    stock: Some(NumericInput::from(demo.stock)),
                    category: Some("Electronics".into()),
                    store_id: Some(store.id.to_string()),
                    image: Some(demo.image.into()),
                },
            )?;
        }
    }

    for account in &DEMO_ACCOUNTS {
        tracing::info!(
            email = account.email,
            password = account.password,
            role = %account.role,
            "demo account seeded"
        );
    }
    Ok(Some(&DEMO_ACCOUNTS[..]))
}
