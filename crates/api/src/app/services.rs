//! Infrastructure wiring from configuration.

use std::sync::Arc;

use secrecy::ExposeSecret;
use thiserror::Error;

use storedesk_auth::{Argon2Hasher, AuthSettings, Hs256Tokens};
use storedesk_core::{ServiceError, SystemClock};
use storedesk_infra::{JsonFileStore, Repositories, Services, seed_demo_data};

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("cannot open data directory {path}: {source}")]
    DataDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Open the JSON-file backend, build services and seed a fresh installation.
pub fn build_services(config: &AppConfig) -> Result<Services, BootstrapError> {
    let backend = JsonFileStore::open(&config.data_dir).map_err(|source| BootstrapError::DataDir {
        path: config.data_dir.display().to_string(),
        source,
    })?;
    tracing::info!(data_dir = %config.data_dir.display(), "using JSON file persistence");

    let repos = Repositories::new(Arc::new(backend));
    let services = Services::new(
        &repos,
        Arc::new(Argon2Hasher::new()),
        Arc::new(Hs256Tokens::new(config.jwt_secret.expose_secret().as_bytes())),
        Arc::new(SystemClock),
        AuthSettings {
            token_ttl: config.token_ttl,
            self_register_roles: config.self_register_roles.clone(),
        },
    )?;

    if config.seed {
        seed_demo_data(&repos, &services)?;
    }

    Ok(services)
}
