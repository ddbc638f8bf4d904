use axum::{Json, extract::Extension};

use storedesk_auth::Caller;
use storedesk_infra::Services;
use storedesk_infra::services::DashboardStats;

use super::common::blocking;
use crate::app::errors::ApiError;

pub async fn stats(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<DashboardStats>, ApiError> {
    let stats = blocking(move || services.dashboard.summarize(&caller)).await?;
    Ok(Json(stats))
}
