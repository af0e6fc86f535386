//! JSON API handlers

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::scrape::{DoctorRecord, DoctorSearcher, SearchCriteria};
use crate::server::error::ApiError;
use crate::specialties::SPECIALTIES;

#[derive(Clone)]
pub struct AppState {
    pub searcher: Arc<dyn DoctorSearcher>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    message: String,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
    })
}

/// `POST /api/search`
///
/// The body is any subset of the criteria fields; an empty object is a
/// valid, maximally broad query. Only a missing (or non-object) body is
/// rejected. A successful run with zero records responds 200 with `[]`.
pub async fn search_handler(
    State(state): State<AppState>,
    body: Option<Json<SearchCriteria>>,
) -> Result<Json<Vec<DoctorRecord>>, ApiError> {
    let Json(criteria) = body.ok_or(ApiError::MissingBody)?;
    info!("Search request: {:?}", criteria);

    let records = state.searcher.search(&criteria).await?;
    info!("Found {} doctor(s)", records.len());
    Ok(Json(records))
}

/// `GET /api/specialties` — the fixed enumerated list for populating a
/// client-side choice control.
pub async fn specialties_handler() -> Json<Vec<&'static str>> {
    Json(SPECIALTIES.to_vec())
}
