//! # Hospital Handler
//!
//! `POST /api/hospitals` returns the hospitals nearest to a point, closest first.
//! Open to anonymous callers; the emergency affordance links here.

use axum::extract::{Json, State};
use lib_core::model::store::HospitalRepository;
use lib_core::{AppError, Config, DbPool, Result};
use lib_utils::validate_coordinates;
use shared::dto::{Hospital, HospitalSearchRequest};
use tracing::{error, info, instrument};

#[instrument(skip_all, fields(search_term = ?req.search_term))]
pub async fn find_hospitals(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<HospitalSearchRequest>,
) -> Result<Json<Vec<Hospital>>> {
    let (latitude, longitude) =
        validate_coordinates(req.latitude, req.longitude).map_err(AppError::InvalidInput)?;

    let limit = usize::try_from(config.hospital_result_limit).unwrap_or(10);

    let ranked = HospitalRepository::nearest(
        &pool,
        latitude,
        longitude,
        req.search_term.as_deref(),
        limit,
    )
    .await
    .map_err(|e| {
        error!("[HOSPITALS] Lookup failed: {}", e);
        AppError::Upstream(format!("Hospital lookup failed: {}", e))
    })?;

    info!(count = ranked.len(), "[HOSPITALS] Search complete");

    Ok(Json(
        ranked
            .into_iter()
            .map(|(hospital, distance)| hospital.into_dto(distance))
            .collect(),
    ))
}
