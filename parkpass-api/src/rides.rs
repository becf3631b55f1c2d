use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use parkpass_core::{NewRide, Ride, RideUpdate};

use crate::error::AppError;
use crate::extract::{PageQuery, ValidatedJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rides", get(list_rides).post(create_ride))
        .route("/rides/{ride_id}", get(get_ride).put(update_ride))
}

/// GET /api/rides
pub async fn list_rides(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<PageQuery>, AppError>,
) -> Result<Json<Vec<Ride>>, AppError> {
    let (skip, limit) = state.pagination.resolve(page.skip, page.limit);
    let rides = state.rides.list_rides(skip, limit).await?;
    Ok(Json(rides))
}

/// GET /api/rides/{ride_id}
pub async fn get_ride(
    State(state): State<AppState>,
    WithRejection(Path(ride_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<Ride>, AppError> {
    Ok(Json(state.rides.get_ride(ride_id).await?))
}

/// POST /api/rides
pub async fn create_ride(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewRide>,
) -> Result<(StatusCode, Json<Ride>), AppError> {
    let ride = state.rides.create_ride(req).await?;
    tracing::info!(ride_id = ride.id, "Ride created: {}", ride.name);
    Ok((StatusCode::CREATED, Json(ride)))
}

/// PUT /api/rides/{ride_id}
///
/// Only the keys present in the body are changed.
pub async fn update_ride(
    State(state): State<AppState>,
    WithRejection(Path(ride_id), _): WithRejection<Path<i64>, AppError>,
    ValidatedJson(req): ValidatedJson<RideUpdate>,
) -> Result<Json<Ride>, AppError> {
    let ride = state.rides.update_ride(ride_id, req).await?;
    tracing::debug!(ride_id, "Ride updated");
    Ok(Json(ride))
}
