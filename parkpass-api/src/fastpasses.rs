use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use parkpass_core::pii::MaskedEmail;
use parkpass_core::{CheckInResult, FastPass, FastPassUpdate, NewFastPass};

use crate::error::AppError;
use crate::extract::{PageQuery, ValidatedJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fastpasses", get(list_fastpasses).post(purchase_fastpass))
        .route("/fastpasses/visitor/{visitor_email}", get(get_visitor_fastpasses))
        .route(
            "/fastpasses/{fastpass_id}",
            get(get_fastpass).put(update_fastpass).delete(cancel_fastpass),
        )
        .route("/fastpasses/{fastpass_id}/checkin", post(checkin_fastpass))
}

type FastPassId = WithRejection<Path<i64>, AppError>;

/// GET /api/fastpasses
pub async fn list_fastpasses(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<PageQuery>, AppError>,
) -> Result<Json<Vec<FastPass>>, AppError> {
    let (skip, limit) = state.pagination.resolve(page.skip, page.limit);
    Ok(Json(state.fastpasses.list_fastpasses(skip, limit).await?))
}

/// GET /api/fastpasses/{fastpass_id}
pub async fn get_fastpass(
    State(state): State<AppState>,
    WithRejection(Path(fastpass_id), _): FastPassId,
) -> Result<Json<FastPass>, AppError> {
    Ok(Json(state.fastpasses.get_fastpass(fastpass_id).await?))
}

/// POST /api/fastpasses
pub async fn purchase_fastpass(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewFastPass>,
) -> Result<(StatusCode, Json<FastPass>), AppError> {
    let fastpass = state.fastpasses.create_fastpass(req).await?;
    tracing::info!(
        fastpass_id = fastpass.id,
        ride_id = fastpass.ride_id,
        "Fast pass issued to {}",
        MaskedEmail(&fastpass.visitor_email)
    );
    Ok((StatusCode::CREATED, Json(fastpass)))
}

/// GET /api/fastpasses/visitor/{visitor_email}
///
/// 404 when the visitor holds no passes.
pub async fn get_visitor_fastpasses(
    State(state): State<AppState>,
    WithRejection(Path(visitor_email), _): WithRejection<Path<String>, AppError>,
) -> Result<Json<Vec<FastPass>>, AppError> {
    Ok(Json(state.fastpasses.list_by_visitor_email(&visitor_email).await?))
}

/// POST /api/fastpasses/{fastpass_id}/checkin
pub async fn checkin_fastpass(
    State(state): State<AppState>,
    WithRejection(Path(fastpass_id), _): FastPassId,
) -> Result<Json<CheckInResult>, AppError> {
    let result = state.fastpasses.check_in(fastpass_id, Utc::now()).await?;
    tracing::info!(
        fastpass_id,
        remaining_uses = result.remaining_uses,
        "Visitor checked in"
    );
    Ok(Json(result))
}

/// PUT /api/fastpasses/{fastpass_id}
pub async fn update_fastpass(
    State(state): State<AppState>,
    WithRejection(Path(fastpass_id), _): FastPassId,
    ValidatedJson(req): ValidatedJson<FastPassUpdate>,
) -> Result<Json<FastPass>, AppError> {
    Ok(Json(state.fastpasses.update_fastpass(fastpass_id, req).await?))
}

/// DELETE /api/fastpasses/{fastpass_id}
pub async fn cancel_fastpass(
    State(state): State<AppState>,
    WithRejection(Path(fastpass_id), _): FastPassId,
) -> Result<StatusCode, AppError> {
    state.fastpasses.delete_fastpass(fastpass_id).await?;
    tracing::info!(fastpass_id, "Fast pass cancelled");
    Ok(StatusCode::NO_CONTENT)
}
