use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::availability_controller::AvailabilityController;
use crate::dto::availability_dto::{AvailabilityQuery, AvailabilityResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_availability_router() -> Router<AppState> {
    Router::new().route("/", get(find_availability))
}

async fn find_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let controller = AvailabilityController::new(state.pool.clone());
    let response = controller.find(query).await?;
    Ok(Json(response))
}
