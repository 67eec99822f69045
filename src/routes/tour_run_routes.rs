use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::tour_run_controller::TourRunController;
use crate::core::capacity::CapacityCheck;
use crate::dto::common::ApiResponse;
use crate::dto::route_run_dto::CapacityQuery;
use crate::dto::tour_run_dto::{CreateTourRunRequest, TourRunResponse, UpdateTourRunRequest};
use crate::dto::vehicle_dto::TransitionRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_tour_run_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_tour_run))
        .route("/", get(list_tour_runs))
        .route("/:id", get(get_tour_run))
        .route("/:id", put(update_tour_run))
        .route("/:id", delete(delete_tour_run))
        .route("/:id/transition", put(transition_tour_run))
        .route("/:id/capacity", get(check_tour_run_capacity))
}

async fn check_tour_run_capacity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CapacityQuery>,
) -> Result<Json<CapacityCheck>, AppError> {
    let controller = TourRunController::new(state.pool.clone());
    let response = controller.check_capacity(id, query).await?;
    Ok(Json(response))
}

async fn create_tour_run(
    State(state): State<AppState>,
    Json(request): Json<CreateTourRunRequest>,
) -> Result<Json<ApiResponse<TourRunResponse>>, AppError> {
    let controller = TourRunController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_tour_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TourRunResponse>, AppError> {
    let controller = TourRunController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_tour_runs(
    State(state): State<AppState>,
) -> Result<Json<Vec<TourRunResponse>>, AppError> {
    let controller = TourRunController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_tour_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTourRunRequest>,
) -> Result<Json<ApiResponse<TourRunResponse>>, AppError> {
    let controller = TourRunController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn transition_tour_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<ApiResponse<TourRunResponse>>, AppError> {
    let controller = TourRunController::new(state.pool.clone());
    let response = controller.transition(id, request).await?;
    Ok(Json(response))
}

async fn delete_tour_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TourRunController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Salida de tour eliminada exitosamente"
    })))
}
