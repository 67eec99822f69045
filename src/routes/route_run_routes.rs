use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::route_run_controller::RouteRunController;
use crate::core::capacity::CapacityCheck;
use crate::dto::common::ApiResponse;
use crate::dto::route_run_dto::{
    CapacityQuery, CreateRouteRunRequest, RouteRunResponse, UpdateRouteRunRequest,
};
use crate::dto::vehicle_dto::TransitionRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_run_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_route_run))
        .route("/", get(list_route_runs))
        .route("/:id", get(get_route_run))
        .route("/:id", put(update_route_run))
        .route("/:id", delete(delete_route_run))
        .route("/:id/transition", put(transition_route_run))
        .route("/:id/capacity", get(check_route_run_capacity))
}

async fn check_route_run_capacity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CapacityQuery>,
) -> Result<Json<CapacityCheck>, AppError> {
    let controller = RouteRunController::new(state.pool.clone());
    let response = controller.check_capacity(id, query).await?;
    Ok(Json(response))
}

async fn create_route_run(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRunRequest>,
) -> Result<Json<ApiResponse<RouteRunResponse>>, AppError> {
    let controller = RouteRunController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_route_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteRunResponse>, AppError> {
    let controller = RouteRunController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_route_runs(
    State(state): State<AppState>,
) -> Result<Json<Vec<RouteRunResponse>>, AppError> {
    let controller = RouteRunController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_route_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRouteRunRequest>,
) -> Result<Json<ApiResponse<RouteRunResponse>>, AppError> {
    let controller = RouteRunController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn transition_route_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<ApiResponse<RouteRunResponse>>, AppError> {
    let controller = RouteRunController::new(state.pool.clone());
    let response = controller.transition(id, request).await?;
    Ok(Json(response))
}

async fn delete_route_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RouteRunController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Salida de ruta eliminada exitosamente"
    })))
}
