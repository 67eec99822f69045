use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::agency_controller::AgencyController;
use crate::dto::agency_dto::{AgencyResponse, CreateAgencyRequest, UpdateAgencyRequest};
use crate::dto::common::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_agency_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_agency))
        .route("/", get(list_agencies))
        .route("/:id", get(get_agency))
        .route("/:id", put(update_agency))
        .route("/:id", delete(delete_agency))
}

async fn create_agency(
    State(state): State<AppState>,
    Json(request): Json<CreateAgencyRequest>,
) -> Result<Json<ApiResponse<AgencyResponse>>, AppError> {
    let controller = AgencyController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_agency(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AgencyResponse>, AppError> {
    let controller = AgencyController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_agencies(
    State(state): State<AppState>,
) -> Result<Json<Vec<AgencyResponse>>, AppError> {
    let controller = AgencyController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_agency(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAgencyRequest>,
) -> Result<Json<ApiResponse<AgencyResponse>>, AppError> {
    let controller = AgencyController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_agency(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = AgencyController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Agencia eliminada exitosamente"
    })))
}
