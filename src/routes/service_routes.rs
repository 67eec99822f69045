use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::service_controller::ServiceController;
use crate::dto::common::ApiResponse;
use crate::dto::service_dto::{CreateServiceRequest, ServiceResponse, UpdateServiceRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_service_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_service))
        .route("/", get(list_services))
        .route("/:id", get(get_service))
        .route("/:id", put(update_service))
        .route("/:id", delete(delete_service))
}

async fn create_service(
    State(state): State<AppState>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<Json<ApiResponse<ServiceResponse>>, AppError> {
    let controller = ServiceController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse>, AppError> {
    let controller = ServiceController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let controller = ServiceController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateServiceRequest>,
) -> Result<Json<ApiResponse<ServiceResponse>>, AppError> {
    let controller = ServiceController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ServiceController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Servicio eliminado exitosamente"
    })))
}
