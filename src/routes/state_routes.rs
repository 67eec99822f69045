use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::state_controller::StateController;
use crate::dto::common::ApiResponse;
use crate::dto::state_dto::{
    CreateStateRequest, StateResponse, TransitionGraphResponse, UpdateStateRequest,
};
use crate::models::state::StateContext;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_state_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_state))
        .route("/:id", get(get_state))
        .route("/:id", put(update_state))
        .route("/:id", delete(delete_state))
        .route("/:id/deactivate", put(deactivate_state))
        .route("/context/:context", get(list_states))
        .route("/context/:context/transitions", get(get_transitions))
}

fn parse_context(raw: &str) -> Result<StateContext, AppError> {
    raw.parse::<StateContext>().map_err(AppError::BadRequest)
}

async fn create_state(
    State(state): State<AppState>,
    Json(request): Json<CreateStateRequest>,
) -> Result<Json<ApiResponse<StateResponse>>, AppError> {
    let controller = StateController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_state(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StateResponse>, AppError> {
    let controller = StateController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_states(
    State(state): State<AppState>,
    Path(context): Path<String>,
) -> Result<Json<Vec<StateResponse>>, AppError> {
    let controller = StateController::new(state.pool.clone());
    let response = controller.list_by_context(parse_context(&context)?).await?;
    Ok(Json(response))
}

async fn get_transitions(
    State(state): State<AppState>,
    Path(context): Path<String>,
) -> Result<Json<TransitionGraphResponse>, AppError> {
    let controller = StateController::new(state.pool.clone());
    Ok(Json(controller.transitions(parse_context(&context)?)))
}

async fn update_state(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStateRequest>,
) -> Result<Json<ApiResponse<StateResponse>>, AppError> {
    let controller = StateController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn deactivate_state(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StateResponse>>, AppError> {
    let controller = StateController::new(state.pool.clone());
    let response = controller.deactivate(id).await?;
    Ok(Json(response))
}

async fn delete_state(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = StateController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Estado eliminado exitosamente"
    })))
}
