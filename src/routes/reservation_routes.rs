use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::reservation_controller::ReservationController;
use crate::dto::common::ApiResponse;
use crate::dto::reservation_dto::{
    CreateReservationRequest, InvoiceEligibilityResponse, ReservationResponse,
    TransitionReservationRequest, UpdateReservationRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reservation_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_reservation))
        .route("/", get(list_reservations))
        .route("/:id", get(get_reservation))
        .route("/:id", put(update_reservation))
        .route("/:id", delete(delete_reservation))
        .route("/:id/transition", put(transition_reservation))
        .route("/:id/invoice-eligibility", get(invoice_eligibility))
}

async fn create_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.create(request, user.user_id).await?;
    Ok(Json(response))
}

async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationResponse>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_reservations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.update(id, request, user.user_id).await?;
    Ok(Json(response))
}

async fn transition_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionReservationRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.transition(id, request, user.user_id).await?;
    Ok(Json(response))
}

async fn invoice_eligibility(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceEligibilityResponse>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.invoice_eligibility(id).await?;
    Ok(Json(response))
}

async fn delete_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ReservationController::new(state.pool.clone());
    controller.delete(id, user.user_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Reserva eliminada exitosamente"
    })))
}
