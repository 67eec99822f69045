use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::invoice_controller::InvoiceController;
use crate::dto::common::ApiResponse;
use crate::dto::invoice_dto::{CreateInvoiceRequest, InvoiceResponse};
use crate::dto::vehicle_dto::TransitionRequest;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_invoice_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_invoice))
        .route("/", get(list_invoices))
        .route("/:id", get(get_invoice))
        .route("/:id/transition", put(transition_invoice))
}

async fn create_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<Json<ApiResponse<InvoiceResponse>>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let response = controller.create(request, user.user_id).await?;
    Ok(Json(response))
}

async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceResponse>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<InvoiceResponse>>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn transition_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<ApiResponse<InvoiceResponse>>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let response = controller.transition(id, request).await?;
    Ok(Json(response))
}
