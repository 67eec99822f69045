//! DTOs de reservas

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    /// Exactamente una de las dos referencias debe venir informada.
    pub route_run_id: Option<Uuid>,
    pub tour_run_id: Option<Uuid>,

    #[validate(length(min = 2, max = 150))]
    pub customer_name: String,

    #[validate(range(min = 0, max = 500))]
    pub adults: i32,

    #[validate(range(min = 0, max = 500))]
    pub children: i32,

    pub amount: Decimal,

    /// Agencia revendedora; ausente = venta directa.
    pub agency_id: Option<Uuid>,

    /// Estado inicial explícito; debe ser un estado inicial válido.
    pub state: Option<String>,
}

/// Edición completa de la reserva. El estado no se toca aquí: los cambios
/// de estado van por la operación de transición.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReservationRequest {
    pub route_run_id: Option<Uuid>,
    pub tour_run_id: Option<Uuid>,

    #[validate(length(min = 2, max = 150))]
    pub customer_name: String,

    #[validate(range(min = 0, max = 500))]
    pub adults: i32,

    #[validate(range(min = 0, max = 500))]
    pub children: i32,

    pub amount: Decimal,

    pub agency_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TransitionReservationRequest {
    #[validate(length(min = 2, max = 100))]
    pub target_state: String,
}

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub route_run_id: Option<Uuid>,
    pub tour_run_id: Option<Uuid>,
    pub customer_name: String,
    pub adults: i32,
    pub children: i32,
    pub passengers: i32,
    pub amount: Decimal,
    pub agency_id: Option<Uuid>,
    pub state: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceEligibilityResponse {
    pub reservation_id: Uuid,
    pub eligible: bool,
    pub state: String,
}
