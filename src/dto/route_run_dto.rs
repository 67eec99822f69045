//! DTOs de salidas de ruta

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteRunRequest {
    pub service_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub departs_on: NaiveDate,
    pub departs_at: NaiveTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRouteRunRequest {
    pub vehicle_id: Option<Uuid>,
    pub departs_on: Option<NaiveDate>,
    pub departs_at: Option<NaiveTime>,
}

/// Parámetros del chequeo de capacidad de una salida.
#[derive(Debug, Deserialize)]
pub struct CapacityQuery {
    pub passengers: i32,
    /// Reserva a excluir del recuento (revalidación de una edición).
    pub exclude_reservation_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct RouteRunResponse {
    pub id: Uuid,
    pub service_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub departs_on: NaiveDate,
    pub departs_at: NaiveTime,
    pub state: String,
    /// Capacidad efectiva (la del vehículo; 0 = sin límite).
    pub capacity: i32,
    /// Plazas ocupadas por reservas activas.
    pub occupied: i64,
    pub created_at: DateTime<Utc>,
}
