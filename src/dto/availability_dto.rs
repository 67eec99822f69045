//! DTOs de búsqueda de disponibilidad

use crate::core::availability::ServiceInstanceRef;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub passengers: i32,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub passengers: i32,
    /// Instancia elegida; `null` cuando no hay disponibilidad.
    pub instance: Option<ServiceInstanceRef>,
}
