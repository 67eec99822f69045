//! DTOs de vehículos

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 5, max = 20))]
    pub plate: String,

    #[validate(length(max = 200))]
    pub description: Option<String>,

    /// Asientos de pasajeros; 0 = sin límite.
    #[validate(range(min = 0, max = 500))]
    pub capacity: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 5, max = 20))]
    pub plate: Option<String>,

    #[validate(length(max = 200))]
    pub description: Option<String>,

    #[validate(range(min = 0, max = 500))]
    pub capacity: Option<i32>,
}

/// Petición de cambio de estado de una entidad con contexto propio.
#[derive(Debug, Deserialize, Validate)]
pub struct TransitionRequest {
    #[validate(length(min = 2, max = 100))]
    pub target_state: String,
}

#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub plate: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub state: String,
    pub created_at: DateTime<Utc>,
}
