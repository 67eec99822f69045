//! Modelo de Vehicle
//!
//! Un vehículo tiene una capacidad de pasajeros y un estado del contexto
//! `vehicle`. Las salidas de ruta toman su capacidad efectiva de aquí.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub description: Option<String>,
    /// Asientos de pasajeros. 0 se interpreta como "sin límite".
    pub capacity: i32,
    pub state_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
