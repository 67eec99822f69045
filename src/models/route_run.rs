//! Modelo de RouteRun
//!
//! Una ruta activada para una fecha/hora concreta, ligada a un vehículo.
//! Su capacidad efectiva es la del vehículo asignado; sin vehículo (o con
//! capacidad 0) se trata como ilimitada.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RouteRun {
    pub id: Uuid,
    pub service_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub departs_on: NaiveDate,
    pub departs_at: NaiveTime,
    pub state_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
