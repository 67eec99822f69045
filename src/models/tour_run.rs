//! Modelo de TourRun
//!
//! Un tour activado para una fecha/hora concreta, con guía opcional.
//! No tiene techo de capacidad.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TourRun {
    pub id: Uuid,
    pub service_id: Uuid,
    pub guide_name: Option<String>,
    pub departs_on: NaiveDate,
    pub departs_at: NaiveTime,
    pub state_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
