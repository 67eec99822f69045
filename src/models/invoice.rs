//! Modelo de Invoice
//!
//! Factura emitida sobre una reserva. La aritmética de facturación queda
//! fuera del núcleo; aquí solo vive la fila y su estado.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub number: String,
    pub amount: Decimal,
    pub state_id: Uuid,
    pub issued_by: Uuid,
    pub created_at: DateTime<Utc>,
}
