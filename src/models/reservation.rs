//! Modelo de Reservation
//!
//! Una reserva referencia exactamente una de {salida de ruta, salida de
//! tour}, nunca ambas, nunca ninguna. Se borra siempre en modo suave
//! (`deleted_at`), nunca con DELETE físico.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub route_run_id: Option<Uuid>,
    pub tour_run_id: Option<Uuid>,
    pub customer_name: String,
    pub adults: i32,
    pub children: i32,
    pub amount: Decimal,
    /// Agencia revendedora; NULL significa venta directa.
    pub agency_id: Option<Uuid>,
    pub state_id: Uuid,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Plazas que ocupa esta reserva (adultos + niños).
    pub fn passengers(&self) -> i32 {
        self.adults + self.children
    }
}
