//! Modelo de User
//!
//! Personal de back office. Toda operación de ciclo de vida registra qué
//! usuario la ejecutó; el id viaja como parámetro explícito, nunca como
//! estado ambiental.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}
