//! DTOs de facturas

use crate::models::invoice::Invoice;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    pub reservation_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub number: String,
    pub amount: Decimal,
    pub state_id: Uuid,
    pub issued_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id,
            reservation_id: invoice.reservation_id,
            number: invoice.number,
            amount: invoice.amount,
            state_id: invoice.state_id,
            issued_by: invoice.issued_by,
            created_at: invoice.created_at,
        }
    }
}
