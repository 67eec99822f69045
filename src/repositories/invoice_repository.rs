//! Repositorio de facturas

use crate::models::invoice::Invoice;
use crate::utils::errors::AppError;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invoice)
    }

    pub async fn list(&self) -> Result<Vec<Invoice>, AppError> {
        let invoices =
            sqlx::query_as::<_, Invoice>("SELECT * FROM invoices ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(invoices)
    }

    pub async fn update_state(&self, id: Uuid, state_id: Uuid) -> Result<Invoice, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "UPDATE invoices SET state_id = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(state_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Factura no encontrada".to_string()))?;

        Ok(invoice)
    }

    /// Siguiente número correlativo de factura, dentro de la transacción de
    /// emisión para que dos emisiones concurrentes no lo repitan.
    pub async fn next_number_in(conn: &mut PgConnection) -> Result<String, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invoices")
            .fetch_one(conn)
            .await?;

        Ok(format!("FAC-{:06}", count.0 + 1))
    }

    pub async fn create_in(
        conn: &mut PgConnection,
        reservation_id: Uuid,
        number: String,
        amount: Decimal,
        state_id: Uuid,
        issued_by: Uuid,
    ) -> Result<Invoice, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (id, reservation_id, number, amount, state_id, issued_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reservation_id)
        .bind(number)
        .bind(amount)
        .bind(state_id)
        .bind(issued_by)
        .fetch_one(conn)
        .await?;

        Ok(invoice)
    }
}
