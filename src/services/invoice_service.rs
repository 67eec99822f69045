//! Servicio de facturación
//!
//! Emite una factura sobre una reserva elegible y lleva la reserva a
//! "Invoiced" en la misma transacción. La elegibilidad es un predicado
//! derivado del estado, nunca un campo almacenado.

use crate::core::lifecycle;
use crate::core::state_catalog;
use crate::core::RejectionReason;
use crate::models::invoice::Invoice;
use crate::models::state::StateContext;
use crate::repositories::invoice_repository::InvoiceRepository;
use crate::repositories::reservation_repository::ReservationRepository;
use crate::repositories::state_repository::StateRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub struct InvoiceService {
    pool: PgPool,
}

impl InvoiceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Invoice, AppError> {
        InvoiceRepository::new(self.pool.clone())
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Factura no encontrada".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Invoice>, AppError> {
        InvoiceRepository::new(self.pool.clone()).list().await
    }

    pub async fn create_from_reservation(
        &self,
        reservation_id: Uuid,
        actor: Uuid,
    ) -> Result<Invoice, AppError> {
        let states = StateRepository::new(self.pool.clone());
        let reservations = ReservationRepository::new(self.pool.clone());

        let reservation = reservations
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        let current_state = states
            .find_by_id(reservation.state_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal("La reserva referencia un estado inexistente".to_string())
            })?;

        if !lifecycle::invoice_eligible(&current_state.name) {
            return Err(RejectionReason::ConstraintViolation(format!(
                "a reservation in state '{}' is not eligible for invoicing",
                current_state.name
            ))
            .into());
        }

        lifecycle::decide_transition(StateContext::Reservation, &current_state.name, "Invoiced")?;

        let invoiced = states
            .find_by_name(StateContext::Reservation, "Invoiced")
            .await?
            .ok_or_else(|| {
                AppError::Internal(
                    "Falta el estado obligatorio 'Invoiced' del contexto de reservas".to_string(),
                )
            })?;

        let invoice_initial = state_catalog::initial_state(StateContext::Invoice);
        let invoice_pending = states
            .find_by_name(StateContext::Invoice, invoice_initial)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Falta el estado obligatorio '{}' del contexto de facturas",
                    invoice_initial
                ))
            })?;

        let mut tx = self.pool.begin().await?;

        let number = InvoiceRepository::next_number_in(&mut *tx).await?;
        let invoice = InvoiceRepository::create_in(
            &mut *tx,
            reservation.id,
            number,
            reservation.amount,
            invoice_pending.id,
            actor,
        )
        .await?;

        ReservationRepository::update_state_in(&mut *tx, reservation.id, invoiced.id).await?;

        tx.commit().await?;

        info!(
            "Factura {} emitida sobre la reserva {} por {}",
            invoice.number, reservation.id, actor
        );
        Ok(invoice)
    }
}
