//! Repositorio de reservas
//!
//! Las escrituras que afectan a la ocupación de una salida de ruta se hacen
//! con métodos sobre la conexión de la transacción del servicio, después de
//! que este haya bloqueado la salida. Las reservas nunca se borran en
//! físico.

use crate::models::reservation::Reservation;
use crate::utils::errors::AppError;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Datos de inserción de una reserva ya decidida por el núcleo.
#[derive(Debug)]
pub struct NewReservation {
    pub route_run_id: Option<Uuid>,
    pub tour_run_id: Option<Uuid>,
    pub customer_name: String,
    pub adults: i32,
    pub children: i32,
    pub amount: Decimal,
    pub agency_id: Option<Uuid>,
    pub state_id: Uuid,
    pub created_by: Uuid,
}

/// Nuevos valores de una reserva en edición.
#[derive(Debug)]
pub struct ReservationChanges {
    pub route_run_id: Option<Uuid>,
    pub tour_run_id: Option<Uuid>,
    pub customer_name: String,
    pub adults: i32,
    pub children: i32,
    pub amount: Decimal,
    pub agency_id: Option<Uuid>,
}

pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reservation)
    }

    pub async fn list(&self) -> Result<Vec<Reservation>, AppError> {
        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE deleted_at IS NULL ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    pub async fn update_state(&self, id: Uuid, state_id: Uuid) -> Result<Reservation, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations SET state_id = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(state_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        Ok(reservation)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE reservations SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Reserva no encontrada".to_string()));
        }
        Ok(())
    }

    /// Inserta dentro de la transacción del llamador.
    pub async fn create_in(
        conn: &mut PgConnection,
        new: NewReservation,
    ) -> Result<Reservation, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations
                (id, route_run_id, tour_run_id, customer_name, adults, children,
                 amount, agency_id, state_id, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.route_run_id)
        .bind(new.tour_run_id)
        .bind(new.customer_name)
        .bind(new.adults)
        .bind(new.children)
        .bind(new.amount)
        .bind(new.agency_id)
        .bind(new.state_id)
        .bind(new.created_by)
        .fetch_one(conn)
        .await?;

        Ok(reservation)
    }

    /// Aplica una edición dentro de la transacción del llamador.
    pub async fn update_in(
        conn: &mut PgConnection,
        id: Uuid,
        changes: ReservationChanges,
    ) -> Result<Reservation, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET route_run_id = $2,
                tour_run_id = $3,
                customer_name = $4,
                adults = $5,
                children = $6,
                amount = $7,
                agency_id = $8,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.route_run_id)
        .bind(changes.tour_run_id)
        .bind(changes.customer_name)
        .bind(changes.adults)
        .bind(changes.children)
        .bind(changes.amount)
        .bind(changes.agency_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        Ok(reservation)
    }

    /// Cambio de estado dentro de la transacción del llamador.
    pub async fn update_state_in(
        conn: &mut PgConnection,
        id: Uuid,
        state_id: Uuid,
    ) -> Result<Reservation, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations SET state_id = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(state_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        Ok(reservation)
    }

    /// Ocupación activa de una salida de ruta: suma de adultos + niños de
    /// las reservas no canceladas y no borradas, excluyendo opcionalmente
    /// la reserva en edición. Debe ejecutarse en la transacción que tiene
    /// bloqueada la salida.
    pub async fn active_occupancy_in(
        conn: &mut PgConnection,
        route_run_id: Uuid,
        exclude: Option<Uuid>,
    ) -> Result<i64, AppError> {
        let occupied: (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(r.adults + r.children)::BIGINT, 0)
            FROM reservations r
            JOIN states s ON s.id = r.state_id
            WHERE r.route_run_id = $1
              AND r.deleted_at IS NULL
              AND LOWER(s.name) <> 'cancelled'
              AND ($2::uuid IS NULL OR r.id <> $2)
            "#,
        )
        .bind(route_run_id)
        .bind(exclude)
        .fetch_one(conn)
        .await?;

        Ok(occupied.0)
    }
}
