//! Repositorio de salidas de ruta
//!
//! Además del CRUD, este repositorio expone la lectura de candidatos para
//! la búsqueda de disponibilidad y el bloqueo de fila que protege la
//! sección crítica de ocupación.

use crate::core::availability::RouteRunCandidate;
use crate::models::route_run::RouteRun;
use crate::utils::errors::AppError;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

/// Fila de candidato con su snapshot de ocupación.
#[derive(Debug, FromRow)]
struct CandidateRow {
    id: Uuid,
    departs_at: NaiveTime,
    state: String,
    capacity: i32,
    occupied: i64,
}

/// Salida de ruta bloqueada para escritura, con su capacidad efectiva.
#[derive(Debug, FromRow)]
pub struct LockedRouteRun {
    pub id: Uuid,
    pub state_id: Uuid,
    pub capacity: i32,
}

pub struct RouteRunRepository {
    pool: PgPool,
}

impl RouteRunRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        service_id: Uuid,
        vehicle_id: Option<Uuid>,
        departs_on: NaiveDate,
        departs_at: NaiveTime,
        state_id: Uuid,
    ) -> Result<RouteRun, AppError> {
        let run = sqlx::query_as::<_, RouteRun>(
            r#"
            INSERT INTO route_runs (id, service_id, vehicle_id, departs_on, departs_at, state_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(service_id)
        .bind(vehicle_id)
        .bind(departs_on)
        .bind(departs_at)
        .bind(state_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(run)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RouteRun>, AppError> {
        let run = sqlx::query_as::<_, RouteRun>(
            "SELECT * FROM route_runs WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(run)
    }

    pub async fn list(&self) -> Result<Vec<RouteRun>, AppError> {
        let runs = sqlx::query_as::<_, RouteRun>(
            "SELECT * FROM route_runs WHERE deleted_at IS NULL ORDER BY departs_on, departs_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(runs)
    }

    pub async fn update(
        &self,
        id: Uuid,
        vehicle_id: Option<Uuid>,
        departs_on: Option<NaiveDate>,
        departs_at: Option<NaiveTime>,
    ) -> Result<RouteRun, AppError> {
        let run = sqlx::query_as::<_, RouteRun>(
            r#"
            UPDATE route_runs
            SET vehicle_id = COALESCE($2, vehicle_id),
                departs_on = COALESCE($3, departs_on),
                departs_at = COALESCE($4, departs_at)
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle_id)
        .bind(departs_on)
        .bind(departs_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Salida de ruta no encontrada".to_string()))?;

        Ok(run)
    }

    pub async fn update_state(&self, id: Uuid, state_id: Uuid) -> Result<RouteRun, AppError> {
        let run = sqlx::query_as::<_, RouteRun>(
            r#"
            UPDATE route_runs SET state_id = $2
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(state_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Salida de ruta no encontrada".to_string()))?;

        Ok(run)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE route_runs SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Salida de ruta no encontrada".to_string()));
        }
        Ok(())
    }

    /// Candidatos de un servicio y fecha con estado, capacidad efectiva y
    /// ocupación activa. Lectura sin bloqueo: la selección no compromete
    /// plazas.
    pub async fn candidates_for(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<RouteRunCandidate>, AppError> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT rr.id,
                   rr.departs_at,
                   s.name AS state,
                   COALESCE(v.capacity, 0) AS capacity,
                   COALESCE((
                       SELECT SUM(r.adults + r.children)::BIGINT
                       FROM reservations r
                       JOIN states rs ON rs.id = r.state_id
                       WHERE r.route_run_id = rr.id
                         AND r.deleted_at IS NULL
                         AND LOWER(rs.name) <> 'cancelled'
                   ), 0) AS occupied
            FROM route_runs rr
            JOIN states s ON s.id = rr.state_id
            LEFT JOIN vehicles v ON v.id = rr.vehicle_id AND v.deleted_at IS NULL
            WHERE rr.service_id = $1
              AND rr.departs_on = $2
              AND rr.deleted_at IS NULL
            ORDER BY rr.departs_at, rr.id
            "#,
        )
        .bind(service_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RouteRunCandidate {
                id: row.id,
                departs_at: row.departs_at,
                state: row.state,
                capacity: row.capacity,
                occupied: row.occupied as i32,
            })
            .collect())
    }

    /// Bloquea la fila de la salida (`FOR UPDATE`) dentro de la transacción
    /// del llamador y devuelve su capacidad efectiva. Dos altas concurrentes
    /// contra la misma salida se serializan aquí.
    pub async fn lock_for_booking(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<LockedRouteRun>, AppError> {
        let locked = sqlx::query_as::<_, LockedRouteRun>(
            r#"
            SELECT rr.id,
                   rr.state_id,
                   COALESCE(v.capacity, 0) AS capacity
            FROM route_runs rr
            LEFT JOIN vehicles v ON v.id = rr.vehicle_id AND v.deleted_at IS NULL
            WHERE rr.id = $1 AND rr.deleted_at IS NULL
            FOR UPDATE OF rr
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(locked)
    }
}
