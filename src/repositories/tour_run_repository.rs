//! Repositorio de salidas de tour

use crate::core::availability::TourRunCandidate;
use crate::models::tour_run::TourRun;
use crate::utils::errors::AppError;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct CandidateRow {
    id: Uuid,
    departs_at: NaiveTime,
    state: String,
}

pub struct TourRunRepository {
    pool: PgPool,
}

impl TourRunRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        service_id: Uuid,
        guide_name: Option<String>,
        departs_on: NaiveDate,
        departs_at: NaiveTime,
        state_id: Uuid,
    ) -> Result<TourRun, AppError> {
        let run = sqlx::query_as::<_, TourRun>(
            r#"
            INSERT INTO tour_runs (id, service_id, guide_name, departs_on, departs_at, state_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(service_id)
        .bind(guide_name)
        .bind(departs_on)
        .bind(departs_at)
        .bind(state_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(run)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TourRun>, AppError> {
        let run = sqlx::query_as::<_, TourRun>(
            "SELECT * FROM tour_runs WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(run)
    }

    pub async fn list(&self) -> Result<Vec<TourRun>, AppError> {
        let runs = sqlx::query_as::<_, TourRun>(
            "SELECT * FROM tour_runs WHERE deleted_at IS NULL ORDER BY departs_on, departs_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(runs)
    }

    pub async fn update(
        &self,
        id: Uuid,
        guide_name: Option<String>,
        departs_on: Option<NaiveDate>,
        departs_at: Option<NaiveTime>,
    ) -> Result<TourRun, AppError> {
        let run = sqlx::query_as::<_, TourRun>(
            r#"
            UPDATE tour_runs
            SET guide_name = COALESCE($2, guide_name),
                departs_on = COALESCE($3, departs_on),
                departs_at = COALESCE($4, departs_at)
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(guide_name)
        .bind(departs_on)
        .bind(departs_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Salida de tour no encontrada".to_string()))?;

        Ok(run)
    }

    pub async fn update_state(&self, id: Uuid, state_id: Uuid) -> Result<TourRun, AppError> {
        let run = sqlx::query_as::<_, TourRun>(
            r#"
            UPDATE tour_runs SET state_id = $2
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(state_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Salida de tour no encontrada".to_string()))?;

        Ok(run)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE tour_runs SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Salida de tour no encontrada".to_string()));
        }
        Ok(())
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM tour_runs WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Candidatos de un servicio y fecha con su estado actual.
    pub async fn candidates_for(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<TourRunCandidate>, AppError> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT tr.id, tr.departs_at, s.name AS state
            FROM tour_runs tr
            JOIN states s ON s.id = tr.state_id
            WHERE tr.service_id = $1
              AND tr.departs_on = $2
              AND tr.deleted_at IS NULL
            ORDER BY tr.departs_at, tr.id
            "#,
        )
        .bind(service_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| TourRunCandidate {
                id: row.id,
                departs_at: row.departs_at,
                state: row.state,
            })
            .collect())
    }
}
