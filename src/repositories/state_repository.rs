//! Repositorio del catálogo de estados

use crate::models::state::{State, StateContext};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct StateRepository {
    pool: PgPool,
}

impl StateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        context: StateContext,
        code: String,
        name: String,
    ) -> Result<State, AppError> {
        let state = sqlx::query_as::<_, State>(
            r#"
            INSERT INTO states (id, context, code, name, active, created_at)
            VALUES ($1, $2, $3, $4, TRUE, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(context)
        .bind(code)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(state)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<State>, AppError> {
        let state = sqlx::query_as::<_, State>(
            "SELECT * FROM states WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(state)
    }

    /// Estados activos de un contexto, ordenados por nombre para listados.
    pub async fn find_by_context(&self, context: StateContext) -> Result<Vec<State>, AppError> {
        let states = sqlx::query_as::<_, State>(
            r#"
            SELECT * FROM states
            WHERE context = $1 AND active = TRUE AND deleted_at IS NULL
            ORDER BY name
            "#,
        )
        .bind(context)
        .fetch_all(&self.pool)
        .await?;

        Ok(states)
    }

    /// Busca un estado activo por nombre exacto (sin mayúsculas/minúsculas)
    /// dentro de un contexto.
    pub async fn find_by_name(
        &self,
        context: StateContext,
        name: &str,
    ) -> Result<Option<State>, AppError> {
        let state = sqlx::query_as::<_, State>(
            r#"
            SELECT * FROM states
            WHERE context = $1 AND LOWER(name) = LOWER($2)
              AND active = TRUE AND deleted_at IS NULL
            "#,
        )
        .bind(context)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(state)
    }

    /// Todos los códigos existentes de un contexto, incluidos inactivos y
    /// borrados: la generación de códigos no debe reutilizar ninguno.
    pub async fn codes_for_context(&self, context: StateContext) -> Result<Vec<String>, AppError> {
        let codes: Vec<(String,)> =
            sqlx::query_as("SELECT code FROM states WHERE context = $1")
                .bind(context)
                .fetch_all(&self.pool)
                .await?;

        Ok(codes.into_iter().map(|(code,)| code).collect())
    }

    pub async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM states WHERE code = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        active: Option<bool>,
    ) -> Result<State, AppError> {
        let state = sqlx::query_as::<_, State>(
            r#"
            UPDATE states
            SET name = COALESCE($2, name),
                active = COALESCE($3, active)
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Estado no encontrado".to_string()))?;

        Ok(state)
    }

    /// Desactivación: el estado deja de ofrecerse pero las filas que lo
    /// referencian siguen siendo válidas.
    pub async fn deactivate(&self, id: Uuid) -> Result<State, AppError> {
        self.update(id, None, Some(false)).await
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE states SET deleted_at = NOW(), active = FALSE WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Estado no encontrado".to_string()));
        }
        Ok(())
    }

    /// Filas que referencian el estado en los cinco tipos de entidad con
    /// contexto. Se cuentan también las borradas en suave: la FK sigue viva.
    pub async fn count_referencing_entities(&self, state_id: Uuid) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM vehicles WHERE state_id = $1)
              + (SELECT COUNT(*) FROM route_runs WHERE state_id = $1)
              + (SELECT COUNT(*) FROM tour_runs WHERE state_id = $1)
              + (SELECT COUNT(*) FROM reservations WHERE state_id = $1)
              + (SELECT COUNT(*) FROM invoices WHERE state_id = $1)
            "#,
        )
        .bind(state_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
