//! Repositorio de servicios

use crate::models::service::Service;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (id, name, description, active, created_at)
            VALUES ($1, $2, $3, TRUE, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn list(&self) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE deleted_at IS NULL ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
        active: Option<bool>,
    ) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                active = COALESCE($4, active)
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Servicio no encontrado".to_string()))?;

        Ok(service)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE services SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Servicio no encontrado".to_string()));
        }
        Ok(())
    }
}
