//! Repositorio de agencias

use crate::models::agency::Agency;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct AgencyRepository {
    pool: PgPool,
}

impl AgencyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        contact_email: Option<String>,
        phone: Option<String>,
    ) -> Result<Agency, AppError> {
        let agency = sqlx::query_as::<_, Agency>(
            r#"
            INSERT INTO agencies (id, name, contact_email, phone, active, created_at)
            VALUES ($1, $2, $3, $4, TRUE, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(contact_email)
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(agency)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Agency>, AppError> {
        let agency = sqlx::query_as::<_, Agency>(
            "SELECT * FROM agencies WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(agency)
    }

    pub async fn list(&self) -> Result<Vec<Agency>, AppError> {
        let agencies = sqlx::query_as::<_, Agency>(
            "SELECT * FROM agencies WHERE deleted_at IS NULL ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(agencies)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        contact_email: Option<String>,
        phone: Option<String>,
        active: Option<bool>,
    ) -> Result<Agency, AppError> {
        let agency = sqlx::query_as::<_, Agency>(
            r#"
            UPDATE agencies
            SET name = COALESCE($2, name),
                contact_email = COALESCE($3, contact_email),
                phone = COALESCE($4, phone),
                active = COALESCE($5, active)
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(contact_email)
        .bind(phone)
        .bind(active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Agencia no encontrada".to_string()))?;

        Ok(agency)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE agencies SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Agencia no encontrada".to_string()));
        }
        Ok(())
    }
}
