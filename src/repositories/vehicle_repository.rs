//! Repositorio de vehículos

use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        plate: String,
        description: Option<String>,
        capacity: i32,
        state_id: Uuid,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, plate, description, capacity, state_id, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(plate)
        .bind(description)
        .bind(capacity)
        .bind(state_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE deleted_at IS NULL ORDER BY plate",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn plate_exists(&self, plate: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = $1 AND deleted_at IS NULL)",
        )
        .bind(plate)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        plate: Option<String>,
        description: Option<String>,
        capacity: Option<i32>,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate = COALESCE($2, plate),
                description = COALESCE($3, description),
                capacity = COALESCE($4, capacity)
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(plate)
        .bind(description)
        .bind(capacity)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(vehicle)
    }

    pub async fn update_state(&self, id: Uuid, state_id: Uuid) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles SET state_id = $2
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(state_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(vehicle)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE vehicles SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }
        Ok(())
    }

    /// Capacidad del vehículo, o `None` si no existe.
    pub async fn capacity_of(&self, id: Uuid) -> Result<Option<i32>, AppError> {
        let capacity: Option<(i32,)> = sqlx::query_as(
            "SELECT capacity FROM vehicles WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(capacity.map(|(c,)| c))
    }
}
