use crate::dto::agency_dto::{AgencyResponse, CreateAgencyRequest, UpdateAgencyRequest};
use crate::dto::common::ApiResponse;
use crate::repositories::agency_repository::AgencyRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct AgencyController {
    repository: AgencyRepository,
}

impl AgencyController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AgencyRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateAgencyRequest,
    ) -> Result<ApiResponse<AgencyResponse>, AppError> {
        request.validate()?;

        let agency = self
            .repository
            .create(request.name, request.contact_email, request.phone)
            .await?;
        Ok(ApiResponse::success_with_message(
            agency.into(),
            "Agencia creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<AgencyResponse, AppError> {
        let agency = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agencia no encontrada".to_string()))?;
        Ok(agency.into())
    }

    pub async fn list(&self) -> Result<Vec<AgencyResponse>, AppError> {
        let agencies = self.repository.list().await?;
        Ok(agencies.into_iter().map(AgencyResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateAgencyRequest,
    ) -> Result<ApiResponse<AgencyResponse>, AppError> {
        request.validate()?;

        let agency = self
            .repository
            .update(
                id,
                request.name,
                request.contact_email,
                request.phone,
                request.active,
            )
            .await?;
        Ok(ApiResponse::success_with_message(
            agency.into(),
            "Agencia actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.soft_delete(id).await
    }
}
