use crate::dto::common::ApiResponse;
use crate::dto::service_dto::{CreateServiceRequest, ServiceResponse, UpdateServiceRequest};
use crate::repositories::service_repository::ServiceRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct ServiceController {
    repository: ServiceRepository,
}

impl ServiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ServiceRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateServiceRequest,
    ) -> Result<ApiResponse<ServiceResponse>, AppError> {
        request.validate()?;

        let service = self
            .repository
            .create(request.name, request.description)
            .await?;
        Ok(ApiResponse::success_with_message(
            service.into(),
            "Servicio creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ServiceResponse, AppError> {
        let service = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Servicio no encontrado".to_string()))?;
        Ok(service.into())
    }

    pub async fn list(&self) -> Result<Vec<ServiceResponse>, AppError> {
        let services = self.repository.list().await?;
        Ok(services.into_iter().map(ServiceResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateServiceRequest,
    ) -> Result<ApiResponse<ServiceResponse>, AppError> {
        request.validate()?;

        let service = self
            .repository
            .update(id, request.name, request.description, request.active)
            .await?;
        Ok(ApiResponse::success_with_message(
            service.into(),
            "Servicio actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.soft_delete(id).await
    }
}
