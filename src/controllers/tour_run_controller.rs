use crate::core::capacity::CapacityCheck;
use crate::core::state_catalog;
use crate::dto::common::ApiResponse;
use crate::dto::route_run_dto::CapacityQuery;
use crate::dto::tour_run_dto::{CreateTourRunRequest, TourRunResponse, UpdateTourRunRequest};
use crate::dto::vehicle_dto::TransitionRequest;
use crate::models::state::StateContext;
use crate::models::tour_run::TourRun;
use crate::repositories::service_repository::ServiceRepository;
use crate::repositories::state_repository::StateRepository;
use crate::repositories::tour_run_repository::TourRunRepository;
use crate::services::capacity_service::CapacityService;
use crate::services::state_service::StateService;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct TourRunController {
    pool: PgPool,
    repository: TourRunRepository,
    states: StateRepository,
    state_service: StateService,
}

impl TourRunController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TourRunRepository::new(pool.clone()),
            states: StateRepository::new(pool.clone()),
            state_service: StateService::new(pool.clone()),
            pool,
        }
    }

    async fn to_response(&self, run: TourRun) -> Result<TourRunResponse, AppError> {
        let state = self.states.find_by_id(run.state_id).await?.ok_or_else(|| {
            AppError::Internal("La salida referencia un estado inexistente".to_string())
        })?;

        Ok(TourRunResponse {
            id: run.id,
            service_id: run.service_id,
            guide_name: run.guide_name,
            departs_on: run.departs_on,
            departs_at: run.departs_at,
            state: state.name,
            created_at: run.created_at,
        })
    }

    pub async fn create(
        &self,
        request: CreateTourRunRequest,
    ) -> Result<ApiResponse<TourRunResponse>, AppError> {
        request.validate()?;

        let services = ServiceRepository::new(self.pool.clone());
        if services.find_by_id(request.service_id).await?.is_none() {
            return Err(AppError::NotFound("Servicio no encontrado".to_string()));
        }

        let initial_name = state_catalog::initial_state(StateContext::TourRun);
        let initial_state = self
            .states
            .find_by_name(StateContext::TourRun, initial_name)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Falta el estado obligatorio '{}' del contexto de salidas de tour",
                    initial_name
                ))
            })?;

        let run = self
            .repository
            .create(
                request.service_id,
                request.guide_name,
                request.departs_on,
                request.departs_at,
                initial_state.id,
            )
            .await?;

        let response = self.to_response(run).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Salida de tour creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TourRunResponse, AppError> {
        let run = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Salida de tour no encontrada".to_string()))?;
        self.to_response(run).await
    }

    pub async fn list(&self) -> Result<Vec<TourRunResponse>, AppError> {
        let runs = self.repository.list().await?;
        let mut responses = Vec::with_capacity(runs.len());
        for run in runs {
            responses.push(self.to_response(run).await?);
        }
        Ok(responses)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateTourRunRequest,
    ) -> Result<ApiResponse<TourRunResponse>, AppError> {
        request.validate()?;

        let run = self
            .repository
            .update(id, request.guide_name, request.departs_on, request.departs_at)
            .await?;

        let response = self.to_response(run).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Salida de tour actualizada exitosamente".to_string(),
        ))
    }

    /// Cambio de estado validado contra el grafo del contexto `tour_run`.
    pub async fn transition(
        &self,
        id: Uuid,
        request: TransitionRequest,
    ) -> Result<ApiResponse<TourRunResponse>, AppError> {
        request.validate()?;

        let run = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Salida de tour no encontrada".to_string()))?;

        let target = self
            .state_service
            .transition_entity(StateContext::TourRun, run.state_id, &request.target_state)
            .await?;

        let run = self.repository.update_state(id, target.id).await?;
        let response = self.to_response(run).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Estado de la salida actualizado".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.soft_delete(id).await
    }

    /// Contraparte polimórfica del chequeo de ruta: los tours no tienen
    /// techo, así que solo falla si la salida no existe.
    pub async fn check_capacity(
        &self,
        id: Uuid,
        query: CapacityQuery,
    ) -> Result<CapacityCheck, AppError> {
        let capacity = CapacityService::new(self.pool.clone());
        capacity.validate_tour_capacity(id, query.passengers).await
    }
}
