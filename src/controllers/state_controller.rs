use crate::dto::common::ApiResponse;
use crate::dto::state_dto::{
    CreateStateRequest, StateResponse, TransitionGraphResponse, UpdateStateRequest,
};
use crate::models::state::StateContext;
use crate::services::state_service::StateService;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct StateController {
    service: StateService,
}

impl StateController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: StateService::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateStateRequest,
    ) -> Result<ApiResponse<StateResponse>, AppError> {
        request.validate()?;

        let state = self.service.create(request).await?;
        Ok(ApiResponse::success_with_message(
            state.into(),
            "Estado creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<StateResponse, AppError> {
        let state = self.service.find_by_id(id).await?;
        Ok(state.into())
    }

    /// Estados activos de un contexto, ordenados por nombre.
    pub async fn list_by_context(
        &self,
        context: StateContext,
    ) -> Result<Vec<StateResponse>, AppError> {
        let states = self.service.list_by_context(context).await?;
        Ok(states.into_iter().map(StateResponse::from).collect())
    }

    pub fn transitions(&self, context: StateContext) -> TransitionGraphResponse {
        self.service.transition_graph(context)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateStateRequest,
    ) -> Result<ApiResponse<StateResponse>, AppError> {
        request.validate()?;

        let state = self.service.update(id, request).await?;
        Ok(ApiResponse::success_with_message(
            state.into(),
            "Estado actualizado exitosamente".to_string(),
        ))
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<ApiResponse<StateResponse>, AppError> {
        let state = self.service.deactivate(id).await?;
        Ok(ApiResponse::success_with_message(
            state.into(),
            "Estado desactivado".to_string(),
        ))
    }

    /// Se rehúsa con STATE_IN_USE mientras existan filas que lo referencien.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.service.delete(id).await
    }
}
