use crate::core::state_catalog;
use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, TransitionRequest, UpdateVehicleRequest, VehicleResponse,
};
use crate::models::state::StateContext;
use crate::models::vehicle::Vehicle;
use crate::repositories::state_repository::StateRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::state_service::StateService;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct VehicleController {
    repository: VehicleRepository,
    states: StateRepository,
    state_service: StateService,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            states: StateRepository::new(pool.clone()),
            state_service: StateService::new(pool),
        }
    }

    async fn to_response(&self, vehicle: Vehicle) -> Result<VehicleResponse, AppError> {
        let state = self
            .states
            .find_by_id(vehicle.state_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal("El vehículo referencia un estado inexistente".to_string())
            })?;

        Ok(VehicleResponse {
            id: vehicle.id,
            plate: vehicle.plate,
            description: vehicle.description,
            capacity: vehicle.capacity,
            state: state.name,
            created_at: vehicle.created_at,
        })
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if self.repository.plate_exists(&request.plate).await? {
            return Err(AppError::Conflict(
                "La matrícula ya está registrada".to_string(),
            ));
        }

        let initial_name = state_catalog::initial_state(StateContext::Vehicle);
        let initial_state = self
            .states
            .find_by_name(StateContext::Vehicle, initial_name)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Falta el estado obligatorio '{}' del contexto de vehículos",
                    initial_name
                ))
            })?;

        let vehicle = self
            .repository
            .create(
                request.plate,
                request.description,
                request.capacity,
                initial_state.id,
            )
            .await?;

        let response = self.to_response(vehicle).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;
        self.to_response(vehicle).await
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list().await?;
        let mut responses = Vec::with_capacity(vehicles.len());
        for vehicle in vehicles {
            responses.push(self.to_response(vehicle).await?);
        }
        Ok(responses)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle = self
            .repository
            .update(id, request.plate, request.description, request.capacity)
            .await?;

        let response = self.to_response(vehicle).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    /// Cambio de estado validado contra el grafo del contexto `vehicle`.
    pub async fn transition(
        &self,
        id: Uuid,
        request: TransitionRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let target = self
            .state_service
            .transition_entity(StateContext::Vehicle, vehicle.state_id, &request.target_state)
            .await?;

        let vehicle = self.repository.update_state(id, target.id).await?;
        let response = self.to_response(vehicle).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Estado del vehículo actualizado".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.soft_delete(id).await
    }
}
