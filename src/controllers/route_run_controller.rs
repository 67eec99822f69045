use crate::core::capacity::CapacityCheck;
use crate::core::state_catalog;
use crate::dto::common::ApiResponse;
use crate::dto::route_run_dto::{
    CapacityQuery, CreateRouteRunRequest, RouteRunResponse, UpdateRouteRunRequest,
};
use crate::dto::vehicle_dto::TransitionRequest;
use crate::models::route_run::RouteRun;
use crate::models::state::StateContext;
use crate::repositories::reservation_repository::ReservationRepository;
use crate::repositories::route_run_repository::RouteRunRepository;
use crate::repositories::service_repository::ServiceRepository;
use crate::repositories::state_repository::StateRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::capacity_service::CapacityService;
use crate::services::state_service::StateService;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct RouteRunController {
    pool: PgPool,
    repository: RouteRunRepository,
    states: StateRepository,
    state_service: StateService,
}

impl RouteRunController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RouteRunRepository::new(pool.clone()),
            states: StateRepository::new(pool.clone()),
            state_service: StateService::new(pool.clone()),
            pool,
        }
    }

    async fn to_response(&self, run: RouteRun) -> Result<RouteRunResponse, AppError> {
        let state = self.states.find_by_id(run.state_id).await?.ok_or_else(|| {
            AppError::Internal("La salida referencia un estado inexistente".to_string())
        })?;

        let capacity = match run.vehicle_id {
            None => 0,
            Some(vehicle_id) => VehicleRepository::new(self.pool.clone())
                .capacity_of(vehicle_id)
                .await?
                .unwrap_or(0),
        };

        let mut conn = self.pool.acquire().await?;
        let occupied =
            ReservationRepository::active_occupancy_in(&mut *conn, run.id, None).await?;

        Ok(RouteRunResponse {
            id: run.id,
            service_id: run.service_id,
            vehicle_id: run.vehicle_id,
            departs_on: run.departs_on,
            departs_at: run.departs_at,
            state: state.name,
            capacity,
            occupied,
            created_at: run.created_at,
        })
    }

    pub async fn create(
        &self,
        request: CreateRouteRunRequest,
    ) -> Result<ApiResponse<RouteRunResponse>, AppError> {
        request.validate()?;

        let services = ServiceRepository::new(self.pool.clone());
        if services.find_by_id(request.service_id).await?.is_none() {
            return Err(AppError::NotFound("Servicio no encontrado".to_string()));
        }

        if let Some(vehicle_id) = request.vehicle_id {
            let vehicles = VehicleRepository::new(self.pool.clone());
            if vehicles.find_by_id(vehicle_id).await?.is_none() {
                return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
            }
        }

        let initial_name = state_catalog::initial_state(StateContext::RouteRun);
        let initial_state = self
            .states
            .find_by_name(StateContext::RouteRun, initial_name)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Falta el estado obligatorio '{}' del contexto de salidas de ruta",
                    initial_name
                ))
            })?;

        let run = self
            .repository
            .create(
                request.service_id,
                request.vehicle_id,
                request.departs_on,
                request.departs_at,
                initial_state.id,
            )
            .await?;

        let response = self.to_response(run).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Salida de ruta creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<RouteRunResponse, AppError> {
        let run = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Salida de ruta no encontrada".to_string()))?;
        self.to_response(run).await
    }

    pub async fn list(&self) -> Result<Vec<RouteRunResponse>, AppError> {
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
        request: UpdateRouteRunRequest,
    ) -> Result<ApiResponse<RouteRunResponse>, AppError> {
        request.validate()?;

        if let Some(vehicle_id) = request.vehicle_id {
            let vehicles = VehicleRepository::new(self.pool.clone());
            if vehicles.find_by_id(vehicle_id).await?.is_none() {
                return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
            }
        }

        let run = self
            .repository
            .update(id, request.vehicle_id, request.departs_on, request.departs_at)
            .await?;

        let response = self.to_response(run).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Salida de ruta actualizada exitosamente".to_string(),
        ))
    }

    /// Cambio de estado validado contra el grafo del contexto `route_run`.
    pub async fn transition(
        &self,
        id: Uuid,
        request: TransitionRequest,
    ) -> Result<ApiResponse<RouteRunResponse>, AppError> {
        request.validate()?;

        let run = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Salida de ruta no encontrada".to_string()))?;

        let target = self
            .state_service
            .transition_entity(StateContext::RouteRun, run.state_id, &request.target_state)
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

    /// Chequeo informativo de capacidad. El alta de reservas revalida
    /// siempre bajo bloqueo; aquí no se compromete nada.
    pub async fn check_capacity(
        &self,
        id: Uuid,
        query: CapacityQuery,
    ) -> Result<CapacityCheck, AppError> {
        let capacity = CapacityService::new(self.pool.clone());
        capacity
            .validate_route_capacity(id, query.passengers, query.exclude_reservation_id)
            .await
    }
}
