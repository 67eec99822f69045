//! Servicio de validación de capacidad
//!
//! Versión informativa (sin bloqueo) del chequeo de capacidad, para la API
//! de consulta. La escritura de reservas revalida siempre bajo bloqueo en
//! `reservation_service`; este camino no compromete plazas.

use crate::core::capacity::{self, CapacityCheck, CapacitySnapshot};
use crate::repositories::reservation_repository::ReservationRepository;
use crate::repositories::route_run_repository::RouteRunRepository;
use crate::repositories::tour_run_repository::TourRunRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct CapacityService {
    pool: PgPool,
}

impl CapacityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Chequeo de capacidad de una salida de ruta. Una salida o un vehículo
    /// inexistentes devuelven un resultado no-ok con mensaje, no un fallo.
    pub async fn validate_route_capacity(
        &self,
        route_run_id: Uuid,
        incoming: i32,
        exclude_reservation_id: Option<Uuid>,
    ) -> Result<CapacityCheck, AppError> {
        let route_runs = RouteRunRepository::new(self.pool.clone());
        let Some(run) = route_runs.find_by_id(route_run_id).await? else {
            return Ok(CapacityCheck::not_found("route run"));
        };

        let capacity = match run.vehicle_id {
            None => 0,
            Some(vehicle_id) => {
                let vehicles = VehicleRepository::new(self.pool.clone());
                match vehicles.capacity_of(vehicle_id).await? {
                    Some(capacity) => capacity,
                    None => return Ok(CapacityCheck::not_found("vehicle")),
                }
            }
        };

        let mut conn = self.pool.acquire().await?;
        let occupied = ReservationRepository::active_occupancy_in(
            &mut *conn,
            route_run_id,
            exclude_reservation_id,
        )
        .await?;

        let snapshot = CapacitySnapshot {
            capacity,
            occupied: occupied as i32,
        };
        Ok(capacity::check_route_capacity(snapshot, incoming))
    }

    /// Contraparte polimórfica para salidas de tour: siempre ok si existe.
    pub async fn validate_tour_capacity(
        &self,
        tour_run_id: Uuid,
        incoming: i32,
    ) -> Result<CapacityCheck, AppError> {
        let tour_runs = TourRunRepository::new(self.pool.clone());
        if !tour_runs.exists(tour_run_id).await? {
            return Ok(CapacityCheck::not_found("tour run"));
        }

        Ok(capacity::check_tour_capacity(incoming))
    }
}
