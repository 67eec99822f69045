//! Servicio de búsqueda de disponibilidad
//!
//! Lee los candidatos de un servicio y fecha y delega la selección en el
//! núcleo. Solo lectura: el alta posterior revalida la capacidad bajo
//! bloqueo.

use crate::core::availability::{self, ServiceInstanceRef};
use crate::repositories::route_run_repository::RouteRunRepository;
use crate::repositories::tour_run_repository::TourRunRepository;
use crate::utils::errors::AppError;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

pub struct AvailabilityService {
    route_runs: RouteRunRepository,
    tour_runs: TourRunRepository,
}

impl AvailabilityService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            route_runs: RouteRunRepository::new(pool.clone()),
            tour_runs: TourRunRepository::new(pool),
        }
    }

    pub async fn find_availability(
        &self,
        service_id: Uuid,
        date: NaiveDate,
        passengers: i32,
    ) -> Result<Option<ServiceInstanceRef>, AppError> {
        let route_candidates = self.route_runs.candidates_for(service_id, date).await?;
        let tour_candidates = self.tour_runs.candidates_for(service_id, date).await?;

        let found =
            availability::find_availability(&route_candidates, &tour_candidates, passengers);

        tracing::debug!(
            "Disponibilidad servicio={} fecha={} pasajeros={}: {:?}",
            service_id,
            date,
            passengers,
            found
        );

        Ok(found)
    }
}
