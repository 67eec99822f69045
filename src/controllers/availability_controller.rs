use crate::dto::availability_dto::{AvailabilityQuery, AvailabilityResponse};
use crate::services::availability_service::AvailabilityService;
use crate::utils::errors::AppError;
use sqlx::PgPool;

pub struct AvailabilityController {
    service: AvailabilityService,
}

impl AvailabilityController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: AvailabilityService::new(pool),
        }
    }

    /// Búsqueda de instancia reservable. Solo lectura: el alta posterior
    /// revalida la capacidad bajo bloqueo.
    pub async fn find(&self, query: AvailabilityQuery) -> Result<AvailabilityResponse, AppError> {
        if query.passengers <= 0 {
            return Err(AppError::BadRequest(
                "El número de pasajeros debe ser mayor que cero".to_string(),
            ));
        }

        let instance = self
            .service
            .find_availability(query.service_id, query.date, query.passengers)
            .await?;

        Ok(AvailabilityResponse {
            service_id: query.service_id,
            date: query.date,
            passengers: query.passengers,
            instance,
        })
    }
}
