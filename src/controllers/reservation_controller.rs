use crate::dto::common::ApiResponse;
use crate::dto::reservation_dto::{
    CreateReservationRequest, InvoiceEligibilityResponse, ReservationResponse,
    TransitionReservationRequest, UpdateReservationRequest,
};
use crate::models::reservation::Reservation;
use crate::services::reservation_service::ReservationService;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct ReservationController {
    service: ReservationService,
}

impl ReservationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: ReservationService::new(pool),
        }
    }

    async fn to_response(&self, reservation: Reservation) -> Result<ReservationResponse, AppError> {
        let state = self.service.current_state(&reservation).await?;

        Ok(ReservationResponse {
            id: reservation.id,
            route_run_id: reservation.route_run_id,
            tour_run_id: reservation.tour_run_id,
            passengers: reservation.passengers(),
            customer_name: reservation.customer_name,
            adults: reservation.adults,
            children: reservation.children,
            amount: reservation.amount,
            agency_id: reservation.agency_id,
            state: state.name,
            created_by: reservation.created_by,
            created_at: reservation.created_at,
            updated_at: reservation.updated_at,
        })
    }

    pub async fn create(
        &self,
        request: CreateReservationRequest,
        actor: Uuid,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        request.validate()?;

        let reservation = self.service.create(request, actor).await?;
        let response = self.to_response(reservation).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Reserva creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ReservationResponse, AppError> {
        let reservation = self.service.find_by_id(id).await?;
        self.to_response(reservation).await
    }

    pub async fn list(&self) -> Result<Vec<ReservationResponse>, AppError> {
        let reservations = self.service.list().await?;
        let mut responses = Vec::with_capacity(reservations.len());
        for reservation in reservations {
            responses.push(self.to_response(reservation).await?);
        }
        Ok(responses)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateReservationRequest,
        actor: Uuid,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        request.validate()?;

        let reservation = self.service.update(id, request, actor).await?;
        let response = self.to_response(reservation).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Reserva actualizada exitosamente".to_string(),
        ))
    }

    pub async fn transition(
        &self,
        id: Uuid,
        request: TransitionReservationRequest,
        actor: Uuid,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        request.validate()?;

        let reservation = self
            .service
            .transition(id, &request.target_state, actor)
            .await?;
        let response = self.to_response(reservation).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Estado de la reserva actualizado".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, actor: Uuid) -> Result<(), AppError> {
        self.service.delete(id, actor).await
    }

    pub async fn invoice_eligibility(
        &self,
        id: Uuid,
    ) -> Result<InvoiceEligibilityResponse, AppError> {
        let (reservation, state, eligible) = self.service.invoice_eligibility(id).await?;

        Ok(InvoiceEligibilityResponse {
            reservation_id: reservation.id,
            eligible,
            state: state.name,
        })
    }
}
