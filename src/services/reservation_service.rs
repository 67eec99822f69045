//! Servicio del ciclo de vida de reservas
//!
//! Cada operación lee los snapshots que el núcleo necesita, le pide la
//! decisión y persiste solo si fue favorable. La sección crítica
//! leer-ocupación / decidir / escribir se ejecuta con la salida de ruta
//! bloqueada (`FOR UPDATE`), de modo que dos altas concurrentes contra la
//! misma salida no puedan sobrevender el vehículo.

use crate::core::capacity::CapacitySnapshot;
use crate::core::lifecycle::{self, BookingRequest};
use crate::core::RejectionReason;
use crate::dto::reservation_dto::{CreateReservationRequest, UpdateReservationRequest};
use crate::models::reservation::Reservation;
use crate::models::state::{State, StateContext};
use crate::repositories::reservation_repository::{
    NewReservation, ReservationChanges, ReservationRepository,
};
use crate::repositories::route_run_repository::RouteRunRepository;
use crate::repositories::state_repository::StateRepository;
use crate::repositories::tour_run_repository::TourRunRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub struct ReservationService {
    pool: PgPool,
}

impl ReservationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn reservations(&self) -> ReservationRepository {
        ReservationRepository::new(self.pool.clone())
    }

    fn states(&self) -> StateRepository {
        StateRepository::new(self.pool.clone())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Reservation, AppError> {
        self.reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Reservation>, AppError> {
        self.reservations().list().await
    }

    /// Estado actual de una reserva; una referencia rota es un fallo de
    /// configuración, no un rechazo.
    pub async fn current_state(&self, reservation: &Reservation) -> Result<State, AppError> {
        self.states()
            .find_by_id(reservation.state_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal("La reserva referencia un estado inexistente".to_string())
            })
    }

    /// Alta de reserva: exclusividad, capacidad bajo bloqueo y estado
    /// inicial, en ese orden.
    pub async fn create(
        &self,
        request: CreateReservationRequest,
        actor: Uuid,
    ) -> Result<Reservation, AppError> {
        let booking = BookingRequest {
            has_route_run: request.route_run_id.is_some(),
            has_tour_run: request.tour_run_id.is_some(),
            passengers: request.adults + request.children,
            requested_state: request.state.as_deref(),
        };

        let mut tx = self.pool.begin().await?;

        let route_capacity = match request.route_run_id {
            None => None,
            Some(route_run_id) => {
                match RouteRunRepository::lock_for_booking(&mut *tx, route_run_id).await? {
                    None => None,
                    Some(locked) => {
                        let occupied = ReservationRepository::active_occupancy_in(
                            &mut *tx,
                            route_run_id,
                            None,
                        )
                        .await?;
                        Some(CapacitySnapshot {
                            capacity: locked.capacity,
                            occupied: occupied as i32,
                        })
                    }
                }
            }
        };

        let initial_name = lifecycle::decide_create(&booking, route_capacity)?;

        if let Some(tour_run_id) = request.tour_run_id {
            let tour_runs = TourRunRepository::new(self.pool.clone());
            if !tour_runs.exists(tour_run_id).await? {
                return Err(RejectionReason::ReferenceNotFound("tour run".to_string()).into());
            }
        }

        let initial_state = self
            .states()
            .find_by_name(StateContext::Reservation, initial_name)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Falta el estado obligatorio '{}' del contexto de reservas",
                    initial_name
                ))
            })?;

        let reservation = ReservationRepository::create_in(
            &mut *tx,
            NewReservation {
                route_run_id: request.route_run_id,
                tour_run_id: request.tour_run_id,
                customer_name: request.customer_name,
                adults: request.adults,
                children: request.children,
                amount: request.amount,
                agency_id: request.agency_id,
                state_id: initial_state.id,
                created_by: actor,
            },
        )
        .await?;

        tx.commit().await?;

        info!(
            "Reserva {} creada por {} ({} pasajeros)",
            reservation.id,
            actor,
            reservation.passengers()
        );
        Ok(reservation)
    }

    /// Edición de reserva: se rechaza en estados bloqueados y revalida
    /// exclusividad y capacidad contra los valores nuevos, excluyendo la
    /// ocupación previa de la propia reserva.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateReservationRequest,
        actor: Uuid,
    ) -> Result<Reservation, AppError> {
        let existing = self.find_by_id(id).await?;
        let current_state = self.current_state(&existing).await?;

        let booking = BookingRequest {
            has_route_run: request.route_run_id.is_some(),
            has_tour_run: request.tour_run_id.is_some(),
            passengers: request.adults + request.children,
            requested_state: None,
        };

        let mut tx = self.pool.begin().await?;

        let route_capacity = match request.route_run_id {
            None => None,
            Some(route_run_id) => {
                match RouteRunRepository::lock_for_booking(&mut *tx, route_run_id).await? {
                    None => None,
                    Some(locked) => {
                        let occupied = ReservationRepository::active_occupancy_in(
                            &mut *tx,
                            route_run_id,
                            Some(id),
                        )
                        .await?;
                        Some(CapacitySnapshot {
                            capacity: locked.capacity,
                            occupied: occupied as i32,
                        })
                    }
                }
            }
        };

        lifecycle::decide_modify(&current_state.name, &booking, route_capacity)?;

        if let Some(tour_run_id) = request.tour_run_id {
            let tour_runs = TourRunRepository::new(self.pool.clone());
            if !tour_runs.exists(tour_run_id).await? {
                return Err(RejectionReason::ReferenceNotFound("tour run".to_string()).into());
            }
        }

        let updated = ReservationRepository::update_in(
            &mut *tx,
            id,
            ReservationChanges {
                route_run_id: request.route_run_id,
                tour_run_id: request.tour_run_id,
                customer_name: request.customer_name,
                adults: request.adults,
                children: request.children,
                amount: request.amount,
                agency_id: request.agency_id,
            },
        )
        .await?;

        tx.commit().await?;

        info!("Reserva {} modificada por {}", id, actor);
        Ok(updated)
    }

    /// Cambio de estado puro (confirmar, cancelar, ejecutar, facturar).
    pub async fn transition(
        &self,
        id: Uuid,
        target_state: &str,
        actor: Uuid,
    ) -> Result<Reservation, AppError> {
        let existing = self.find_by_id(id).await?;
        let current_state = self.current_state(&existing).await?;

        lifecycle::decide_transition(StateContext::Reservation, &current_state.name, target_state)?;

        let target = self
            .states()
            .find_by_name(StateContext::Reservation, target_state)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Falta el estado obligatorio '{}' del contexto de reservas",
                    target_state
                ))
            })?;

        let updated = self.reservations().update_state(id, target.id).await?;

        info!(
            "Reserva {}: transición '{}' -> '{}' por {}",
            id, current_state.name, target.name, actor
        );
        Ok(updated)
    }

    /// Borrado suave. Las reservas nunca se eliminan en físico.
    pub async fn delete(&self, id: Uuid, actor: Uuid) -> Result<(), AppError> {
        self.find_by_id(id).await?;
        self.reservations().soft_delete(id).await?;

        info!("Reserva {} borrada (suave) por {}", id, actor);
        Ok(())
    }

    /// Elegibilidad de facturación: predicado puro sobre el estado actual.
    pub async fn invoice_eligibility(&self, id: Uuid) -> Result<(Reservation, State, bool), AppError> {
        let reservation = self.find_by_id(id).await?;
        let state = self.current_state(&reservation).await?;
        let eligible = lifecycle::invoice_eligible(&state.name);

        Ok((reservation, state, eligible))
    }
}
