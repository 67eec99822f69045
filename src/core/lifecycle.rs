//! Ciclo de vida de la reserva
//!
//! Decisiones puras de alta, modificación y cambio de estado. Cada función
//! recibe los datos actuales y la petición y devuelve el nuevo estado o el
//! motivo de rechazo; la persistencia, la auditoría y las notificaciones
//! ocurren fuera, solo tras una decisión favorable.

use super::capacity::{check_route_capacity, CapacitySnapshot};
use super::exclusivity;
use super::state_catalog;
use super::RejectionReason;
use crate::models::state::StateContext;

/// Datos de la petición de alta o edición relevantes para el núcleo.
#[derive(Debug, Clone, Copy)]
pub struct BookingRequest<'a> {
    pub has_route_run: bool,
    pub has_tour_run: bool,
    /// Adultos + niños.
    pub passengers: i32,
    /// Estado inicial pedido explícitamente en el alta; en edición se
    /// ignora (los cambios de estado van por transición).
    pub requested_state: Option<&'a str>,
}

/// Decide el alta de una reserva. `route_capacity` es el snapshot de la
/// salida de ruta destino, leído bajo bloqueo por el llamador; `None`
/// cuando la salida referenciada no existe o la reserva va contra un tour.
///
/// Devuelve el nombre del estado inicial con el que debe crearse.
pub fn decide_create(
    request: &BookingRequest<'_>,
    route_capacity: Option<CapacitySnapshot>,
) -> Result<&'static str, RejectionReason> {
    exclusivity::check_service_assignment(request.has_route_run, request.has_tour_run)?;

    if request.has_route_run {
        let snapshot = route_capacity
            .ok_or_else(|| RejectionReason::ReferenceNotFound("route run".to_string()))?;
        let check = check_route_capacity(snapshot, request.passengers);
        if !check.ok {
            return Err(RejectionReason::CapacityExceeded {
                remaining: check.remaining.unwrap_or(0),
            });
        }
    }

    let initial = state_catalog::initial_state(StateContext::Reservation);
    match request.requested_state {
        None => Ok(initial),
        Some(name) if name.eq_ignore_ascii_case(initial) => Ok(initial),
        Some(name) => Err(RejectionReason::ConstraintViolation(format!(
            "'{}' is not a valid initial state for a reservation",
            name
        ))),
    }
}

/// Decide la edición de una reserva existente. El snapshot de capacidad
/// debe excluir la ocupación previa de la propia reserva.
pub fn decide_modify(
    current_state: &str,
    request: &BookingRequest<'_>,
    route_capacity: Option<CapacitySnapshot>,
) -> Result<(), RejectionReason> {
    if state_catalog::is_locked(StateContext::Reservation, current_state) {
        return Err(RejectionReason::ConstraintViolation(format!(
            "a reservation in state '{}' can no longer be modified",
            current_state
        )));
    }

    exclusivity::check_service_assignment(request.has_route_run, request.has_tour_run)?;

    if request.has_route_run {
        let snapshot = route_capacity
            .ok_or_else(|| RejectionReason::ReferenceNotFound("route run".to_string()))?;
        let check = check_route_capacity(snapshot, request.passengers);
        if !check.ok {
            return Err(RejectionReason::CapacityExceeded {
                remaining: check.remaining.unwrap_or(0),
            });
        }
    }

    Ok(())
}

/// Decide un cambio de estado puro (confirmar, cancelar, cerrar...) para
/// cualquier contexto. Un origen desconocido no permite transición alguna.
pub fn decide_transition(
    context: StateContext,
    current_state: &str,
    target_state: &str,
) -> Result<(), RejectionReason> {
    if state_catalog::can_transition(context, current_state, target_state) {
        Ok(())
    } else {
        Err(RejectionReason::IllegalTransition {
            context,
            from: current_state.to_string(),
            to: target_state.to_string(),
        })
    }
}

/// Predicado puro de elegibilidad de facturación: la reserva está en el
/// estado "confirmado" designado de su contexto. No muta nada.
pub fn invoice_eligible(current_state: &str) -> bool {
    state_catalog::confirmed_state(StateContext::Reservation)
        .map(|name| name.eq_ignore_ascii_case(current_state))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(route: bool, tour: bool, passengers: i32) -> BookingRequest<'static> {
        BookingRequest {
            has_route_run: route,
            has_tour_run: tour,
            passengers,
            requested_state: None,
        }
    }

    #[test]
    fn test_create_against_tour_needs_no_capacity() {
        let state = decide_create(&booking(false, true, 500), None).unwrap();
        assert_eq!(state, "Pending");
    }

    #[test]
    fn test_create_rejects_double_reference() {
        // Escenario: reserva con salida de ruta y de tour a la vez.
        let err = decide_create(&booking(true, true, 2), None).unwrap_err();
        assert!(matches!(err, RejectionReason::ConstraintViolation(_)));
    }

    #[test]
    fn test_create_rejects_missing_reference() {
        let err = decide_create(&booking(false, false, 2), None).unwrap_err();
        assert!(matches!(err, RejectionReason::ConstraintViolation(_)));
    }

    #[test]
    fn test_create_checks_route_capacity() {
        let snapshot = CapacitySnapshot { capacity: 20, occupied: 18 };
        let err = decide_create(&booking(true, false, 3), Some(snapshot)).unwrap_err();
        assert_eq!(err, RejectionReason::CapacityExceeded { remaining: 2 });

        let snapshot = CapacitySnapshot { capacity: 20, occupied: 15 };
        assert!(decide_create(&booking(true, false, 5), Some(snapshot)).is_ok());
    }

    #[test]
    fn test_create_missing_route_run_is_reported() {
        let err = decide_create(&booking(true, false, 2), None).unwrap_err();
        assert_eq!(err, RejectionReason::ReferenceNotFound("route run".to_string()));
    }

    #[test]
    fn test_create_accepts_explicit_initial_state() {
        let request = BookingRequest {
            requested_state: Some("pending"),
            ..booking(false, true, 2)
        };
        assert_eq!(decide_create(&request, None).unwrap(), "Pending");
    }

    #[test]
    fn test_create_rejects_non_initial_state() {
        let request = BookingRequest {
            requested_state: Some("Confirmed"),
            ..booking(false, true, 2)
        };
        let err = decide_create(&request, None).unwrap_err();
        assert!(matches!(err, RejectionReason::ConstraintViolation(_)));
    }

    #[test]
    fn test_modify_locked_reservation_rejected() {
        for state in ["Cancelled", "Invoiced", "Executed"] {
            let err = decide_modify(state, &booking(false, true, 2), None).unwrap_err();
            assert!(matches!(err, RejectionReason::ConstraintViolation(_)));
        }
    }

    #[test]
    fn test_modify_revalidates_capacity() {
        // La ocupación del snapshot ya excluye la reserva editada.
        let snapshot = CapacitySnapshot { capacity: 10, occupied: 8 };
        let err = decide_modify("Pending", &booking(true, false, 3), Some(snapshot)).unwrap_err();
        assert_eq!(err, RejectionReason::CapacityExceeded { remaining: 2 });

        assert!(decide_modify("Confirmed", &booking(true, false, 2), Some(snapshot)).is_ok());
    }

    #[test]
    fn test_transition_legal_and_illegal() {
        assert!(decide_transition(StateContext::Reservation, "Pending", "Confirmed").is_ok());
        assert!(decide_transition(StateContext::Reservation, "Confirmed", "Cancelled").is_ok());

        let err =
            decide_transition(StateContext::Reservation, "Pending", "Invoiced").unwrap_err();
        assert!(matches!(err, RejectionReason::IllegalTransition { .. }));
    }

    #[test]
    fn test_cancelled_is_terminal() {
        // Escenario: desde "Cancelled" ninguna transición es legal.
        for target in ["Pending", "Confirmed", "Executed", "Invoiced", "Cancelled"] {
            assert!(decide_transition(StateContext::Reservation, "Cancelled", target).is_err());
        }
    }

    #[test]
    fn test_invoice_eligibility_is_by_confirmed_name() {
        assert!(invoice_eligible("Confirmed"));
        assert!(invoice_eligible("confirmed"));
        assert!(!invoice_eligible("Pending"));
        assert!(!invoice_eligible("Invoiced"));
    }
}
