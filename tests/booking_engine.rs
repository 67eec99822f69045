//! Tests de integración del motor de reservas: capacidad, exclusividad y
//! ciclo de vida completos, sin base de datos (el núcleo decide sobre
//! snapshots puros).

use agency_backoffice::core::capacity::{
    check_route_capacity, check_tour_capacity, CapacitySnapshot,
};
use agency_backoffice::core::exclusivity::check_service_assignment;
use agency_backoffice::core::lifecycle::{
    decide_create, decide_modify, decide_transition, invoice_eligible, BookingRequest,
};
use agency_backoffice::core::state_catalog::{can_transition, generate_code, transitions_for};
use agency_backoffice::core::RejectionReason;
use agency_backoffice::models::state::StateContext;

fn route_booking(passengers: i32) -> BookingRequest<'static> {
    BookingRequest {
        has_route_run: true,
        has_tour_run: false,
        passengers,
        requested_state: None,
    }
}

fn tour_booking(passengers: i32) -> BookingRequest<'static> {
    BookingRequest {
        has_route_run: false,
        has_tour_run: true,
        passengers,
        requested_state: None,
    }
}

#[test]
fn test_full_reservation_walk_until_invoiced() {
    // Alta contra una salida con hueco.
    let snapshot = CapacitySnapshot {
        capacity: 20,
        occupied: 15,
    };
    let initial = decide_create(&route_booking(5), Some(snapshot)).unwrap();
    assert_eq!(initial, "Pending");

    // Pending -> Confirmed -> Invoiced, cada paso legal.
    decide_transition(StateContext::Reservation, initial, "Confirmed").unwrap();
    assert!(invoice_eligible("Confirmed"));
    decide_transition(StateContext::Reservation, "Confirmed", "Invoiced").unwrap();

    // Facturada: terminal, nada más es legal.
    for target in ["Pending", "Confirmed", "Executed", "Cancelled"] {
        assert!(decide_transition(StateContext::Reservation, "Invoiced", target).is_err());
    }
}

#[test]
fn test_overbooked_run_rejects_with_remaining_seats() {
    // Escenario A: capacidad 20, ocupadas 18, entran 3.
    let snapshot = CapacitySnapshot {
        capacity: 20,
        occupied: 18,
    };
    let check = check_route_capacity(snapshot, 3);
    assert!(!check.ok);
    assert_eq!(check.remaining, Some(2));

    let err = decide_create(&route_booking(3), Some(snapshot)).unwrap_err();
    assert_eq!(err, RejectionReason::CapacityExceeded { remaining: 2 });
    assert_eq!(err.to_string(), "insufficient capacity, 2 seats available");
}

#[test]
fn test_group_that_fits_is_accepted() {
    // Escenario B: capacidad 20, ocupadas 15, entran 5.
    let snapshot = CapacitySnapshot {
        capacity: 20,
        occupied: 15,
    };
    assert!(check_route_capacity(snapshot, 5).ok);
    assert!(decide_create(&route_booking(5), Some(snapshot)).is_ok());
}

#[test]
fn test_tour_run_accepts_any_group() {
    // Escenario C: tour con 500 entrantes, siempre ok.
    assert!(check_tour_capacity(500).ok);
    assert!(decide_create(&tour_booking(500), None).is_ok());
}

#[test]
fn test_cancelled_reservation_is_terminal() {
    // Escenario D: desde "Cancelled" toda transición es ilegal.
    let (_, targets) = transitions_for(StateContext::Reservation)
        .iter()
        .find(|(name, _)| *name == "Cancelled")
        .unwrap();
    assert!(targets.is_empty());

    for target in ["Pending", "Confirmed", "Executed", "Cancelled", "Invoiced"] {
        assert!(!can_transition(StateContext::Reservation, "Cancelled", target));
    }
}

#[test]
fn test_double_service_reference_is_a_constraint_violation() {
    // Escenario E: salida de ruta y de tour a la vez.
    let err = check_service_assignment(true, true).unwrap_err();
    assert!(matches!(err, RejectionReason::ConstraintViolation(_)));

    let request = BookingRequest {
        has_route_run: true,
        has_tour_run: true,
        passengers: 2,
        requested_state: None,
    };
    let err = decide_create(
        &request,
        Some(CapacitySnapshot {
            capacity: 50,
            occupied: 0,
        }),
    )
    .unwrap_err();
    assert!(matches!(err, RejectionReason::ConstraintViolation(_)));
}

#[test]
fn test_generate_code_on_empty_context() {
    // Escenario F: sin códigos previos, prefijo + "001".
    assert_eq!(generate_code(StateContext::TourRun, &[]), "TOU001");
    assert_eq!(generate_code(StateContext::Invoice, &[]), "INV001");
}

#[test]
fn test_locked_states_block_modification_but_not_invoicing() {
    let err = decide_modify("Executed", &tour_booking(2), None).unwrap_err();
    assert!(matches!(err, RejectionReason::ConstraintViolation(_)));

    // "Executed" sigue pudiendo facturarse aunque no se pueda editar.
    assert!(decide_transition(StateContext::Reservation, "Executed", "Invoiced").is_ok());
}

#[test]
fn test_modify_excluding_own_occupancy() {
    // Reserva de 4 plazas en una salida 10/10: al editarla a 6 plazas, el
    // snapshot ya excluye sus 4 previas (ocupadas 6), así que cabe.
    let snapshot = CapacitySnapshot {
        capacity: 10,
        occupied: 6,
    };
    assert!(decide_modify("Pending", &route_booking(6), Some(snapshot)).is_ok());

    // A 5 plazas más de las que quedan, no.
    let err = decide_modify("Pending", &route_booking(5), Some(snapshot)).unwrap_err();
    assert_eq!(err, RejectionReason::CapacityExceeded { remaining: 4 });
}

#[test]
fn test_capacity_check_has_no_hidden_state() {
    let snapshot = CapacitySnapshot {
        capacity: 12,
        occupied: 7,
    };
    let runs: Vec<_> = (0..5).map(|_| check_route_capacity(snapshot, 3)).collect();
    assert!(runs.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_invoice_context_pending_is_not_reservation_pending() {
    assert!(can_transition(StateContext::Invoice, "Pending", "Paid"));
    assert!(!can_transition(StateContext::Reservation, "Pending", "Paid"));
}

#[test]
fn test_transition_matches_graph_for_every_context() {
    for context in StateContext::all() {
        for (from, targets) in transitions_for(context) {
            for (candidate, _) in transitions_for(context) {
                assert_eq!(
                    can_transition(context, from, candidate),
                    targets.contains(candidate),
                    "contexto {} transición {} -> {}",
                    context,
                    from,
                    candidate
                );
            }
        }
        // Un origen desconocido nunca permite transiciones.
        assert!(!can_transition(context, "NoExiste", "Pending"));
    }
}
