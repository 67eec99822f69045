//! Tests de integración de la búsqueda de disponibilidad: primero salidas
//! de ruta reservables con hueco, después salidas de tour, con desempate
//! determinista.

use agency_backoffice::core::availability::{
    find_availability, RouteRunCandidate, ServiceInstanceRef, TourRunCandidate,
};
use chrono::NaiveTime;
use uuid::Uuid;

fn at(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

fn route(id: u128, hour: u32, state: &str, capacity: i32, occupied: i32) -> RouteRunCandidate {
    RouteRunCandidate {
        id: Uuid::from_u128(id),
        departs_at: at(hour),
        state: state.to_string(),
        capacity,
        occupied,
    }
}

fn tour(id: u128, hour: u32, state: &str) -> TourRunCandidate {
    TourRunCandidate {
        id: Uuid::from_u128(id),
        departs_at: at(hour),
        state: state.to_string(),
    }
}

#[test]
fn test_prefers_route_runs_over_tour_runs() {
    let routes = vec![route(1, 10, "Activated", 30, 5)];
    let tours = vec![tour(2, 8, "Activated")];

    // Aunque el tour salga antes, la ruta con hueco gana: el tour es el
    // camino de respaldo.
    assert_eq!(
        find_availability(&routes, &tours, 4),
        Some(ServiceInstanceRef::RouteRun(Uuid::from_u128(1)))
    );
}

#[test]
fn test_walks_route_runs_in_departure_order() {
    let routes = vec![
        route(3, 16, "Activated", 20, 0),
        route(1, 8, "Activated", 20, 19),
        route(2, 12, "Activated", 20, 10),
    ];

    // La de las 8 está casi llena para 4 plazas; la siguiente por hora es
    // la de las 12.
    assert_eq!(
        find_availability(&routes, &[], 4),
        Some(ServiceInstanceRef::RouteRun(Uuid::from_u128(2)))
    );
}

#[test]
fn test_ignores_non_bookable_candidates() {
    let routes = vec![
        route(1, 8, "Scheduled", 20, 0),
        route(2, 9, "Closed", 20, 0),
        route(3, 10, "Cancelled", 20, 0),
    ];
    let tours = vec![tour(4, 11, "Scheduled"), tour(5, 12, "Completed")];

    assert_eq!(find_availability(&routes, &tours, 1), None);
}

#[test]
fn test_falls_back_to_earliest_bookable_tour() {
    let routes = vec![route(1, 8, "Activated", 4, 4)];
    let tours = vec![
        tour(9, 15, "Activated"),
        tour(2, 9, "Activated"),
        tour(5, 9, "Activated"),
    ];

    // Misma hora: gana el id menor.
    assert_eq!(
        find_availability(&routes, &tours, 2),
        Some(ServiceInstanceRef::TourRun(Uuid::from_u128(2)))
    );
}

#[test]
fn test_unassigned_vehicle_means_unlimited_capacity() {
    let routes = vec![route(7, 9, "Activated", 0, 120)];

    assert_eq!(
        find_availability(&routes, &[], 80),
        Some(ServiceInstanceRef::RouteRun(Uuid::from_u128(7)))
    );
}

#[test]
fn test_search_is_read_only_and_repeatable() {
    let routes = vec![
        route(1, 8, "Activated", 10, 9),
        route(2, 10, "Activated", 10, 0),
    ];
    let tours = vec![tour(3, 12, "Activated")];

    let first = find_availability(&routes, &tours, 3);
    let second = find_availability(&routes, &tours, 3);
    assert_eq!(first, second);
    assert_eq!(first, Some(ServiceInstanceRef::RouteRun(Uuid::from_u128(2))));
}
