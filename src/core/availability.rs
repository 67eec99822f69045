//! Búsqueda de disponibilidad
//!
//! Selección pura y de solo lectura sobre candidatos ya leídos para un
//! servicio y fecha: primero salidas de ruta reservables con hueco, después
//! salidas de tour reservables. El llamador debe revalidar la capacidad
//! bajo bloqueo al escribir la reserva; aquí no se adquiere ningún
//! compromiso.

use super::capacity::{check_route_capacity, CapacitySnapshot};
use super::state_catalog;
use crate::models::state::StateContext;
use chrono::NaiveTime;
use serde::Serialize;
use uuid::Uuid;

/// Referencia a la instancia de servicio elegida para una reserva nueva.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ServiceInstanceRef {
    RouteRun(Uuid),
    TourRun(Uuid),
}

/// Candidato de salida de ruta con su snapshot de ocupación.
#[derive(Debug, Clone)]
pub struct RouteRunCandidate {
    pub id: Uuid,
    pub departs_at: NaiveTime,
    pub state: String,
    pub capacity: i32,
    pub occupied: i32,
}

/// Candidato de salida de tour.
#[derive(Debug, Clone)]
pub struct TourRunCandidate {
    pub id: Uuid,
    pub departs_at: NaiveTime,
    pub state: String,
}

/// Primer candidato que acepta `passengers`, con desempate determinista por
/// hora de salida y después por id.
pub fn find_availability(
    route_runs: &[RouteRunCandidate],
    tour_runs: &[TourRunCandidate],
    passengers: i32,
) -> Option<ServiceInstanceRef> {
    let mut routes: Vec<&RouteRunCandidate> = route_runs
        .iter()
        .filter(|c| state_catalog::is_bookable(StateContext::RouteRun, &c.state))
        .collect();
    routes.sort_by_key(|c| (c.departs_at, c.id));

    for candidate in routes {
        let snapshot = CapacitySnapshot {
            capacity: candidate.capacity,
            occupied: candidate.occupied,
        };
        if check_route_capacity(snapshot, passengers).ok {
            return Some(ServiceInstanceRef::RouteRun(candidate.id));
        }
    }

    let mut tours: Vec<&TourRunCandidate> = tour_runs
        .iter()
        .filter(|c| state_catalog::is_bookable(StateContext::TourRun, &c.state))
        .collect();
    tours.sort_by_key(|c| (c.departs_at, c.id));

    // Los tours no tienen techo de capacidad: el primero reservable vale.
    tours
        .first()
        .map(|candidate| ServiceInstanceRef::TourRun(candidate.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn route(id: u128, h: u32, state: &str, capacity: i32, occupied: i32) -> RouteRunCandidate {
        RouteRunCandidate {
            id: Uuid::from_u128(id),
            departs_at: at(h, 0),
            state: state.to_string(),
            capacity,
            occupied,
        }
    }

    fn tour(id: u128, h: u32, state: &str) -> TourRunCandidate {
        TourRunCandidate {
            id: Uuid::from_u128(id),
            departs_at: at(h, 0),
            state: state.to_string(),
        }
    }

    #[test]
    fn test_picks_earliest_route_run_with_room() {
        let routes = vec![
            route(2, 12, "Activated", 20, 0),
            route(1, 8, "Activated", 20, 0),
        ];
        let found = find_availability(&routes, &[], 4);
        assert_eq!(found, Some(ServiceInstanceRef::RouteRun(Uuid::from_u128(1))));
    }

    #[test]
    fn test_skips_full_route_run() {
        let routes = vec![
            route(1, 8, "Activated", 20, 18),
            route(2, 12, "Activated", 20, 10),
        ];
        let found = find_availability(&routes, &[], 3);
        assert_eq!(found, Some(ServiceInstanceRef::RouteRun(Uuid::from_u128(2))));
    }

    #[test]
    fn test_skips_non_bookable_states() {
        let routes = vec![
            route(1, 8, "Scheduled", 20, 0),
            route(2, 9, "Cancelled", 20, 0),
        ];
        let tours = vec![tour(7, 10, "Activated")];
        let found = find_availability(&routes, &tours, 2);
        assert_eq!(found, Some(ServiceInstanceRef::TourRun(Uuid::from_u128(7))));
    }

    #[test]
    fn test_falls_back_to_tour_run_when_routes_full() {
        let routes = vec![route(1, 8, "Activated", 10, 10)];
        let tours = vec![tour(5, 16, "Activated"), tour(4, 9, "Activated")];
        let found = find_availability(&routes, &tours, 1);
        assert_eq!(found, Some(ServiceInstanceRef::TourRun(Uuid::from_u128(4))));
    }

    #[test]
    fn test_tour_run_accepts_any_group_size() {
        let tours = vec![tour(3, 11, "Activated")];
        let found = find_availability(&[], &tours, 500);
        assert_eq!(found, Some(ServiceInstanceRef::TourRun(Uuid::from_u128(3))));
    }

    #[test]
    fn test_none_when_nothing_bookable() {
        let routes = vec![route(1, 8, "Activated", 4, 4)];
        let tours = vec![tour(2, 9, "Scheduled")];
        assert_eq!(find_availability(&routes, &tours, 1), None);
        assert_eq!(find_availability(&[], &[], 1), None);
    }

    #[test]
    fn test_tie_break_on_same_departure_uses_lowest_id() {
        let routes = vec![
            route(9, 8, "Activated", 20, 0),
            route(3, 8, "Activated", 20, 0),
        ];
        let found = find_availability(&routes, &[], 1);
        assert_eq!(found, Some(ServiceInstanceRef::RouteRun(Uuid::from_u128(3))));
    }

    #[test]
    fn test_unlimited_capacity_route_wins_over_tour() {
        // Sin vehículo asignado la capacidad es 0 => ilimitada.
        let routes = vec![route(1, 8, "Activated", 0, 250)];
        let tours = vec![tour(2, 7, "Activated")];
        let found = find_availability(&routes, &tours, 40);
        assert_eq!(found, Some(ServiceInstanceRef::RouteRun(Uuid::from_u128(1))));
    }
}
