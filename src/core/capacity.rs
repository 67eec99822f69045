//! Validación de capacidad
//!
//! Comprueba si N pasajeros más caben en una salida de ruta dado un
//! snapshot ya leído de {capacidad, ocupación}. Las salidas de tour no
//! tienen techo; su chequeo existe para que el llamador trate ambos casos
//! de forma polimórfica.

use serde::Serialize;

/// Capacidad efectiva y ocupación actual de una salida de ruta, leídas por
/// la capa de servicios dentro de la misma transacción que decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacitySnapshot {
    /// Capacidad del vehículo asignado; <= 0 significa sin límite.
    pub capacity: i32,
    /// Suma de adultos + niños de las reservas activas (no canceladas, no
    /// borradas) de la salida, excluida la reserva en edición si la hay.
    pub occupied: i32,
}

/// Resultado de un chequeo de capacidad, apto para mostrarse tal cual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityCheck {
    pub ok: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<i32>,
}

impl CapacityCheck {
    fn ok(message: &str) -> Self {
        Self {
            ok: true,
            message: message.to_string(),
            remaining: None,
        }
    }

    pub fn not_found(what: &str) -> Self {
        Self {
            ok: false,
            message: format!("{} not found", what),
            remaining: None,
        }
    }
}

/// Chequeo de capacidad de una salida de ruta.
pub fn check_route_capacity(snapshot: CapacitySnapshot, incoming: i32) -> CapacityCheck {
    if snapshot.capacity <= 0 {
        return CapacityCheck::ok("no capacity limit");
    }

    let remaining = snapshot.capacity - snapshot.occupied;
    if snapshot.occupied + incoming > snapshot.capacity {
        return CapacityCheck {
            ok: false,
            message: format!("insufficient capacity, {} seats available", remaining),
            remaining: Some(remaining),
        };
    }

    let mut check = CapacityCheck::ok("capacity available");
    check.remaining = Some(remaining - incoming);
    check
}

/// Las salidas de tour no tienen techo de capacidad.
pub fn check_tour_capacity(_incoming: i32) -> CapacityCheck {
    CapacityCheck::ok("no capacity limit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_when_over_capacity() {
        // Escenario: capacidad 20, ocupadas 18, entran 3.
        let check = check_route_capacity(CapacitySnapshot { capacity: 20, occupied: 18 }, 3);
        assert!(!check.ok);
        assert_eq!(check.remaining, Some(2));
        assert!(check.message.contains("2 seats available"));
    }

    #[test]
    fn test_accepts_when_room_left() {
        // Escenario: capacidad 20, ocupadas 15, entran 5.
        let check = check_route_capacity(CapacitySnapshot { capacity: 20, occupied: 15 }, 5);
        assert!(check.ok);
        assert_eq!(check.remaining, Some(0));
    }

    #[test]
    fn test_exact_fit_is_accepted() {
        let check = check_route_capacity(CapacitySnapshot { capacity: 10, occupied: 0 }, 10);
        assert!(check.ok);
    }

    #[test]
    fn test_zero_capacity_means_unlimited() {
        let check = check_route_capacity(CapacitySnapshot { capacity: 0, occupied: 400 }, 500);
        assert!(check.ok);
        assert_eq!(check.message, "no capacity limit");
        assert_eq!(check.remaining, None);
    }

    #[test]
    fn test_tour_runs_always_pass() {
        // Escenario: tour con 500 pasajeros entrantes.
        assert!(check_tour_capacity(500).ok);
        assert!(check_tour_capacity(0).ok);
    }

    #[test]
    fn test_check_is_idempotent() {
        let snapshot = CapacitySnapshot { capacity: 20, occupied: 18 };
        let first = check_route_capacity(snapshot, 3);
        let second = check_route_capacity(snapshot, 3);
        assert_eq!(first, second);
    }
}
