//! Catálogo de estados y grafos de transición
//!
//! Los grafos son tablas fijas, una por contexto. El contexto de factura y
//! el de reserva definen cada uno su propio "Pending" con reglas distintas;
//! mantenerlos en grafos separados evita que una clave pise a la otra.
//! La comparación de nombres es exacta (sin mayúsculas/minúsculas), nunca
//! por subcadena.

use crate::models::state::StateContext;
use lazy_static::lazy_static;
use regex::Regex;

/// Grafo de transiciones del contexto `reservation`.
const RESERVATION_TRANSITIONS: &[(&str, &[&str])] = &[
    ("Pending", &["Confirmed", "Cancelled"]),
    ("Confirmed", &["Executed", "Cancelled", "Invoiced"]),
    ("Executed", &["Invoiced"]),
    ("Cancelled", &[]),
    ("Invoiced", &[]),
];

/// Grafo de transiciones del contexto `vehicle`.
const VEHICLE_TRANSITIONS: &[(&str, &[&str])] = &[
    ("Available", &["In Service", "Maintenance", "Retired"]),
    ("In Service", &["Available", "Maintenance"]),
    ("Maintenance", &["Available", "Retired"]),
    ("Retired", &[]),
];

/// Grafo de transiciones del contexto `route_run`.
const ROUTE_RUN_TRANSITIONS: &[(&str, &[&str])] = &[
    ("Scheduled", &["Activated", "Cancelled"]),
    ("Activated", &["Closed", "Cancelled"]),
    ("Closed", &[]),
    ("Cancelled", &[]),
];

/// Grafo de transiciones del contexto `tour_run`.
const TOUR_RUN_TRANSITIONS: &[(&str, &[&str])] = &[
    ("Scheduled", &["Activated", "Cancelled"]),
    ("Activated", &["Completed", "Cancelled"]),
    ("Completed", &[]),
    ("Cancelled", &[]),
];

/// Grafo de transiciones del contexto `invoice`. Su "Pending" no es el de
/// reservas.
const INVOICE_TRANSITIONS: &[(&str, &[&str])] = &[
    ("Pending", &["Paid", "Cancelled"]),
    ("Paid", &[]),
    ("Cancelled", &[]),
];

/// Devuelve el grafo dirigido de transiciones de un contexto. Las entradas
/// con destino vacío son terminales.
pub fn transitions_for(context: StateContext) -> &'static [(&'static str, &'static [&'static str])] {
    match context {
        StateContext::Vehicle => VEHICLE_TRANSITIONS,
        StateContext::Reservation => RESERVATION_TRANSITIONS,
        StateContext::RouteRun => ROUTE_RUN_TRANSITIONS,
        StateContext::TourRun => TOUR_RUN_TRANSITIONS,
        StateContext::Invoice => INVOICE_TRANSITIONS,
    }
}

/// `true` si `to` es alcanzable desde `from` en el contexto dado. Un estado
/// origen desconocido no permite ninguna transición.
pub fn can_transition(context: StateContext, from: &str, to: &str) -> bool {
    transitions_for(context)
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(from))
        .map(|(_, targets)| targets.iter().any(|t| t.eq_ignore_ascii_case(to)))
        .unwrap_or(false)
}

/// Estado inicial designado de cada contexto.
pub fn initial_state(context: StateContext) -> &'static str {
    match context {
        StateContext::Vehicle => "Available",
        StateContext::Reservation => "Pending",
        StateContext::RouteRun => "Scheduled",
        StateContext::TourRun => "Scheduled",
        StateContext::Invoice => "Pending",
    }
}

/// Estados en los que una salida admite reservas nuevas.
pub fn bookable_states(context: StateContext) -> &'static [&'static str] {
    match context {
        StateContext::RouteRun | StateContext::TourRun => &["Activated"],
        _ => &[],
    }
}

pub fn is_bookable(context: StateContext, name: &str) -> bool {
    bookable_states(context)
        .iter()
        .any(|s| s.eq_ignore_ascii_case(name))
}

/// Estados que bloquean la modificación de la entidad. Para reservas,
/// "Executed" bloquea la edición aunque aún admita la transición a
/// "Invoiced".
pub fn locked_states(context: StateContext) -> &'static [&'static str] {
    match context {
        StateContext::Vehicle => &["Retired"],
        StateContext::Reservation => &["Cancelled", "Invoiced", "Executed"],
        StateContext::RouteRun => &["Closed", "Cancelled"],
        StateContext::TourRun => &["Completed", "Cancelled"],
        StateContext::Invoice => &["Paid", "Cancelled"],
    }
}

pub fn is_locked(context: StateContext, name: &str) -> bool {
    locked_states(context)
        .iter()
        .any(|s| s.eq_ignore_ascii_case(name))
}

/// Nombre del estado que habilita la facturación de una reserva. Solo el
/// contexto de reservas tiene uno designado.
pub fn confirmed_state(context: StateContext) -> Option<&'static str> {
    match context {
        StateContext::Reservation => Some("Confirmed"),
        _ => None,
    }
}

lazy_static! {
    /// Código de estado: prefijo alfabético + sufijo numérico.
    static ref CODE_PATTERN: Regex = Regex::new(r"^([A-Z]+)(\d+)$").unwrap();
}

/// Genera el siguiente código para un contexto: prefijo + (máximo sufijo
/// numérico existente + 1), relleno a tres dígitos. Sin códigos previos
/// devuelve el sufijo "001".
pub fn generate_code(context: StateContext, existing_codes: &[String]) -> String {
    let prefix = context.code_prefix();
    let max = existing_codes
        .iter()
        .filter_map(|code| CODE_PATTERN.captures(code))
        .filter(|caps| &caps[1] == prefix)
        .filter_map(|caps| caps[2].parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:03}", prefix, max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_transitions() {
        assert!(can_transition(StateContext::Reservation, "Pending", "Confirmed"));
        assert!(can_transition(StateContext::Reservation, "Pending", "Cancelled"));
        assert!(can_transition(StateContext::Reservation, "Confirmed", "Invoiced"));
        assert!(!can_transition(StateContext::Reservation, "Pending", "Invoiced"));
        assert!(!can_transition(StateContext::Reservation, "Pending", "Executed"));
    }

    #[test]
    fn test_terminal_states_have_no_transitions() {
        for target in ["Pending", "Confirmed", "Executed", "Cancelled", "Invoiced"] {
            assert!(!can_transition(StateContext::Reservation, "Cancelled", target));
            assert!(!can_transition(StateContext::Reservation, "Invoiced", target));
        }
    }

    #[test]
    fn test_unknown_state_fails_closed() {
        assert!(!can_transition(StateContext::Reservation, "Draft", "Confirmed"));
        assert!(!can_transition(StateContext::Vehicle, "", "Available"));
    }

    #[test]
    fn test_name_comparison_is_case_insensitive() {
        assert!(can_transition(StateContext::Reservation, "pending", "CONFIRMED"));
        assert!(is_locked(StateContext::Reservation, "cancelled"));
    }

    #[test]
    fn test_pending_means_different_things_per_context() {
        // El "Pending" de factura no hereda las reglas del de reserva.
        assert!(can_transition(StateContext::Invoice, "Pending", "Paid"));
        assert!(!can_transition(StateContext::Reservation, "Pending", "Paid"));
        assert!(can_transition(StateContext::Reservation, "Pending", "Confirmed"));
        assert!(!can_transition(StateContext::Invoice, "Pending", "Confirmed"));
    }

    #[test]
    fn test_can_transition_matches_graph_membership() {
        for context in StateContext::all() {
            for (from, targets) in transitions_for(context) {
                for (other, _) in transitions_for(context) {
                    let expected = targets.contains(other);
                    assert_eq!(can_transition(context, from, other), expected);
                }
            }
        }
    }

    #[test]
    fn test_generate_code_empty_set() {
        assert_eq!(generate_code(StateContext::Reservation, &[]), "RES001");
        assert_eq!(generate_code(StateContext::Vehicle, &[]), "VEH001");
    }

    #[test]
    fn test_generate_code_increments_highest_suffix() {
        let existing = vec![
            "RES001".to_string(),
            "RES007".to_string(),
            "RES003".to_string(),
        ];
        assert_eq!(generate_code(StateContext::Reservation, &existing), "RES008");
    }

    #[test]
    fn test_generate_code_ignores_foreign_prefixes_and_junk() {
        let existing = vec![
            "VEH009".to_string(),
            "RES002".to_string(),
            "sin-formato".to_string(),
        ];
        assert_eq!(generate_code(StateContext::Reservation, &existing), "RES003");
    }

    #[test]
    fn test_generate_code_grows_past_three_digits() {
        let existing = vec!["RES999".to_string()];
        assert_eq!(generate_code(StateContext::Reservation, &existing), "RES1000");
    }
}
