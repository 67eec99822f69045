//! Exclusividad de servicio
//!
//! Una reserva referencia exactamente una de {salida de ruta, salida de
//! tour}. Este chequeo corre antes que cualquier validación de capacidad o
//! de estado porque determina qué validador aplica.

use super::RejectionReason;

pub fn check_service_assignment(
    has_route_run: bool,
    has_tour_run: bool,
) -> Result<(), RejectionReason> {
    match (has_route_run, has_tour_run) {
        (true, true) => Err(RejectionReason::ConstraintViolation(
            "a reservation cannot reference both a route run and a tour run".to_string(),
        )),
        (false, false) => Err(RejectionReason::ConstraintViolation(
            "a reservation must reference either a route run or a tour run".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_reference_is_valid() {
        assert!(check_service_assignment(true, false).is_ok());
        assert!(check_service_assignment(false, true).is_ok());
    }

    #[test]
    fn test_both_references_rejected() {
        let err = check_service_assignment(true, true).unwrap_err();
        assert!(matches!(err, RejectionReason::ConstraintViolation(_)));
        assert!(err.to_string().contains("cannot reference both"));
    }

    #[test]
    fn test_no_reference_rejected() {
        let err = check_service_assignment(false, false).unwrap_err();
        assert!(matches!(err, RejectionReason::ConstraintViolation(_)));
        assert!(err.to_string().contains("must reference either"));
    }
}
